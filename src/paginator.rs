use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub cur_page: u32,
    pub page_count: u32,
    pub page_size: u32,
}

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = (items.len() as u32).div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Items of the 1-indexed `page`, clamped into the valid range.
    /// With no items this is page 1 and an empty slice.
    pub fn page(&self, page: u32) -> (&'a [T], PaginationState) {
        let cur_page = page.clamp(1, self.page_count.max(1));

        let start = ((cur_page - 1) * self.page_size) as usize;
        let start = start.min(self.items.len());
        let end = (start + self.page_size as usize).min(self.items.len());

        let state = PaginationState {
            cur_page,
            page_count: self.page_count,
            page_size: self.page_size,
        };
        (&self.items[start..end], state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
        let paginator = Paginator::new(&items, 3);
        assert_eq!(paginator.page_count(), 5);
        assert_eq!(paginator.page(1).0, &[1, 2, 3]);
        assert_eq!(paginator.page(2).0, &[4, 5, 6]);
        assert_eq!(paginator.page(3).0, &[7, 8, 9]);
        assert_eq!(paginator.page(4).0, &[10, 11, 12]);
        assert_eq!(paginator.page(5).0, &[13]);

        let (_, state) = paginator.page(2);
        assert_eq!(state, PaginationState { cur_page: 2, page_count: 5, page_size: 3 });
    }

    #[test]
    fn test_clamps_page() {
        let items = vec![1, 2, 3, 4, 5, 6, 7];
        let paginator = Paginator::new(&items, 6);
        assert_eq!(paginator.page_count(), 2);

        let (page, state) = paginator.page(0);
        assert_eq!(page, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(state.cur_page, 1);

        let (page, state) = paginator.page(9);
        assert_eq!(page, &[7]);
        assert_eq!(state.cur_page, 2);
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::new(&items, 6);
        assert_eq!(paginator.page_count(), 0);

        let (page, state) = paginator.page(3);
        assert!(page.is_empty());
        assert_eq!(state.cur_page, 1);
    }

    #[test]
    fn test_zero_page_size() {
        let items = vec!['a', 'b'];
        let paginator = Paginator::new(&items, 0);
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.page(2).0, &['b']);
    }
}
