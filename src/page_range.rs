use serde::Serialize;

/// Smallest budget that still fits first, ellipsis, current, ellipsis, last.
/// Below it only the current page is shown once the pages overflow.
pub const MIN_BUTTONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "lowercase")]
pub enum PageEntry {
    Page(u32),
    Ellipsis,
}

/// Button budget depending on how wide the client viewport is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBudget {
    pub wide: u32,
    pub narrow: u32,
    pub narrow_breakpoint: u32,
}

impl Default for ButtonBudget {
    fn default() -> Self {
        ButtonBudget {
            wide: 7,
            narrow: 5,
            narrow_breakpoint: 768,
        }
    }
}

impl ButtonBudget {
    /// Unknown widths get the wide budget.
    pub fn for_width(&self, width: Option<u32>) -> u32 {
        match width {
            Some(w) if w < self.narrow_breakpoint => self.narrow,
            _ => self.wide,
        }
    }
}

/// Computes the page controls to show for `cur_page` out of `total_pages`,
/// using at most `max_buttons` entries (ellipses included).
///
/// `cur_page` is clamped into `[1, total_pages]`. Budgets smaller than
/// [`MIN_BUTTONS`] cannot fit both ends around the current page, so they get
/// the current page alone (nothing for a zero budget).
pub fn page_range(cur_page: u32, total_pages: u32, max_buttons: u32) -> Vec<PageEntry> {
    if total_pages == 0 || max_buttons == 0 {
        return vec![];
    }

    if total_pages <= max_buttons {
        return (1..=total_pages).map(PageEntry::Page).collect();
    }

    let cur_page = cur_page.clamp(1, total_pages);
    if max_buttons < MIN_BUTTONS {
        return vec![PageEntry::Page(cur_page)];
    }

    // First, last and two ellipses are fixed, the rest is the window
    let window = max_buttons - 4;
    let left = cur_page.saturating_sub((window - 1) / 2).max(1);
    let right = left + window - 1;

    let mut entries = Vec::with_capacity(max_buttons as usize);

    if left <= 3 {
        // Pinned to the start: 1..=max-2, then the tail
        entries.extend((1..=max_buttons - 2).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total_pages));
    } else if right + 2 >= total_pages {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((total_pages - (max_buttons - 3)..=total_pages).map(PageEntry::Page));
    } else {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((left..=right).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total_pages));
    }

    entries
}
