use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    fn get_number(&self, key: &str) -> Option<u32> {
        self.items.get(key).and_then(|val| val.trim().parse().ok())
    }

    /// Requested page; anything missing or unparsable is page 1.
    pub fn get_page(&self) -> u32 {
        match self.get_number("page") {
            Some(0) | None => 1,
            Some(page) => page,
        }
    }

    pub fn get_width(&self) -> Option<u32> {
        self.get_number("width").filter(|w| *w > 0)
    }

    pub fn get_query(&self) -> &str {
        self.items.get("q").map(String::as_str).unwrap_or("")
    }
}
