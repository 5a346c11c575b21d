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

    pub fn get_page(&self) -> u32 {
        let val = self.items.get("page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        if val == 0 { return 1; }
        val
    }

    pub fn get_tag(&self) -> Option<&str> {
        self.get_non_empty("tag")
    }

    pub fn get_category(&self) -> Option<&str> {
        self.get_non_empty("category")
    }

    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.items.get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}
