use serde::{Deserialize, Serialize};

/// Paginated envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn single(results: Vec<T>) -> Self {
        Self {
            page: 1,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            page: self.page,
            total_results: self.total_results,
            total_pages: self.total_pages,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
