use std::fmt;

use serde::{Deserialize, Serialize};

/// Record identifier. The backend uses numeric ids, but string ids are
/// accepted so an unexpected record does not fail the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

/// A list response, either a bare array or a paged envelope
/// (`{"content": [...], "totalPages": ..}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    Paged {
        content: Vec<T>,
        #[serde(rename = "totalPages", default)]
        total_pages: Option<u32>,
        #[serde(rename = "totalElements", default)]
        total_elements: Option<u64>,
        #[serde(default)]
        number: Option<u32>,
    },
    List(Vec<T>),
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Page::Paged { content, .. } => content,
            Page::List(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Page::Paged { content, .. } => content,
            Page::List(items) => items,
        }
    }

    pub fn total_pages(&self) -> Option<u32> {
        match self {
            Page::Paged { total_pages, .. } => *total_pages,
            Page::List(_) => None,
        }
    }

    /// Whether a later page may exist
    pub fn has_next(&self, current: u32) -> bool {
        self.total_pages()
            .map(|t| current.saturating_add(1) < t)
            .unwrap_or(false)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page::List(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let n: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(n, RecordId::Number(42));
        assert_eq!(n.to_string(), "42");

        let s: RecordId = serde_json::from_str(r#""abc-1""#).unwrap();
        assert_eq!(s.to_string(), "abc-1");
    }

    #[test]
    fn test_page_parses_both_shapes() {
        let paged: Page<Value> =
            serde_json::from_str(r#"{"content":[1,2],"totalPages":3,"number":0}"#).unwrap();
        assert_eq!(paged.items().len(), 2);
        assert_eq!(paged.total_pages(), Some(3));
        assert!(paged.has_next(0));
        assert!(!paged.has_next(2));
        assert!(!paged.has_next(u32::MAX));

        let list: Page<Value> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(list.into_items().len(), 3);
    }

    #[test]
    fn test_page_without_total_has_no_next() {
        let list: Page<Value> = serde_json::from_str("[]").unwrap();
        assert!(!list.has_next(0));
        assert!(list.items().is_empty());
    }
}
