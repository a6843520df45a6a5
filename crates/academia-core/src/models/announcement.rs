use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecordId;
use crate::utils::format_date;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Announcement {
    /// Title for the announcement at `index` (zero-based) in a list
    pub fn display_title(&self, index: usize) -> String {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Announcement {}", index + 1))
    }

    /// Body text: `content`, else `message`
    pub fn display_body(&self) -> &str {
        self.content
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.message.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("No content available")
    }

    pub fn display_date(&self) -> String {
        match self.date.as_deref() {
            Some(date) if !date.is_empty() => format_date(date),
            _ => "Today".to_string(),
        }
    }
}
