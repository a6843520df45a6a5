use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecordId;

/// Fallback description for courses without one
const NO_DESCRIPTION: &str = "No description available";

/// Level shown when a course has none
const DEFAULT_LEVEL: &str = "Beginner";

/// Duration shown when a course has none
const DEFAULT_DURATION: &str = "4 weeks";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Title for the course at `index` (zero-based) in a list:
    /// `title`, else `name`, else "Course N".
    pub fn display_title(&self, index: usize) -> String {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Course {}", index + 1))
    }

    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn display_level(&self) -> &str {
        self.level
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LEVEL)
    }

    pub fn display_duration(&self) -> &str {
        self.duration
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DURATION)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed category")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pathway {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled pathway")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_fallbacks() {
        let course = Course::default();
        assert_eq!(course.display_title(0), "Course 1");
        assert_eq!(course.display_title(4), "Course 5");
        assert_eq!(course.display_description(), "No description available");
        assert_eq!(course.display_level(), "Beginner");
        assert_eq!(course.display_duration(), "4 weeks");
    }

    #[test]
    fn test_course_title_precedence() {
        let json = r#"{"id":3,"name":"Rust 101","level":"Advanced","instructor":"Ferris"}"#;
        let mut course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.display_title(0), "Rust 101");
        assert_eq!(course.display_level(), "Advanced");
        assert_eq!(course.extra.get("instructor"), Some(&Value::from("Ferris")));

        course.title = Some("Systems Programming".to_string());
        assert_eq!(course.display_title(0), "Systems Programming");
    }

    #[test]
    fn test_pathway_title() {
        let pathway: Pathway = serde_json::from_str(r#"{"name":"Backend"}"#).unwrap();
        assert_eq!(pathway.display_title(), "Backend");
        assert_eq!(Pathway::default().display_title(), "Untitled pathway");
    }
}
