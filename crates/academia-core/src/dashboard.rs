//! Dashboard assembly: the first page of courses and the latest
//! announcements, framed for the logged-in account kind.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::AccountKind;
use crate::models::{Announcement, Course};

/// Courses shown on the dashboard
pub const MAX_DASHBOARD_COURSES: usize = 5;

/// Announcements shown on the dashboard
pub const MAX_DASHBOARD_ANNOUNCEMENTS: usize = 4;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub display_name: String,
    pub kind: AccountKind,
    pub courses: Vec<Course>,
    pub announcements: Vec<Announcement>,
}

impl Dashboard {
    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.display_name)
    }

    pub fn intro(&self) -> &'static str {
        match self.kind {
            AccountKind::Admin => {
                "Manage courses, users, and platform content from your admin dashboard."
            }
            AccountKind::Student => "Continue your learning journey.",
        }
    }

    pub fn courses_heading(&self) -> &'static str {
        match self.kind {
            AccountKind::Admin => "Recent Courses",
            AccountKind::Student => "Continue Learning",
        }
    }

    pub fn courses_subtitle(&self) -> &'static str {
        match self.kind {
            AccountKind::Admin => "Latest courses added to the platform",
            AccountKind::Student => "Pick up where you left off",
        }
    }

    /// Label of the per-course action
    pub fn course_action(&self) -> &'static str {
        match self.kind {
            AccountKind::Admin => "Manage",
            AccountKind::Student => "Continue",
        }
    }
}

/// Fetch courses and announcements concurrently and build the dashboard.
///
/// Either call failing fails the whole load; nothing partial is returned.
/// After a 401 the session is already cleared when this returns.
pub async fn load_dashboard(api: &ApiClient) -> Result<Dashboard, ApiError> {
    let (courses, announcements) = futures::try_join!(api.courses(0), api.announcements())?;

    let mut courses = courses.into_items();
    courses.truncate(MAX_DASHBOARD_COURSES);
    let mut announcements = announcements;
    announcements.truncate(MAX_DASHBOARD_ANNOUNCEMENTS);
    debug!(
        courses = courses.len(),
        announcements = announcements.len(),
        "Dashboard loaded"
    );

    let session = api.sessions().current();
    let kind = session.as_ref().map(|s| s.kind).unwrap_or(AccountKind::Student);
    let display_name = session
        .as_ref()
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| kind.label().to_string());

    Ok(Dashboard {
        display_name,
        kind,
        courses,
        announcements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(kind: AccountKind) -> Dashboard {
        Dashboard {
            display_name: "Ada".to_string(),
            kind,
            courses: Vec::new(),
            announcements: Vec::new(),
        }
    }

    #[test]
    fn test_student_copy() {
        let d = dashboard(AccountKind::Student);
        assert_eq!(d.greeting(), "Welcome back, Ada!");
        assert_eq!(d.courses_heading(), "Continue Learning");
        assert_eq!(d.course_action(), "Continue");
    }

    #[test]
    fn test_admin_copy() {
        let d = dashboard(AccountKind::Admin);
        assert_eq!(d.courses_heading(), "Recent Courses");
        assert_eq!(d.courses_subtitle(), "Latest courses added to the platform");
        assert_eq!(d.course_action(), "Manage");
    }
}
