//! Backend route catalog.
//!
//! Paths are reproduced exactly as the backend serves them, including the
//! trailing slash on several create routes and the misspelled announcements
//! list route. Page numbers are zero-based.

// ===== Auth =====

pub const USER_LOGIN: &str = "/api/auth/user/login";
pub const ADMIN_LOGIN: &str = "/api/auth/admin/login";
pub const LOGOUT: &str = "/api/auth/logout";

// ===== Users =====

pub const USERS: &str = "/api/users";

pub fn users_page(page: u32) -> String {
    format!("/api/users/page/{}", page)
}

pub fn user(id: &str) -> String {
    format!("/api/users/{}", id)
}

// ===== Courses =====

pub const COURSE_CREATE: &str = "/api/course/";

pub fn courses_page(page: u32) -> String {
    format!("/api/course/page/{}", page)
}

pub fn course(id: &str) -> String {
    format!("/api/course/{}", id)
}

// ===== Course details =====

pub const COURSE_DETAILS: &str = "/api/coursedetail";
pub const COURSE_DETAIL_CREATE: &str = "/api/coursedetail/";

pub fn course_detail(id: &str) -> String {
    format!("/api/coursedetail/{}", id)
}

// ===== Categories =====

pub const CATEGORIES: &str = "/api/category";
pub const CATEGORY_CREATE: &str = "/api/category/";

pub fn category(id: &str) -> String {
    format!("/api/category/{}", id)
}

// ===== Pathways =====

pub const PATHWAY_CREATE: &str = "/api/pathway/";

pub fn pathways_page(page: u32) -> String {
    format!("/api/pathway/page/{}", page)
}

pub fn pathway(id: &str) -> String {
    format!("/api/pathway/{}", id)
}

// ===== Announcements =====

/// The backend spells this route without the second "n".
pub const ANNOUNCEMENTS: &str = "/api/annoucement";
pub const ANNOUNCEMENT_CREATE: &str = "/api/announcement/";

// ===== Admins =====

pub const ADMINS: &str = "/api/admins";

pub fn admin(id: &str) -> String {
    format!("/api/admins/{}", id)
}

// ===== Admin roles =====

pub const ADMIN_ROLE_CREATE: &str = "/api/adminRole/";

pub fn admin_roles_page(page: u32) -> String {
    format!("/api/adminRole/page/{}", page)
}

pub fn admin_role(id: &str) -> String {
    format!("/api/adminRole/{}", id)
}
