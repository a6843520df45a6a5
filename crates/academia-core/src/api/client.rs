//! Typed client for the Academia 360 REST API.
//!
//! Every method is a direct passthrough to one backend route and goes
//! through the `Gateway`, so the session policy applies uniformly. Create
//! and update calls return whatever JSON the backend echoes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{Identity, SessionStore};
use crate::models::{
    Admin, AdminRole, Announcement, Category, Course, CourseDetail, Page, Pathway, User,
};

use super::endpoints;
use super::{ApiError, Gateway};

/// Credentials sent to both login endpoints
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UserLoginResponse {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: Identity,
}

/// API client for Academia 360.
/// Clone is cheap - the gateway shares its connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn sessions(&self) -> &SessionStore {
        self.gateway.sessions()
    }

    // ===== Auth =====

    pub async fn login_user(&self, username: &str, password: &str) -> Result<UserLoginResponse, ApiError> {
        self.gateway
            .post(endpoints::USER_LOGIN, &LoginRequest { username, password })
            .await
    }

    pub async fn login_admin(&self, username: &str, password: &str) -> Result<AdminLoginResponse, ApiError> {
        self.gateway
            .post(endpoints::ADMIN_LOGIN, &LoginRequest { username, password })
            .await
    }

    /// Tell the backend the session is over. The response is ignored.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.gateway.post_empty(endpoints::LOGOUT).await
    }

    // ===== Users =====

    pub async fn users(&self, page: u32) -> Result<Page<User>, ApiError> {
        self.gateway.get(&endpoints::users_page(page)).await
    }

    pub async fn user(&self, id: &str) -> Result<User, ApiError> {
        self.gateway.get(&endpoints::user(id)).await
    }

    pub async fn create_user<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::USERS, user).await
    }

    pub async fn update_user<B: Serialize + ?Sized>(&self, id: &str, user: &B) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::user(id), user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::user(id)).await
    }

    // ===== Courses =====

    pub async fn courses(&self, page: u32) -> Result<Page<Course>, ApiError> {
        self.gateway.get(&endpoints::courses_page(page)).await
    }

    pub async fn create_course<B: Serialize + ?Sized>(&self, course: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::COURSE_CREATE, course).await
    }

    pub async fn update_course<B: Serialize + ?Sized>(&self, id: &str, course: &B) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::course(id), course).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::course(id)).await
    }

    // ===== Course details =====

    pub async fn course_details(&self) -> Result<Vec<CourseDetail>, ApiError> {
        self.gateway.get(endpoints::COURSE_DETAILS).await
    }

    pub async fn course_detail(&self, id: &str) -> Result<CourseDetail, ApiError> {
        self.gateway.get(&endpoints::course_detail(id)).await
    }

    pub async fn create_course_detail<B: Serialize + ?Sized>(&self, detail: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::COURSE_DETAIL_CREATE, detail).await
    }

    pub async fn update_course_detail<B: Serialize + ?Sized>(
        &self,
        id: &str,
        detail: &B,
    ) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::course_detail(id), detail).await
    }

    pub async fn delete_course_detail(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::course_detail(id)).await
    }

    // ===== Categories =====

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.gateway.get(endpoints::CATEGORIES).await
    }

    pub async fn category(&self, id: &str) -> Result<Category, ApiError> {
        self.gateway.get(&endpoints::category(id)).await
    }

    pub async fn create_category<B: Serialize + ?Sized>(&self, category: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::CATEGORY_CREATE, category).await
    }

    pub async fn update_category<B: Serialize + ?Sized>(
        &self,
        id: &str,
        category: &B,
    ) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::category(id), category).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::category(id)).await
    }

    // ===== Pathways =====

    pub async fn pathways(&self, page: u32) -> Result<Page<Pathway>, ApiError> {
        self.gateway.get(&endpoints::pathways_page(page)).await
    }

    pub async fn create_pathway<B: Serialize + ?Sized>(&self, pathway: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::PATHWAY_CREATE, pathway).await
    }

    pub async fn update_pathway<B: Serialize + ?Sized>(&self, id: &str, pathway: &B) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::pathway(id), pathway).await
    }

    pub async fn delete_pathway(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::pathway(id)).await
    }

    // ===== Announcements =====

    pub async fn announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        self.gateway.get(endpoints::ANNOUNCEMENTS).await
    }

    pub async fn create_announcement<B: Serialize + ?Sized>(
        &self,
        announcement: &B,
    ) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::ANNOUNCEMENT_CREATE, announcement).await
    }

    // ===== Admins =====

    pub async fn admins(&self) -> Result<Vec<Admin>, ApiError> {
        self.gateway.get(endpoints::ADMINS).await
    }

    pub async fn admin(&self, id: &str) -> Result<Admin, ApiError> {
        self.gateway.get(&endpoints::admin(id)).await
    }

    pub async fn create_admin<B: Serialize + ?Sized>(&self, admin: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::ADMINS, admin).await
    }

    pub async fn update_admin<B: Serialize + ?Sized>(&self, id: &str, admin: &B) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::admin(id), admin).await
    }

    pub async fn delete_admin(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::admin(id)).await
    }

    // ===== Admin roles =====

    pub async fn admin_roles(&self, page: u32) -> Result<Page<AdminRole>, ApiError> {
        self.gateway.get(&endpoints::admin_roles_page(page)).await
    }

    pub async fn create_admin_role<B: Serialize + ?Sized>(&self, role: &B) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::ADMIN_ROLE_CREATE, role).await
    }

    pub async fn update_admin_role<B: Serialize + ?Sized>(&self, id: &str, role: &B) -> Result<Value, ApiError> {
        self.gateway.put(&endpoints::admin_role(id), role).await
    }

    pub async fn delete_admin_role(&self, id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&endpoints::admin_role(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_login_response() {
        let json = r#"{"token":"abc.def","user":{"id":12,"username":"jdoe","enrolled":3}}"#;
        let resp: UserLoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "abc.def");
        assert_eq!(resp.user.username.as_deref(), Some("jdoe"));
        assert!(resp.user.extra.contains_key("enrolled"));
    }

    #[test]
    fn test_parse_admin_login_response() {
        let json = r#"{"token":"t","admin":{"name":"Root"}}"#;
        let resp: AdminLoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.admin.name.as_deref(), Some("Root"));
    }

    #[test]
    fn test_login_request_body() {
        let body = serde_json::to_value(LoginRequest {
            username: "jdoe",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "jdoe", "password": "pw"}));
    }
}
