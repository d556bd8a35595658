#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use rbac_admin::app::{AppState, build_router};
use rbac_admin::directory::Directory;
use rbac_admin::model::{Permission, PermissionId, Role, RoleId, User, UserId};
use rbac_admin::store::memory::InMemoryStore;
use rbac_admin::store::{RecordStore, ReferenceField, StoreError, StoreResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

pub type TestApp = axum::routing::RouterIntoService<Body, ()>;

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn app_with_store(store: Arc<dyn RecordStore>) -> TestApp {
    build_router(AppState::new(Directory::new(store))).into_service()
}

pub fn memory_app() -> TestApp {
    app_with_store(Arc::new(InMemoryStore::new()))
}

/// Record store that delegates to memory until `fail` is switched on, then
/// errors on every call.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unexpected(anyhow::anyhow!("store offline")));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn list_permissions(&self) -> StoreResult<Vec<Permission>> {
        self.check()?;
        self.inner.list_permissions().await
    }

    async fn find_permission_by_name(&self, name: &str) -> StoreResult<Option<Permission>> {
        self.check()?;
        self.inner.find_permission_by_name(name).await
    }

    async fn insert_permission(&self, permission: Permission) -> StoreResult<Permission> {
        self.check()?;
        self.inner.insert_permission(permission).await
    }

    async fn delete_permission(&self, id: PermissionId) -> StoreResult<()> {
        self.check()?;
        self.inner.delete_permission(id).await
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        self.check()?;
        self.inner.list_roles().await
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        self.check()?;
        self.inner.find_role_by_name(name).await
    }

    async fn get_role(&self, id: RoleId) -> StoreResult<Role> {
        self.check()?;
        self.inner.get_role(id).await
    }

    async fn insert_role(&self, role: Role) -> StoreResult<Role> {
        self.check()?;
        self.inner.insert_role(role).await
    }

    async fn update_role(&self, role: Role) -> StoreResult<Role> {
        self.check()?;
        self.inner.update_role(role).await
    }

    async fn delete_role(&self, id: RoleId) -> StoreResult<()> {
        self.check()?;
        self.inner.delete_role(id).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.check()?;
        self.inner.list_users().await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.check()?;
        self.inner.find_user_by_email(email).await
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.check()?;
        self.inner.get_user(id).await
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        self.check()?;
        self.inner.insert_user(user).await
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        self.check()?;
        self.inner.update_user(user).await
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.check()?;
        self.inner.delete_user(id).await
    }

    async fn is_referenced(&self, field: ReferenceField, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        self.inner.is_referenced(field, id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.check()
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}
