//! Postgres-backed implementation of the record store.
//!
//! # What this module is
//! Implements [`RecordStore`] on Postgres (via `sqlx`) as the durable backing
//! store for the directory collections (`permissions`, `roles`, `users`).
//!
//! # Data model
//! Each collection is one table keyed by a UUID `id`. Reference sets
//! (`roles.permissions`, `users.roles`) are `UUID[]` columns on the owning row,
//! the same shape a document store would embed. Listings are ordered by the
//! `seq` column, i.e. insertion order.
//!
//! # Key invariants
//! - The schema has no foreign keys and no unique constraints on name/email.
//!   Both rules belong to the directory core, which enforces them with
//!   read-then-write checks.
//! - Every method is a single statement; nothing here opens a transaction.
//!
//! # Security model / threat assumptions
//! - Database URLs may contain credentials; avoid logging them.
//! - All SQL is static and parameterized.
//!
//! # Concurrency model
//! The store is shared across async handlers; `sqlx::PgPool` manages
//! concurrency and pool sizing controls throughput.
//!
//! # Operational notes
//! Migrations are executed at startup via `sqlx::migrate!("./migrations")` so
//! handlers can assume the schema exists. Pool acquisition is bounded so a
//! stalled database fails requests instead of hanging them.
use super::{RecordStore, ReferenceField, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::{Permission, PermissionId, Role, RoleId, User, UserId, UserStatus};
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Durable record store backed by Postgres.
///
/// # Errors
/// Connection and query failures surface as [`StoreError::Unexpected`]; an
/// id collision on insert surfaces as [`StoreError::Conflict`].
///
/// # Example
/// ```rust,no_run
/// use rbac_admin::config::PostgresConfig;
/// use rbac_admin::store::postgres::PostgresStore;
///
/// async fn open(pg: PostgresConfig) {
///     let _ = PostgresStore::connect(&pg).await;
/// }
/// ```
pub struct PostgresStore {
    pool: PgPool,
}

/// Row shape for the `permissions` table.
///
/// DB-facing rows are kept separate from the domain records so schema details
/// stay local to this module.
#[derive(Debug, Clone, FromRow)]
struct DbPermission {
    id: Uuid,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
struct DbRole {
    id: Uuid,
    name: String,
    permissions: Vec<Uuid>,
}

#[derive(Debug, Clone, FromRow)]
struct DbUser {
    id: Uuid,
    name: String,
    email: String,
    roles: Vec<Uuid>,
    status: String,
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Permissions,
    Roles,
    Users,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(anyhow::Error::new(err))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unexpected(anyhow::Error::new(err))
    }
}

impl PostgresStore {
    /// Connect to Postgres and apply the embedded migrations.
    ///
    /// # Errors
    /// - Invalid URL, connection, pool setup, or migration failures.
    pub async fn connect(pg: &PostgresConfig) -> StoreResult<Self> {
        let store = Self::connect_without_migrations(pg).await?;
        // Fail startup rather than serve against a partial schema.
        sqlx::migrate!("./migrations").run(&store.pool).await?;
        Ok(store)
    }

    /// Connect without running migrations, for callers that manage the schema.
    pub async fn connect_without_migrations(pg: &PostgresConfig) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(&pg.url)?;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options)
            .await?;
        Ok(Self { pool })
    }

    /// Refresh the `rbac_admin_records` gauge. Runs after a committed write, so
    /// a failed count is logged and never reported as a failed write.
    async fn refresh_count(&self, collection: Collection) {
        let (name, query) = match collection {
            Collection::Permissions => ("permissions", "SELECT COUNT(*) FROM permissions"),
            Collection::Roles => ("roles", "SELECT COUNT(*) FROM roles"),
            Collection::Users => ("users", "SELECT COUNT(*) FROM users"),
        };
        match sqlx::query_scalar::<_, i64>(query)
            .fetch_one(&self.pool)
            .await
        {
            Ok(total) => {
                metrics::gauge!("rbac_admin_records", "collection" => name).set(total as f64);
            }
            Err(err) => {
                tracing::warn!(collection = name, error = %err, "record count refresh failed");
            }
        }
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    // -----------------------------
    // Permissions
    // -----------------------------

    async fn list_permissions(&self) -> StoreResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, DbPermission>(
            "SELECT id, name, description FROM permissions ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(permission_from_db).collect())
    }

    async fn find_permission_by_name(&self, name: &str) -> StoreResult<Option<Permission>> {
        let row = sqlx::query_as::<_, DbPermission>(
            "SELECT id, name, description FROM permissions WHERE name = $1 ORDER BY seq LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(permission_from_db))
    }

    async fn insert_permission(&self, permission: Permission) -> StoreResult<Permission> {
        let insert =
            sqlx::query("INSERT INTO permissions (id, name, description) VALUES ($1, $2, $3)")
                .bind(permission.id.0)
                .bind(&permission.name)
                .bind(&permission.description)
                .execute(&self.pool)
                .await;
        match insert {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Conflict("permission id exists".into()));
            }
            Err(err) => return Err(err.into()),
        }
        self.refresh_count(Collection::Permissions).await;
        Ok(permission)
    }

    async fn delete_permission(&self, id: PermissionId) -> StoreResult<()> {
        let removed = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(StoreError::NotFound("permission".into()));
        }
        self.refresh_count(Collection::Permissions).await;
        Ok(())
    }

    // -----------------------------
    // Roles
    // -----------------------------

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        let rows =
            sqlx::query_as::<_, DbRole>("SELECT id, name, permissions FROM roles ORDER BY seq")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(role_from_db).collect())
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let row = sqlx::query_as::<_, DbRole>(
            "SELECT id, name, permissions FROM roles WHERE name = $1 ORDER BY seq LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(role_from_db))
    }

    async fn get_role(&self, id: RoleId) -> StoreResult<Role> {
        let row =
            sqlx::query_as::<_, DbRole>("SELECT id, name, permissions FROM roles WHERE id = $1")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;
        row.map(role_from_db)
            .ok_or_else(|| StoreError::NotFound("role".into()))
    }

    async fn insert_role(&self, role: Role) -> StoreResult<Role> {
        let insert = sqlx::query("INSERT INTO roles (id, name, permissions) VALUES ($1, $2, $3)")
            .bind(role.id.0)
            .bind(&role.name)
            .bind(permission_uuids(&role.permissions))
            .execute(&self.pool)
            .await;
        match insert {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Conflict("role id exists".into()));
            }
            Err(err) => return Err(err.into()),
        }
        self.refresh_count(Collection::Roles).await;
        Ok(role)
    }

    async fn update_role(&self, role: Role) -> StoreResult<Role> {
        let updated = sqlx::query(
            "UPDATE roles SET name = $1, permissions = $2, updated_at = now() WHERE id = $3",
        )
        .bind(&role.name)
        .bind(permission_uuids(&role.permissions))
        .bind(role.id.0)
        .execute(&self.pool)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound("role".into()));
        }
        Ok(role)
    }

    async fn delete_role(&self, id: RoleId) -> StoreResult<()> {
        let removed = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(StoreError::NotFound("role".into()));
        }
        self.refresh_count(Collection::Roles).await;
        Ok(())
    }

    // -----------------------------
    // Users
    // -----------------------------

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, DbUser>(
            "SELECT id, name, email, roles, status FROM users ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(user_from_db).collect()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, DbUser>(
            "SELECT id, name, email, roles, status FROM users WHERE email = $1 ORDER BY seq LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(user_from_db).transpose()
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(
            "SELECT id, name, email, roles, status FROM users WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => user_from_db(row),
            None => Err(StoreError::NotFound("user".into())),
        }
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let insert = sqlx::query(
            "INSERT INTO users (id, name, email, roles, status) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(&user.email)
        .bind(role_uuids(&user.roles))
        .bind(user.status.as_str())
        .execute(&self.pool)
        .await;
        match insert {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Conflict("user id exists".into()));
            }
            Err(err) => return Err(err.into()),
        }
        self.refresh_count(Collection::Users).await;
        Ok(user)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let updated = sqlx::query(
            "UPDATE users SET name = $1, email = $2, roles = $3, status = $4, updated_at = now() WHERE id = $5",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(role_uuids(&user.roles))
        .bind(user.status.as_str())
        .bind(user.id.0)
        .execute(&self.pool)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound("user".into()));
        }
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let removed = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(StoreError::NotFound("user".into()));
        }
        self.refresh_count(Collection::Users).await;
        Ok(())
    }

    async fn is_referenced(&self, field: ReferenceField, id: Uuid) -> StoreResult<bool> {
        let query = match field {
            ReferenceField::RolePermissions => {
                "SELECT EXISTS(SELECT 1 FROM roles WHERE permissions @> ARRAY[$1]::uuid[])"
            }
            ReferenceField::UserRoles => {
                "SELECT EXISTS(SELECT 1 FROM users WHERE roles @> ARRAY[$1]::uuid[])"
            }
        };
        let exists: bool = sqlx::query_scalar(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|code| code == "23505").unwrap_or(false);
    }
    false
}

fn permission_uuids(ids: &[PermissionId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.0).collect()
}

fn role_uuids(ids: &[RoleId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.0).collect()
}

fn permission_from_db(row: DbPermission) -> Permission {
    Permission {
        id: PermissionId(row.id),
        name: row.name,
        description: row.description,
    }
}

fn role_from_db(row: DbRole) -> Role {
    Role {
        id: RoleId(row.id),
        name: row.name,
        permissions: row.permissions.into_iter().map(PermissionId).collect(),
    }
}

fn user_from_db(row: DbUser) -> StoreResult<User> {
    let status = UserStatus::from_str(&row.status)
        .map_err(|err| StoreError::Unexpected(anyhow!("users.status: {err}")))?;
    Ok(User {
        id: UserId(row.id),
        name: row.name,
        email: row.email,
        roles: row.roles.into_iter().map(RoleId).collect(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rows_with_unknown_status_are_rejected() {
        let row = DbUser {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            roles: Vec::new(),
            status: "Suspended".to_string(),
        };
        let err = user_from_db(row).unwrap_err();
        assert!(err.to_string().contains("users.status"));
    }

    #[test]
    fn role_rows_map_reference_sets() {
        let permission = Uuid::new_v4();
        let role = role_from_db(DbRole {
            id: Uuid::new_v4(),
            name: "viewer".to_string(),
            permissions: vec![permission],
        });
        assert_eq!(role.permissions, vec![PermissionId(permission)]);
    }

    #[tokio::test]
    async fn count_refresh_failure_is_not_an_error() {
        let options = PgConnectOptions::from_str("postgres://postgres@127.0.0.1:1/postgres")
            .expect("options");
        let store = PostgresStore {
            pool: PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_millis(200))
                .connect_lazy_with(options),
        };
        tokio::time::timeout(
            Duration::from_secs(5),
            store.refresh_count(Collection::Roles),
        )
        .await
        .expect("refresh returns once the count query fails");
    }

    #[tokio::test]
    async fn connect_reports_invalid_url() {
        let pg = PostgresConfig {
            url: "not a url".to_string(),
            max_connections: 1,
            acquire_timeout_ms: 100,
        };
        assert!(PostgresStore::connect_without_migrations(&pg).await.is_err());
    }
}
