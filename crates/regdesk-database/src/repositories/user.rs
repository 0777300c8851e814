//! User repository.

use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::{PageRequest, PageResponse};
use regdesk_entity::user::{CreateUser, RoleCount, User, UserFilter, UserRole, UserStats};

/// Repository for user data access.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct RoleActivityCount {
    role: UserRole,
    active: bool,
    count: i64,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// Email and phone uniqueness is enforced among active accounts by
    /// partial unique indexes; violations surface as `Conflict`.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, phone, password_hash, role, district, taluka)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.password_hash)
        .bind(&data.role)
        .bind(&data.district)
        .bind(&data.taluka)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_create_error)
    }

    fn map_create_error(e: sqlx::Error) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            match db_err.constraint() {
                Some("users_email_active_key") => {
                    return AppError::conflict("An active account with this email already exists");
                }
                Some("users_phone_active_key") => {
                    return AppError::conflict("An active account with this phone already exists");
                }
                _ => {}
            }
        }
        AppError::with_source(ErrorKind::Database, "Failed to create user", e)
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user", e))
    }

    /// Find an active user by email, case-insensitively.
    pub async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND active",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user", e))
    }

    /// Find an active user by phone.
    pub async fn find_active_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1 AND active")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user", e))
    }

    /// List users matching the filter, newest first, with the total count
    /// of all matches regardless of the page window.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if filter.role.is_some() {
            conditions.push(format!("role = ${idx}"));
            idx += 1;
        }
        if filter.district.is_some() {
            conditions.push(format!("district = ${idx}"));
            idx += 1;
        }
        if filter.taluka.is_some() {
            conditions.push(format!("taluka = ${idx}"));
            idx += 1;
        }
        if filter.active.is_some() {
            conditions.push(format!("active = ${idx}"));
            idx += 1;
        }
        if filter.created_from.is_some() {
            conditions.push(format!("created_at >= ${idx}"));
            idx += 1;
        }
        if filter.created_to.is_some() {
            conditions.push(format!("created_at <= ${idx}"));
            idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(full_name ILIKE ${idx} OR email ILIKE ${idx} OR phone ILIKE ${idx})"
            ));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM users{where_clause}");
        let list_sql = format!(
            "SELECT * FROM users{where_clause} ORDER BY created_at DESC, id LIMIT ${idx} OFFSET ${}",
            idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut list_query = sqlx::query_as::<_, User>(&list_sql);

        if let Some(role) = &filter.role {
            count_query = count_query.bind(role);
            list_query = list_query.bind(role);
        }
        if let Some(district) = &filter.district {
            count_query = count_query.bind(district);
            list_query = list_query.bind(district);
        }
        if let Some(taluka) = &filter.taluka {
            count_query = count_query.bind(taluka);
            list_query = list_query.bind(taluka);
        }
        if let Some(active) = filter.active {
            count_query = count_query.bind(active);
            list_query = list_query.bind(active);
        }
        if let Some(from) = filter.created_from {
            count_query = count_query.bind(from);
            list_query = list_query.bind(from);
        }
        if let Some(to) = filter.created_to {
            count_query = count_query.bind(to);
            list_query = list_query.bind(to);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            list_query = list_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = list_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    /// Aggregate user counts: total, active/inactive split, and per-role
    /// counts, computed in a single grouped query.
    pub async fn stats(&self) -> AppResult<UserStats> {
        let rows = sqlx::query_as::<_, RoleActivityCount>(
            "SELECT role, active, COUNT(*) AS count FROM users GROUP BY role, active",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute user stats", e))?;

        let mut stats = UserStats {
            total: 0,
            active: 0,
            inactive: 0,
            by_role: Vec::new(),
        };
        for row in rows {
            let count = row.count as u64;
            stats.total += count;
            if row.active {
                stats.active += count;
            } else {
                stats.inactive += count;
            }
            match stats.by_role.iter_mut().find(|rc| rc.role == row.role) {
                Some(rc) => rc.count += count,
                None => stats.by_role.push(RoleCount {
                    role: row.role,
                    count,
                }),
            }
        }
        Ok(stats)
    }

    /// Change a user's role. Admin-only at the service layer.
    pub async fn update_role(&self, id: Uuid, role: &UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("User not found: {id}")))
    }
}
