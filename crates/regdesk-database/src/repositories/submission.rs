//! Submission repository.

use sqlx::postgres::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::{PageRequest, PageResponse};
use regdesk_entity::submission::{
    CreateSubmission, Submission, SubmissionFilter, SubmissionStatus,
};

/// Repository for submission data access.
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Create a new submission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission. New records always start pending.
    pub async fn create(&self, data: &CreateSubmission) -> AppResult<Submission> {
        sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, filled_by, applicant_name, applicant_details, district, taluka)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.filled_by)
        .bind(&data.applicant_name)
        .bind(&data.applicant_details)
        .bind(&data.district)
        .bind(&data.taluka)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create submission", e))
    }

    /// Find a submission by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch submission", e)
            })
    }

    /// List submissions matching the filter, newest first, with the total
    /// count of all matches regardless of the page window.
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Submission>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${idx}"));
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
        if filter.user_id.is_some() {
            conditions.push(format!("user_id = ${idx}"));
            idx += 1;
        }
        if filter.filled_by.is_some() {
            conditions.push(format!("filled_by = ${idx}"));
            idx += 1;
        }
        if filter.submitted_from.is_some() {
            conditions.push(format!("submitted_at >= ${idx}"));
            idx += 1;
        }
        if filter.submitted_to.is_some() {
            conditions.push(format!("submitted_at <= ${idx}"));
            idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!("applicant_name ILIKE ${idx}"));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM submissions{where_clause}");
        let list_sql = format!(
            "SELECT * FROM submissions{where_clause} ORDER BY submitted_at DESC, id LIMIT ${idx} OFFSET ${}",
            idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut list_query = sqlx::query_as::<_, Submission>(&list_sql);

        if let Some(status) = &filter.status {
            count_query = count_query.bind(status);
            list_query = list_query.bind(status);
        }
        if let Some(district) = &filter.district {
            count_query = count_query.bind(district);
            list_query = list_query.bind(district);
        }
        if let Some(taluka) = &filter.taluka {
            count_query = count_query.bind(taluka);
            list_query = list_query.bind(taluka);
        }
        if let Some(user_id) = filter.user_id {
            count_query = count_query.bind(user_id);
            list_query = list_query.bind(user_id);
        }
        if let Some(filled_by) = filter.filled_by {
            count_query = count_query.bind(filled_by);
            list_query = list_query.bind(filled_by);
        }
        if let Some(from) = filter.submitted_from {
            count_query = count_query.bind(from);
            list_query = list_query.bind(from);
        }
        if let Some(to) = filter.submitted_to {
            count_query = count_query.bind(to);
            list_query = list_query.bind(to);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            list_query = list_query.bind(pattern);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count submissions", e)
        })?;

        let submissions = list_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list submissions", e)
            })?;

        Ok(PageResponse::new(submissions, page, total as u64))
    }

    /// Atomically move a pending submission to a new status.
    ///
    /// The status guard lives in the statement itself, so two concurrent
    /// reviewers cannot both win: the UPDATE matches only while the row is
    /// still pending. Returns `None` when no pending row matched, which the
    /// caller disambiguates into missing vs. already decided.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &SubmissionStatus,
        actor_id: Uuid,
    ) -> AppResult<Option<Submission>> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = $2, status_updated_by = $3, status_updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(actor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update submission status", e)
        })
    }
}
