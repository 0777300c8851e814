//! Submission creation, listing, and the atomic status transition.

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::types::{PageRequest, PageResponse};
use regdesk_database::repositories::{AuditRepository, SubmissionRepository};
use regdesk_entity::audit::{AuditLogEntry, CreateAuditLogEntry};
use regdesk_entity::submission::{
    CreateSubmission, Submission, SubmissionFilter, SubmissionStatus,
};

use crate::context::RequestContext;

/// Submission workflow service.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    submissions: SubmissionRepository,
    audit: AuditRepository,
}

impl SubmissionService {
    /// Create a new submission service.
    pub fn new(submissions: SubmissionRepository, audit: AuditRepository) -> Self {
        Self { submissions, audit }
    }

    /// Record a new registration submission on behalf of the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateSubmission,
    ) -> AppResult<Submission> {
        if data.applicant_name.trim().is_empty() {
            return Err(AppError::validation("Applicant name is required"));
        }
        // The recording user is always the caller, whatever the payload says.
        data.filled_by = ctx.user_id;

        let submission = self.submissions.create(&data).await?;
        info!(
            submission_id = %submission.id,
            filled_by = %ctx.user_id,
            "Submission recorded"
        );
        Ok(submission)
    }

    /// Fetch a single submission.
    pub async fn get(&self, id: Uuid) -> AppResult<Submission> {
        self.submissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Submission not found: {id}")))
    }

    /// List submissions matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Submission>> {
        self.submissions.list(filter, page).await
    }

    /// Audit entries recorded against a submission, newest first.
    ///
    /// An unknown id is `NotFound`, not an empty trail.
    pub async fn audit_trail(&self, id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        self.get(id).await?;
        self.audit.find_by_entity("submission", id).await
    }

    /// Decide a pending submission.
    ///
    /// Only a pending record can change status; approved and rejected are
    /// terminal. The write is a single guarded statement, so of two
    /// concurrent reviewers exactly one wins and the other gets `Conflict`.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_status: SubmissionStatus,
    ) -> AppResult<Submission> {
        let updated = self
            .submissions
            .update_status(id, &new_status, ctx.user_id)
            .await?;

        let submission = match updated {
            Some(submission) => submission,
            // No pending row matched: either the record does not exist or
            // it has already been decided. A follow-up read tells which.
            None => match self.submissions.find_by_id(id).await? {
                None => {
                    return Err(AppError::not_found(format!("Submission not found: {id}")));
                }
                Some(existing) => {
                    return Err(AppError::conflict(format!(
                        "Submission is already {}; decided records cannot change status",
                        existing.status
                    )));
                }
            },
        };

        info!(
            submission_id = %submission.id,
            status = %submission.status,
            actor_id = %ctx.user_id,
            "Submission status updated"
        );

        // The decision itself already committed; a failed audit write is
        // logged, not surfaced to the reviewer.
        let audit_result = self
            .audit
            .record(&CreateAuditLogEntry {
                actor_id: ctx.user_id,
                action: "submission.status_update".to_string(),
                entity: "submission".to_string(),
                entity_id: submission.id,
                detail: json!({
                    "status": submission.status,
                    "actor_role": ctx.role,
                }),
            })
            .await;
        if let Err(e) = audit_result {
            warn!(submission_id = %submission.id, error = %e, "Audit write failed");
        }

        Ok(submission)
    }
}
