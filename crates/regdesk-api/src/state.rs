//! Shared application state threaded through every handler.

use std::sync::Arc;

use sqlx::postgres::PgPool;

use regdesk_auth::{JwtDecoder, JwtEncoder, PasswordHasher, RbacEnforcer};
use regdesk_core::config::AppConfig;
use regdesk_database::provisioning::Provisioner;
use regdesk_database::repositories::{AuditRepository, SubmissionRepository, UserRepository};
use regdesk_service::{AuthService, SubmissionService, UserService};

/// Application state: configuration, token machinery, and the services.
/// Cheap to clone; everything heavyweight is behind an `Arc` or a pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt_decoder: Arc<JwtDecoder>,
    pub rbac: Arc<RbacEnforcer>,
    pub provisioner: Arc<Provisioner>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub submission_service: Arc<SubmissionService>,
}

impl AppState {
    /// Wire up all services over the shared pool.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let users = UserRepository::new(pool.clone());
        let submissions = SubmissionRepository::new(pool.clone());
        let audit = AuditRepository::new(pool.clone());

        let encoder = JwtEncoder::new(&config.auth);
        let decoder = JwtDecoder::new(&config.auth);
        let hasher = PasswordHasher::new();

        let auth_service = AuthService::new(
            users.clone(),
            hasher,
            encoder,
            config.auth.password_min_length,
        );
        let user_service = UserService::new(users);
        let submission_service = SubmissionService::new(submissions, audit);
        let provisioner = Provisioner::new(pool, &config.database);

        Self {
            config: Arc::new(config),
            jwt_decoder: Arc::new(decoder),
            rbac: Arc::new(RbacEnforcer::new()),
            provisioner: Arc::new(provisioner),
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            submission_service: Arc::new(submission_service),
        }
    }
}
