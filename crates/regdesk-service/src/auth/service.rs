//! Credential authentication and self-registration.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use regdesk_auth::{JwtEncoder, PasswordHasher};
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_database::repositories::UserRepository;
use regdesk_entity::user::{CreateUser, User, UserRole};

/// The single message returned for every credential failure. Which part of
/// the credential pair was wrong is never disclosed.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Which identifier a login attempt carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    Email,
    Phone,
}

impl FromStr for LoginType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(AppError::validation(format!(
                "Invalid login type: '{s}'. Expected 'email' or 'phone'"
            ))),
        }
    }
}

/// An established session: the authenticated user plus a signed token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The authenticated user. The password hash is never serialized.
    pub user: User,
    /// Signed session token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Input for self-registration.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub district: Option<String>,
    pub taluka: Option<String>,
}

/// Authentication service: login, registration, and session introspection.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    password_min_length: usize,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(
        users: UserRepository,
        hasher: PasswordHasher,
        encoder: JwtEncoder,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            password_min_length,
        }
    }

    /// Authenticate a credential pair and mint a session token.
    ///
    /// Lookup is restricted to active accounts. Unknown identifier and
    /// wrong password produce the same error; the unknown path still runs
    /// one hash verification so the two are not distinguishable by timing.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
        login_type: LoginType,
    ) -> AppResult<AuthSession> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Login and password are required"));
        }

        let user = match login_type {
            LoginType::Email => self.users.find_active_by_email(login).await?,
            LoginType::Phone => self.users.find_active_by_phone(login).await?,
        };

        let user = match user {
            Some(user) => user,
            None => {
                self.hasher.verify_dummy(password);
                warn!(login_type = ?login_type, "Login attempt for unknown identifier");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let session = self.encoder.generate_token(user.id, user.role)?;
        info!(user_id = %user.id, role = %user.role, "User authenticated");

        Ok(AuthSession {
            user,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Register a new account and establish its first session.
    ///
    /// Self-registration always produces a volunteer; elevated roles are
    /// only granted by an admin afterwards. Duplicate email/phone among
    /// active accounts surfaces as `Conflict` from the insert.
    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        self.validate_registration(&registration)?;

        let password_hash = self.hasher.hash_password(&registration.password)?;
        let user = self
            .users
            .create(&CreateUser {
                full_name: registration.full_name.trim().to_string(),
                email: registration.email.trim().to_lowercase(),
                phone: registration.phone.trim().to_string(),
                password_hash,
                role: UserRole::Volunteer,
                district: registration.district,
                taluka: registration.taluka,
            })
            .await?;

        let session = self.encoder.generate_token(user.id, user.role)?;
        info!(user_id = %user.id, "New user registered");

        Ok(AuthSession {
            user,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Resolve the account behind a verified token.
    ///
    /// A token may outlive its account; a missing or deactivated account
    /// invalidates the session rather than reporting a plain not-found.
    pub async fn current_user(&self, user_id: Uuid) -> AppResult<User> {
        match self.users.find_by_id(user_id).await? {
            Some(user) if user.active => Ok(user),
            _ => Err(AppError::unauthorized("Account is no longer active")),
        }
    }

    fn validate_registration(&self, registration: &Registration) -> AppResult<()> {
        if registration.full_name.trim().is_empty() {
            return Err(AppError::validation("Full name is required"));
        }
        let email = registration.email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Email address is not valid"));
        }
        if registration.phone.trim().is_empty() {
            return Err(AppError::validation("Phone number is required"));
        }
        if registration.password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}
