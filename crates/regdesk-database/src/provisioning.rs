//! Schema self-provisioning and the storage health probe.
//!
//! Provisioning is idempotent and safe to run from multiple instances at
//! once: the whole pass runs under a session-level advisory lock, so
//! concurrent starters serialize and each object is created exactly once.
//! A single failed object is recorded and skipped rather than aborting the
//! pass, so one bad statement cannot leave the rest of the schema missing.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::{Connection, PgConnection};
use tracing::{error, info, warn};

use regdesk_core::config::DatabaseConfig;
use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;

use crate::schema::SchemaDescriptor;

/// Application-wide advisory lock key for schema provisioning.
const PROVISION_LOCK_KEY: i64 = 0x5245_4744_4553_4b31;

/// Overall storage health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Database is reachable and every expected table exists.
    Healthy,
    /// Database is reachable but parts of the schema are missing.
    Degraded,
    /// Database is unreachable or the probe timed out.
    Unhealthy,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Degraded => write!(f, "degraded"),
            HealthState::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Point-in-time storage health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall classification.
    pub status: HealthState,
    /// Expected tables not found in the database.
    pub missing_tables: Vec<String>,
    /// Total submission rows, when the submissions table exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_count: Option<i64>,
    /// Most recent submission time, when any submissions exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_submission_at: Option<DateTime<Utc>>,
    /// Probe error detail, when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single object that failed to provision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningError {
    /// The schema object, e.g. `"table submissions"`.
    pub object: String,
    /// The database error text.
    pub message: String,
}

/// Outcome of one provisioning pass. Counts cover objects actually
/// created by this pass, not pre-existing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisioningReport {
    pub types_created: u32,
    pub tables_created: u32,
    pub indexes_created: u32,
    pub functions_created: u32,
    pub triggers_created: u32,
    /// Objects that could not be created.
    pub errors: Vec<ProvisioningError>,
}

impl ProvisioningReport {
    /// Total objects created by this pass.
    pub fn objects_created(&self) -> u32 {
        self.types_created
            + self.tables_created
            + self.indexes_created
            + self.functions_created
            + self.triggers_created
    }

    /// Whether any object failed to provision.
    pub fn is_partial_failure(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Schema provisioning and health probing over a shared pool.
#[derive(Debug, Clone)]
pub struct Provisioner {
    pool: PgPool,
    descriptor: &'static SchemaDescriptor,
    probe_timeout: Duration,
    provision_timeout: Duration,
}

impl Provisioner {
    /// Creates a provisioner bound to the pool with the configured timeouts.
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            descriptor: SchemaDescriptor::expected(),
            probe_timeout: Duration::from_secs(config.probe_timeout_seconds),
            provision_timeout: Duration::from_secs(config.provision_timeout_seconds),
        }
    }

    /// Probes the database and classifies storage health.
    ///
    /// Never returns an error: an unreachable database is itself a valid
    /// answer (`Unhealthy`), and the liveness signals are best-effort.
    pub async fn health_status(&self) -> HealthReport {
        let probe = tokio::time::timeout(
            self.probe_timeout,
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool),
        )
        .await;

        match probe {
            Err(_) => {
                warn!("Database health probe timed out");
                return Self::unhealthy("connectivity probe timed out".to_string());
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Database health probe failed");
                return Self::unhealthy(e.to_string());
            }
            Ok(Ok(_)) => {}
        }

        let existing = self.existing_tables().await;
        let existing = match existing {
            Ok(tables) => tables,
            Err(e) => {
                warn!(error = %e, "Schema inspection failed during health probe");
                return Self::unhealthy(e.message);
            }
        };

        let missing_tables: Vec<String> = self
            .descriptor
            .table_names()
            .filter(|name| !existing.contains(*name))
            .map(str::to_string)
            .collect();

        let mut submission_count = None;
        let mut latest_submission_at = None;
        if existing.contains("submissions") {
            submission_count = self.submission_count().await;
            latest_submission_at = self.latest_submission_at().await;
        }

        let status = if missing_tables.is_empty() {
            HealthState::Healthy
        } else {
            HealthState::Degraded
        };

        HealthReport {
            status,
            missing_tables,
            submission_count,
            latest_submission_at,
            error: None,
        }
    }

    /// Runs a full idempotent provisioning pass, bounded by the configured
    /// timeout. Concurrent callers serialize on an advisory lock.
    pub async fn initialize(&self) -> AppResult<ProvisioningReport> {
        let report = tokio::time::timeout(self.provision_timeout, self.run_provisioning())
            .await
            .map_err(|_| {
                AppError::service_unavailable("Schema provisioning timed out")
            })??;

        if report.is_partial_failure() {
            for failure in &report.errors {
                error!(object = %failure.object, error = %failure.message, "Schema object failed to provision");
            }
        }
        info!(
            objects_created = report.objects_created(),
            errors = report.errors.len(),
            "Schema provisioning pass complete"
        );
        Ok(report)
    }

    async fn run_provisioning(&self) -> AppResult<ProvisioningReport> {
        // The advisory lock is session-scoped, so it needs a dedicated
        // connection. Detach it from the pool: if this future is dropped by
        // the timeout, the connection closes and the lock is released.
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ServiceUnavailable,
                    "Could not acquire a connection for provisioning",
                    e,
                )
            })?
            .detach();

        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(PROVISION_LOCK_KEY)
            .execute(&mut conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to take provisioning lock", e)
            })?;

        // Existence checks happen inside the lock, so the created counts
        // are exact even when several instances start at once.
        let mut report = ProvisioningReport::default();

        for spec in self.descriptor.types {
            let object = format!("type {}", spec.name);
            match Self::type_exists(&mut conn, spec.name).await {
                Ok(true) => {}
                Ok(false) => {
                    Self::apply(&mut conn, spec.create_sql, &object, &mut report.types_created, &mut report.errors)
                        .await;
                }
                Err(e) => report.errors.push(ProvisioningError { object, message: e }),
            }
        }

        for spec in self.descriptor.tables {
            let object = format!("table {}", spec.name);
            match Self::table_exists(&mut conn, spec.name).await {
                Ok(true) => {}
                Ok(false) => {
                    Self::apply(&mut conn, spec.create_sql, &object, &mut report.tables_created, &mut report.errors)
                        .await;
                }
                Err(e) => report.errors.push(ProvisioningError { object, message: e }),
            }
        }

        for spec in self.descriptor.indexes {
            let object = format!("index {}", spec.name);
            match Self::index_exists(&mut conn, spec.name).await {
                Ok(true) => {}
                Ok(false) => {
                    Self::apply(&mut conn, spec.create_sql, &object, &mut report.indexes_created, &mut report.errors)
                        .await;
                }
                Err(e) => report.errors.push(ProvisioningError { object, message: e }),
            }
        }

        for spec in self.descriptor.functions {
            let object = format!("function {}", spec.name);
            match Self::function_exists(&mut conn, spec.name).await {
                Ok(existed) => {
                    // CREATE OR REPLACE keeps an existing function current
                    // without counting it as newly created.
                    let mut created = 0;
                    Self::apply(&mut conn, spec.create_sql, &object, &mut created, &mut report.errors).await;
                    if !existed {
                        report.functions_created += created;
                    }
                }
                Err(e) => report.errors.push(ProvisioningError { object, message: e }),
            }
        }

        for spec in self.descriptor.triggers {
            let object = format!("trigger {}", spec.name);
            match Self::trigger_exists(&mut conn, spec.name, spec.table).await {
                Ok(existed) => {
                    let mut created = 0;
                    Self::apply(&mut conn, spec.create_sql, &object, &mut created, &mut report.errors).await;
                    if !existed {
                        report.triggers_created += created;
                    }
                }
                Err(e) => report.errors.push(ProvisioningError { object, message: e }),
            }
        }

        let _ = sqlx::query("SELECT pg_advisory_unlock($1)")
            .bind(PROVISION_LOCK_KEY)
            .execute(&mut conn)
            .await;
        let _ = conn.close().await;

        Ok(report)
    }

    async fn apply(
        conn: &mut PgConnection,
        sql: &str,
        object: &str,
        created: &mut u32,
        errors: &mut Vec<ProvisioningError>,
    ) {
        match sqlx::query(sql).execute(&mut *conn).await {
            Ok(_) => *created += 1,
            Err(e) => errors.push(ProvisioningError {
                object: object.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn type_exists(conn: &mut PgConnection, name: &str) -> Result<bool, String> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM pg_type WHERE typname = $1)")
            .bind(name)
            .fetch_one(conn)
            .await
            .map_err(|e| e.to_string())
    }

    async fn table_exists(conn: &mut PgConnection, name: &str) -> Result<bool, String> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name = $1)",
        )
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(|e| e.to_string())
    }

    async fn index_exists(conn: &mut PgConnection, name: &str) -> Result<bool, String> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM pg_indexes \
             WHERE schemaname = 'public' AND indexname = $1)",
        )
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(|e| e.to_string())
    }

    async fn function_exists(conn: &mut PgConnection, name: &str) -> Result<bool, String> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM pg_proc WHERE proname = $1)")
            .bind(name)
            .fetch_one(conn)
            .await
            .map_err(|e| e.to_string())
    }

    async fn trigger_exists(
        conn: &mut PgConnection,
        name: &str,
        table: &str,
    ) -> Result<bool, String> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM pg_trigger t \
             JOIN pg_class c ON c.oid = t.tgrelid \
             WHERE t.tgname = $1 AND c.relname = $2)",
        )
        .bind(name)
        .bind(table)
        .fetch_one(conn)
        .await
        .map_err(|e| e.to_string())
    }

    async fn existing_tables(&self) -> AppResult<HashSet<String>> {
        let rows = tokio::time::timeout(
            self.probe_timeout,
            sqlx::query_scalar::<_, String>(
                "SELECT table_name FROM information_schema.tables WHERE table_schema = 'public'",
            )
            .fetch_all(&self.pool),
        )
        .await
        .map_err(|_| AppError::service_unavailable("Schema inspection timed out"))?
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema inspection failed", e))?;

        Ok(rows.into_iter().collect())
    }

    // The liveness signals are best-effort; any failure or timeout simply
    // leaves them out of the report.
    async fn submission_count(&self) -> Option<i64> {
        tokio::time::timeout(
            self.probe_timeout,
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions").fetch_one(&self.pool),
        )
        .await
        .ok()
        .and_then(Result::ok)
    }

    async fn latest_submission_at(&self) -> Option<DateTime<Utc>> {
        tokio::time::timeout(
            self.probe_timeout,
            sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
                "SELECT MAX(submitted_at) FROM submissions",
            )
            .fetch_one(&self.pool),
        )
        .await
        .ok()
        .and_then(Result::ok)
        .flatten()
    }

    fn unhealthy(detail: String) -> HealthReport {
        HealthReport {
            status: HealthState::Unhealthy,
            missing_tables: Vec::new(),
            submission_count: None,
            latest_submission_at: None,
            error: Some(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthState::Degraded).unwrap(),
            "\"degraded\""
        );
        assert_eq!(HealthState::Unhealthy.to_string(), "unhealthy");
    }

    #[test]
    fn test_report_counts_and_partial_failure() {
        let mut report = ProvisioningReport::default();
        assert_eq!(report.objects_created(), 0);
        assert!(!report.is_partial_failure());

        report.tables_created = 5;
        report.types_created = 2;
        report.errors.push(ProvisioningError {
            object: "index users_role_idx".to_string(),
            message: "permission denied".to_string(),
        });
        assert_eq!(report.objects_created(), 7);
        assert!(report.is_partial_failure());
    }
}
