//! Static description of the expected database schema.
//!
//! Provisioning walks this descriptor object by object; the health probe
//! compares its table list against `information_schema`. All DDL is
//! idempotent under the provisioning advisory lock.

/// An enum type the schema depends on.
#[derive(Debug, Clone, Copy)]
pub struct TypeSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
}

/// A table and its creation DDL.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
}

/// An index and its creation DDL.
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
}

/// A stored function and its creation DDL.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
}

/// A trigger, the table it fires on, and its creation DDL.
#[derive(Debug, Clone, Copy)]
pub struct TriggerSpec {
    pub name: &'static str,
    pub table: &'static str,
    pub create_sql: &'static str,
}

/// The complete expected schema, in dependency order.
#[derive(Debug, Clone, Copy)]
pub struct SchemaDescriptor {
    pub types: &'static [TypeSpec],
    pub tables: &'static [TableSpec],
    pub indexes: &'static [IndexSpec],
    pub functions: &'static [FunctionSpec],
    pub triggers: &'static [TriggerSpec],
}

impl SchemaDescriptor {
    /// The schema every deployment is expected to carry.
    pub fn expected() -> &'static Self {
        &EXPECTED
    }

    /// Names of all expected tables.
    pub fn table_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.iter().map(|t| t.name)
    }
}

static EXPECTED: SchemaDescriptor = SchemaDescriptor {
    types: &[
        TypeSpec {
            name: "user_role",
            create_sql: "CREATE TYPE user_role AS ENUM ('volunteer', 'supervisor', 'team', 'admin')",
        },
        TypeSpec {
            name: "submission_status",
            create_sql: "CREATE TYPE submission_status AS ENUM ('pending', 'approved', 'rejected')",
        },
    ],
    tables: &[
        TableSpec {
            name: "users",
            create_sql: r#"
                CREATE TABLE IF NOT EXISTS users (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    full_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    password_hash TEXT NOT NULL,
                    role user_role NOT NULL DEFAULT 'volunteer',
                    district TEXT,
                    taluka TEXT,
                    active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
        },
        TableSpec {
            name: "submissions",
            create_sql: r#"
                CREATE TABLE IF NOT EXISTS submissions (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL REFERENCES users(id),
                    filled_by UUID NOT NULL REFERENCES users(id),
                    status submission_status NOT NULL DEFAULT 'pending',
                    applicant_name TEXT NOT NULL,
                    applicant_details JSONB NOT NULL DEFAULT '{}'::jsonb,
                    district TEXT,
                    taluka TEXT,
                    submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    status_updated_at TIMESTAMPTZ,
                    status_updated_by UUID REFERENCES users(id)
                )
            "#,
        },
        TableSpec {
            name: "file_attachments",
            create_sql: r#"
                CREATE TABLE IF NOT EXISTS file_attachments (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    submission_id UUID NOT NULL REFERENCES submissions(id) ON DELETE CASCADE,
                    file_name TEXT NOT NULL,
                    content_type TEXT NOT NULL,
                    size_bytes BIGINT NOT NULL,
                    storage_path TEXT NOT NULL,
                    uploaded_by UUID NOT NULL REFERENCES users(id),
                    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
        },
        TableSpec {
            name: "statistics",
            create_sql: r#"
                CREATE TABLE IF NOT EXISTS statistics (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    metric TEXT NOT NULL UNIQUE,
                    value BIGINT NOT NULL DEFAULT 0,
                    computed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
        },
        TableSpec {
            name: "audit_logs",
            create_sql: r#"
                CREATE TABLE IF NOT EXISTS audit_logs (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    actor_id UUID NOT NULL REFERENCES users(id),
                    action TEXT NOT NULL,
                    entity TEXT NOT NULL,
                    entity_id UUID NOT NULL,
                    detail JSONB NOT NULL DEFAULT '{}'::jsonb,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
        },
    ],
    indexes: &[
        // Uniqueness is scoped to active accounts: a deactivated user's
        // email/phone may be reused by a new registration.
        IndexSpec {
            name: "users_email_active_key",
            create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS users_email_active_key ON users (LOWER(email)) WHERE active",
        },
        IndexSpec {
            name: "users_phone_active_key",
            create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS users_phone_active_key ON users (phone) WHERE active",
        },
        IndexSpec {
            name: "users_role_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS users_role_idx ON users (role)",
        },
        IndexSpec {
            name: "users_district_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS users_district_idx ON users (district)",
        },
        IndexSpec {
            name: "submissions_status_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS submissions_status_idx ON submissions (status)",
        },
        IndexSpec {
            name: "submissions_user_id_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS submissions_user_id_idx ON submissions (user_id)",
        },
        IndexSpec {
            name: "submissions_submitted_at_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS submissions_submitted_at_idx ON submissions (submitted_at DESC)",
        },
        IndexSpec {
            name: "audit_logs_entity_idx",
            create_sql: "CREATE INDEX IF NOT EXISTS audit_logs_entity_idx ON audit_logs (entity, entity_id)",
        },
    ],
    functions: &[FunctionSpec {
        name: "touch_updated_at",
        create_sql: r#"
            CREATE OR REPLACE FUNCTION touch_updated_at()
            RETURNS TRIGGER AS $$
            BEGIN
                NEW.updated_at = NOW();
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
        "#,
    }],
    triggers: &[TriggerSpec {
        name: "users_touch_updated_at",
        table: "users",
        create_sql: r#"
            CREATE OR REPLACE TRIGGER users_touch_updated_at
            BEFORE UPDATE ON users
            FOR EACH ROW
            EXECUTE FUNCTION touch_updated_at()
        "#,
    }],
};
