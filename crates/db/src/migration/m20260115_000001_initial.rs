//! Initial database migration.
//!
//! Creates all enums, tables, and indexes for the platform.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS & AUTH
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(USER_SETTINGS_SQL).await?;
        db.execute_unprepared(SESSIONS_SQL).await?;
        db.execute_unprepared(OTP_CODES_SQL).await?;

        // ============================================================
        // PART 3: LEDGER & FUNDS
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(FUND_OPERATIONS_SQL).await?;
        db.execute_unprepared(TRANSFERS_SQL).await?;

        // ============================================================
        // PART 4: INVESTMENTS
        // ============================================================
        db.execute_unprepared(INVESTMENT_OPTIONS_SQL).await?;
        db.execute_unprepared(USER_INVESTMENTS_SQL).await?;

        // ============================================================
        // PART 5: SUPPORT
        // ============================================================
        db.execute_unprepared(SUPPORT_TICKETS_SQL).await?;
        db.execute_unprepared(TICKET_MESSAGES_SQL).await?;

        // ============================================================
        // PART 6: SITE CONTENT
        // ============================================================
        db.execute_unprepared(TEAM_MEMBERS_SQL).await?;
        db.execute_unprepared(TESTIMONIALS_SQL).await?;
        db.execute_unprepared(PROPERTIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Ledger transaction classification
CREATE TYPE transaction_kind AS ENUM (
    'deposit',
    'withdrawal',
    'investment',
    'transfer',
    'referral'
);

-- Settlement status (settlement is synchronous today; rows are written
-- as 'completed')
CREATE TYPE operation_status AS ENUM (
    'pending',
    'completed',
    'failed'
);

-- Fund operation direction
CREATE TYPE fund_direction AS ENUM (
    'deposit',
    'withdrawal'
);

-- Fund operation payment method
CREATE TYPE fund_method AS ENUM (
    'bank',
    'crypto',
    'card'
);

-- Investment position lifecycle
CREATE TYPE investment_status AS ENUM (
    'active',
    'completed'
);

-- Support ticket status
CREATE TYPE ticket_status AS ENUM (
    'open',
    'pending',
    'closed'
);

-- Support ticket priority
CREATE TYPE ticket_priority AS ENUM (
    'low',
    'medium',
    'high'
);

-- Ticket message author type
CREATE TYPE sender_type AS ENUM (
    'user',
    'support'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    phone VARCHAR(30),
    referral_code VARCHAR(16) NOT NULL UNIQUE,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    email_verified_at TIMESTAMPTZ,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- The ledger must never drive a balance negative; the conditional
    -- decrement enforces this in application SQL, this constraint is the
    -- backstop.
    CONSTRAINT chk_balance_non_negative CHECK (balance >= 0)
);

CREATE INDEX idx_users_email ON users(email);
";

const USER_SETTINGS_SQL: &str = r"
CREATE TABLE user_settings (
    user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    email_notifications BOOLEAN NOT NULL DEFAULT TRUE,
    push_notifications BOOLEAN NOT NULL DEFAULT TRUE,
    marketing_emails BOOLEAN NOT NULL DEFAULT FALSE,
    login_alerts BOOLEAN NOT NULL DEFAULT TRUE,
    session_timeout INTEGER NOT NULL DEFAULT 30,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SESSIONS_SQL: &str = r"
-- Sessions table for refresh token management
CREATE TABLE sessions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    refresh_token_hash VARCHAR(64) NOT NULL,
    device VARCHAR(20) NOT NULL DEFAULT 'Unknown',
    browser VARCHAR(20) NOT NULL DEFAULT 'Unknown',
    ip_address VARCHAR(45),
    expires_at TIMESTAMPTZ NOT NULL,
    revoked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expires_future CHECK (expires_at > created_at)
);

-- Index for token lookup (most common operation)
CREATE INDEX idx_sessions_token_hash ON sessions(refresh_token_hash) WHERE revoked_at IS NULL;

-- Index for user's active sessions
CREATE INDEX idx_sessions_user ON sessions(user_id, created_at DESC) WHERE revoked_at IS NULL;

-- Index for cleanup of expired sessions
CREATE INDEX idx_sessions_expires ON sessions(expires_at) WHERE revoked_at IS NULL;
";

const OTP_CODES_SQL: &str = r"
CREATE TABLE otp_codes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL,
    -- SHA-256 hex digest of the 6-digit code; plaintext is never stored
    code_hash CHAR(64) NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL,
    attempts INTEGER NOT NULL DEFAULT 0,
    consumed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Lookup of the live code for an email
CREATE INDEX idx_otp_codes_email ON otp_codes(email) WHERE consumed_at IS NULL;
";

const TRANSACTIONS_SQL: &str = r"
-- The ledger: one immutable row per balance-affecting event.
-- amount is signed: credits positive, debits negative.
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind transaction_kind NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    status operation_status NOT NULL DEFAULT 'completed',
    description TEXT NOT NULL,
    reference UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- History queries: a user's entries, newest first, optionally by kind
CREATE INDEX idx_transactions_user ON transactions(user_id, created_at DESC);
CREATE INDEX idx_transactions_user_kind ON transactions(user_id, kind, created_at DESC);
";

const FUND_OPERATIONS_SQL: &str = r"
CREATE TABLE fund_operations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    direction fund_direction NOT NULL,
    method fund_method NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    status operation_status NOT NULL DEFAULT 'completed',
    details JSONB NOT NULL DEFAULT '{}',
    idempotency_key VARCHAR(64),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    completed_at TIMESTAMPTZ,
    CONSTRAINT chk_fund_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_fund_operations_user ON fund_operations(user_id, created_at DESC);

-- Client retries with the same idempotency key must map to one operation
CREATE UNIQUE INDEX idx_fund_operations_idem
    ON fund_operations(user_id, idempotency_key)
    WHERE idempotency_key IS NOT NULL;
";

const TRANSFERS_SQL: &str = r"
CREATE TABLE transfers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sender_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    recipient_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount NUMERIC(19, 4) NOT NULL,
    note VARCHAR(500),
    status operation_status NOT NULL DEFAULT 'completed',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    completed_at TIMESTAMPTZ,
    CONSTRAINT chk_transfer_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_transfer_not_self CHECK (sender_id <> recipient_id)
);

CREATE INDEX idx_transfers_sender ON transfers(sender_id, created_at DESC);
CREATE INDEX idx_transfers_recipient ON transfers(recipient_id, created_at DESC);
";

const INVESTMENT_OPTIONS_SQL: &str = r"
CREATE TABLE investment_options (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    image VARCHAR(500) NOT NULL,
    min_investment NUMERIC(19, 4) NOT NULL,
    description TEXT NOT NULL,
    link VARCHAR(500),
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_investment_options_active ON investment_options(sort_order) WHERE is_active;
";

const USER_INVESTMENTS_SQL: &str = r"
CREATE TABLE user_investments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    investment_option_id UUID NOT NULL REFERENCES investment_options(id),
    amount NUMERIC(19, 4) NOT NULL,
    status investment_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_investment_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_user_investments_user ON user_investments(user_id, created_at DESC);
";

const SUPPORT_TICKETS_SQL: &str = r"
CREATE TABLE support_tickets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    subject VARCHAR(200) NOT NULL,
    category VARCHAR(50) NOT NULL,
    priority ticket_priority NOT NULL DEFAULT 'medium',
    status ticket_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_support_tickets_user ON support_tickets(user_id, updated_at DESC);
";

const TICKET_MESSAGES_SQL: &str = r"
CREATE TABLE ticket_messages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    ticket_id UUID NOT NULL REFERENCES support_tickets(id) ON DELETE CASCADE,
    sender_id UUID NOT NULL,
    sender_type sender_type NOT NULL DEFAULT 'user',
    body TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ticket_messages_ticket ON ticket_messages(ticket_id, created_at);
";

const TEAM_MEMBERS_SQL: &str = r"
CREATE TABLE team_members (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL,
    role VARCHAR(100) NOT NULL,
    image VARCHAR(500) NOT NULL,
    instagram VARCHAR(500),
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TESTIMONIALS_SQL: &str = r"
CREATE TABLE testimonials (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL,
    designation VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    image VARCHAR(500) NOT NULL,
    star INTEGER NOT NULL DEFAULT 5 CHECK (star BETWEEN 1 AND 5),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    location VARCHAR(200) NOT NULL,
    property_type VARCHAR(50) NOT NULL,
    price NUMERIC(19, 4) NOT NULL,
    image VARCHAR(500) NOT NULL,
    description TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_featured BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_properties_active ON properties(created_at DESC) WHERE is_active;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS properties CASCADE;
DROP TABLE IF EXISTS testimonials CASCADE;
DROP TABLE IF EXISTS team_members CASCADE;
DROP TABLE IF EXISTS ticket_messages CASCADE;
DROP TABLE IF EXISTS support_tickets CASCADE;
DROP TABLE IF EXISTS user_investments CASCADE;
DROP TABLE IF EXISTS investment_options CASCADE;
DROP TABLE IF EXISTS transfers CASCADE;
DROP TABLE IF EXISTS fund_operations CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS otp_codes CASCADE;
DROP TABLE IF EXISTS sessions CASCADE;
DROP TABLE IF EXISTS user_settings CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS sender_type;
DROP TYPE IF EXISTS ticket_priority;
DROP TYPE IF EXISTS ticket_status;
DROP TYPE IF EXISTS investment_status;
DROP TYPE IF EXISTS fund_method;
DROP TYPE IF EXISTS fund_direction;
DROP TYPE IF EXISTS operation_status;
DROP TYPE IF EXISTS transaction_kind;
";
