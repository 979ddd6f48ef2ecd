//! OTP repository for email verification codes.
//!
//! The code policy (TTL, attempt limit, comparison order) lives in
//! `aurum_core::otp`; this repository handles issuance, lookup, attempt
//! counting, and consumption. Codes are stored as SHA-256 digests;
//! verification hashes the submission and compares digests.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use aurum_core::otp::{self, OtpError};

use crate::entities::otp_codes;

/// Error types for OTP operations.
#[derive(Debug, thiserror::Error)]
pub enum OtpRepoError {
    /// No live code exists for this email.
    #[error("No verification code found, request a new one")]
    NoCode,

    /// The code failed the policy check.
    #[error(transparent)]
    Rejected(#[from] OtpError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Hex SHA-256 digest of a code, the only form that touches the table.
fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

/// OTP repository for issuing and verifying codes.
#[derive(Debug, Clone)]
pub struct OtpRepository {
    db: DatabaseConnection,
}

impl OtpRepository {
    /// Creates a new OTP repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues a fresh code for an email, superseding any live one.
    ///
    /// Prior unconsumed codes are consumed so only the newest code can
    /// verify.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn issue(&self, email: &str) -> Result<String, DbErr> {
        let now = Utc::now();

        otp_codes::Entity::update_many()
            .col_expr(
                otp_codes::Column::ConsumedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await?;

        let code = otp::generate_code();

        otp_codes::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            code_hash: Set(hash_code(&code)),
            expires_at: Set(otp::expires_at(now).into()),
            attempts: Set(0),
            consumed_at: Set(None),
            created_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(code)
    }

    /// Verifies a submitted code against the live code for an email.
    ///
    /// A mismatch increments the attempt counter; success consumes the code.
    ///
    /// # Errors
    ///
    /// Returns [`OtpRepoError::NoCode`] when no live code exists,
    /// [`OtpRepoError::Rejected`] when the policy check fails, or
    /// [`OtpRepoError::Database`] on database failure.
    pub async fn verify(&self, email: &str, submitted: &str) -> Result<(), OtpRepoError> {
        let now = Utc::now();

        let stored = otp_codes::Entity::find()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await?
            .ok_or(OtpRepoError::NoCode)?;

        let check = otp::verify_code(
            &stored.code_hash,
            &hash_code(submitted),
            stored.expires_at.with_timezone(&Utc),
            stored.attempts,
            now,
        );

        match check {
            Ok(()) => {
                otp_codes::ActiveModel {
                    id: Set(stored.id),
                    consumed_at: Set(Some(now.into())),
                    ..Default::default()
                }
                .update(&self.db)
                .await?;
                Ok(())
            }
            Err(err) => {
                if err == OtpError::Mismatch {
                    otp_codes::ActiveModel {
                        id: Set(stored.id),
                        attempts: Set(stored.attempts + 1),
                        ..Default::default()
                    }
                    .update(&self.db)
                    .await?;
                }
                Err(err.into())
            }
        }
    }
}
