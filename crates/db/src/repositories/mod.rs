//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Balance mutations are confined to [`ledger::LedgerRepository`].

pub mod content;
pub mod investment;
pub mod ledger;
pub mod otp;
pub mod property;
pub mod session;
pub mod settings;
pub mod support;
pub mod transaction;
pub mod user;

pub use content::{
    ContentRepository, CreateTeamMemberInput, CreateTestimonialInput, UpdateTeamMemberInput,
    UpdateTestimonialInput,
};
pub use investment::{
    CreateOptionInput, InvestmentRepository, PositionWithOption, UpdateOptionInput,
};
pub use ledger::{
    FundOperationInput, FundOutcome, InvestmentOutcome, LedgerError, LedgerRepository,
    TransferOutcome,
};
pub use otp::{OtpRepoError, OtpRepository};
pub use property::PropertyRepository;
pub use session::SessionRepository;
pub use settings::{SettingsRepository, UpdateSettingsInput};
pub use support::{SupportError, SupportRepository, TicketWithMessages};
pub use transaction::TransactionRepository;
pub use user::{CreateUserInput, UserRepository};
