//! `SeaORM` entity definitions.

pub mod fund_operations;
pub mod investment_options;
pub mod otp_codes;
pub mod properties;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod support_tickets;
pub mod team_members;
pub mod testimonials;
pub mod ticket_messages;
pub mod transactions;
pub mod transfers;
pub mod user_investments;
pub mod user_settings;
pub mod users;
