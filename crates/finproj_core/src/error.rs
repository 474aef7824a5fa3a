//! Configuration errors
//!
//! Every way a projection request can be rejected before the monthly loop
//! starts. Each variant names the offending field and carries a stable
//! snake_case reason code for API clients.

use jiff::civil::Date;
use thiserror::Error;

use crate::model::{AccountId, EventId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time horizon must be between {min} and {max} years, got {years}")]
    HorizonOutOfRange { years: u32, min: u32, max: u32 },

    #[error("start date {start} leaves no room for a {years}-year projection")]
    StartDateOutOfRange { start: Date, years: u32 },

    #[error("{field}: at least one tax bracket is required")]
    EmptyTaxBrackets { field: String },

    #[error("{field}: no unbounded top bracket (up_to_income = 0)")]
    MissingTopBracket { field: String },

    #[error("{field}: the unbounded top bracket must be the last bracket (found at index {index})")]
    TopBracketNotLast { field: String, index: usize },

    #[error("{field}: bracket ceilings must be strictly ascending (index {index})")]
    UnsortedTaxBrackets { field: String, index: usize },

    #[error("{field}: rate {value} is outside [{min}, {max}]")]
    InvalidRate {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: amount {value} must not be negative")]
    NegativeAmount { field: String, value: f64 },

    #[error("{field}: value must be a finite number")]
    NonFiniteValue { field: String },

    #[error("savings_allocation: weights sum to {total}, which exceeds 1.0")]
    AllocationExceedsOne { total: f64 },

    #[error("event {id} on {date} falls outside the projection window {start}..={end}")]
    EventOutsideHorizon {
        id: EventId,
        date: Date,
        start: Date,
        end: Date,
    },

    #[error("{field}: no debt account with id {account_id}")]
    UnknownDebt { field: String, account_id: AccountId },

    #[error("account id {id} is used more than once")]
    DuplicateAccount { id: AccountId },

    #[error("account id {id} uses the reserved prefix `{prefix}`")]
    ReservedAccountId { id: AccountId, prefix: &'static str },

    #[error("debt {id}: {reason}")]
    InvalidDebt { id: AccountId, reason: String },

    #[error("{field}: {reason}")]
    InvalidSweep { field: String, reason: String },
}

impl ConfigError {
    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::HorizonOutOfRange { .. } => "horizon_out_of_range",
            ConfigError::StartDateOutOfRange { .. } => "start_date_out_of_range",
            ConfigError::EmptyTaxBrackets { .. } => "empty_tax_brackets",
            ConfigError::MissingTopBracket { .. } => "missing_top_bracket",
            ConfigError::TopBracketNotLast { .. } => "top_bracket_not_last",
            ConfigError::UnsortedTaxBrackets { .. } => "unsorted_tax_brackets",
            ConfigError::InvalidRate { .. } => "invalid_rate",
            ConfigError::NegativeAmount { .. } => "negative_amount",
            ConfigError::NonFiniteValue { .. } => "non_finite_value",
            ConfigError::AllocationExceedsOne { .. } => "allocation_exceeds_one",
            ConfigError::EventOutsideHorizon { .. } => "event_outside_horizon",
            ConfigError::UnknownDebt { .. } => "unknown_debt",
            ConfigError::DuplicateAccount { .. } => "duplicate_account",
            ConfigError::ReservedAccountId { .. } => "reserved_account_id",
            ConfigError::InvalidDebt { .. } => "invalid_debt",
            ConfigError::InvalidSweep { .. } => "invalid_sweep",
        }
    }

    /// Path of the offending input field
    pub fn field(&self) -> String {
        match self {
            ConfigError::HorizonOutOfRange { .. } => "time_horizon_years".to_string(),
            ConfigError::StartDateOutOfRange { .. } => "start_date".to_string(),
            ConfigError::EmptyTaxBrackets { field }
            | ConfigError::MissingTopBracket { field }
            | ConfigError::TopBracketNotLast { field, .. }
            | ConfigError::UnsortedTaxBrackets { field, .. }
            | ConfigError::InvalidRate { field, .. }
            | ConfigError::NegativeAmount { field, .. }
            | ConfigError::NonFiniteValue { field }
            | ConfigError::UnknownDebt { field, .. }
            | ConfigError::InvalidSweep { field, .. } => field.clone(),
            ConfigError::AllocationExceedsOne { .. } => "savings_allocation".to_string(),
            ConfigError::EventOutsideHorizon { id, .. } => format!("events[{id}].date"),
            ConfigError::DuplicateAccount { id } | ConfigError::ReservedAccountId { id, .. } => {
                format!("accounts[{id}].id")
            }
            ConfigError::InvalidDebt { id, .. } => format!("debts[{id}]"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
