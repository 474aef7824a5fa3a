mod accounts;
mod events;
mod ids;
mod results;
mod tax_config;

pub use accounts::{AccountBalance, AccountCategory, DebtAccount, DebtKind, PaymentFrequency};
pub use events::{Event, EventKind};
pub use ids::{AccountId, EventId};
pub use results::{
    AccountBalancesPoint, CashFlowPoint, DebtPayoffPoint, ProjectionResponse, ProjectionSummary,
    ValuePoint,
};
pub use tax_config::TaxBracket;
