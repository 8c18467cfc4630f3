pub mod auth_gate;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod overflow;

pub use auth_gate::{authorize, Access, GateDecision};
pub use error::{LedgerError, TokenError};
pub use ledger::{LedgerStore, TransferOutcome, WithdrawOutcome};
pub use metrics::{get_metrics, init_metrics};
pub use overflow::{evaluate, OverflowReport};
