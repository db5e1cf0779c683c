use thiserror::Error;

use super::state::ProcessId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid {policy} configuration: {reason}")]
    InvalidConfig {
        policy: &'static str,
        reason: String,
    },

    #[error("process set is empty")]
    EmptySet,

    #[error("process {id} was not reset before the run")]
    NotReset { id: ProcessId },

    #[error("invalid process {id}: {reason}")]
    InvalidProcess { id: ProcessId, reason: String },

    #[error("process set does not fit in the tick range")]
    TickOverflow,
}
