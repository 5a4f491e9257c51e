use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid node ID")]
    InvalidId,
    #[error("node was not found")]
    NotFound,
    /// Reported if walking a parent chain ever revisits a node. Parent links are fixed at
    /// creation and always point at older nodes, so no public operation can produce this.
    #[error("cyclical edges are not allowed")]
    CyclicalEdge,
    #[error("parsing did not finish within {limit} steps")]
    StepLimit { limit: usize },
}
