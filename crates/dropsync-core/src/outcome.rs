use crate::error::SyncError;

/// The single classified result of one pipeline invocation.
///
/// A busy lock marker is expected contention, not a fault, so it reports
/// as `NoOp` rather than `Failed`.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to do, or another session holds a lock marker.
    NoOp,
    /// All eligible items were transferred.
    Completed,
    /// The run aborted; already-committed transfers stay committed.
    Failed(SyncError),
}

impl Outcome {
    /// Whether this outcome should map to a zero exit status.
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NoOp => write!(f, "no-op"),
            Outcome::Completed => write!(f, "completed"),
            Outcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}
