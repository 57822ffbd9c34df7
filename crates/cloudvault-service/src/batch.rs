//! Outcome of non-transactional multi-item operations.

use serde::Serialize;

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

/// The item a batch stopped at and why.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Position of the failed item in the input.
    pub index: usize,
    /// The error it failed with.
    pub error: AppError,
}

/// What a batch committed before it stopped.
///
/// Batches run items in order and stop at the first failure. Items that
/// completed before it stay committed; nothing is rolled back.
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    /// Results of the items that succeeded, in input order.
    pub completed: Vec<T>,
    /// The failure that stopped the batch, if any.
    pub failure: Option<BatchFailure>,
    /// Items never attempted because of the failure.
    pub skipped: usize,
}

impl<T> BatchOutcome<T> {
    pub(crate) fn new() -> Self {
        Self {
            completed: Vec::new(),
            failure: None,
            skipped: 0,
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.completed.push(item);
    }

    pub(crate) fn stop(&mut self, index: usize, total: usize, error: AppError) {
        self.skipped = total.saturating_sub(index + 1);
        self.failure = Some(BatchFailure { index, error });
    }

    /// Whether every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Collapse into a single result: the completed items, or the error
    /// that stopped the batch.
    pub fn into_result(self) -> AppResult<Vec<T>> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok(self.completed),
        }
    }
}

/// Serializable summary for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Number of committed items.
    pub completed: usize,
    /// Error message of the failure, if any.
    pub error: Option<String>,
    /// Items not attempted.
    pub skipped: usize,
}

impl<T> From<&BatchOutcome<T>> for BatchSummary {
    fn from(outcome: &BatchOutcome<T>) -> Self {
        Self {
            completed: outcome.completed.len(),
            error: outcome.failure.as_ref().map(|f| f.error.to_string()),
            skipped: outcome.skipped,
        }
    }
}
