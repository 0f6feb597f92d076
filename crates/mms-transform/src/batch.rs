use serde::Serialize;

use crate::engine::TransformResult;

/// Outcomes of one profile applied to many records, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub profile_id: String,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<TransformResult>,
}

impl BatchReport {
    pub fn new(profile_id: impl Into<String>, outcomes: Vec<TransformResult>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            profile_id: profile_id.into(),
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Successful outcomes with their input index.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &TransformResult)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| outcome.is_success())
    }

    /// Failed outcomes with their input index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &TransformResult)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| !outcome.is_success())
    }
}
