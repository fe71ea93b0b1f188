//! Conflict decisions and the policy seam that produces them.

use indexmap::IndexSet;

use crate::error::{Result, TabulaError};

/// How to proceed when an incoming dataset conflicts with an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Drop the existing table and re-create it from the incoming dataset.
    Overwrite,
    /// Ingest into a different table instead.
    Rename(String),
    /// Leave the store untouched.
    Skip,
}

/// Decides between overwrite, rename, and skip on a schema conflict.
///
/// The ingestion engine never decides unilaterally; concrete providers are an
/// interactive prompt, a scripted answer, or a test double. Both column-name
/// sets are supplied so the provider can show what differs.
pub trait ConflictPolicy {
    fn decide(
        &self,
        existing: &IndexSet<String>,
        incoming: &IndexSet<String>,
    ) -> ConflictDecision;
}

/// Policy with a predetermined answer, for batch runs and tests.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    decision: ConflictDecision,
}

impl ScriptedPolicy {
    /// Always answer with the given decision.
    pub fn new(decision: ConflictDecision) -> Self {
        Self { decision }
    }

    /// Always overwrite.
    pub fn overwrite() -> Self {
        Self::new(ConflictDecision::Overwrite)
    }

    /// Always rename to the given table.
    pub fn rename(table: impl Into<String>) -> Self {
        Self::new(ConflictDecision::Rename(table.into()))
    }

    /// Always skip.
    pub fn skip() -> Self {
        Self::new(ConflictDecision::Skip)
    }
}

impl ConflictPolicy for ScriptedPolicy {
    fn decide(&self, _existing: &IndexSet<String>, _incoming: &IndexSet<String>) -> ConflictDecision {
        self.decision.clone()
    }
}

/// Obtain a decision from the policy and validate it.
///
/// A rename with a blank target is invalid input and aborts the ingestion
/// before anything touches the store.
pub fn resolve(
    existing: &IndexSet<String>,
    incoming: &IndexSet<String>,
    policy: &dyn ConflictPolicy,
) -> Result<ConflictDecision> {
    let decision = policy.decide(existing, incoming);
    if let ConflictDecision::Rename(target) = &decision {
        if target.trim().is_empty() {
            return Err(TabulaError::Input(
                "rename target must not be blank".to_string(),
            ));
        }
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> (IndexSet<String>, IndexSet<String>) {
        let existing: IndexSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let incoming: IndexSet<String> = ["a", "c"].iter().map(|s| s.to_string()).collect();
        (existing, incoming)
    }

    #[test]
    fn test_scripted_policy_answers() {
        let (existing, incoming) = sets();
        let decision = resolve(&existing, &incoming, &ScriptedPolicy::overwrite()).unwrap();
        assert_eq!(decision, ConflictDecision::Overwrite);
    }

    #[test]
    fn test_blank_rename_is_input_error() {
        let (existing, incoming) = sets();
        for target in ["", "   "] {
            let err = resolve(&existing, &incoming, &ScriptedPolicy::rename(target)).unwrap_err();
            assert!(matches!(err, TabulaError::Input(_)));
        }
    }

    #[test]
    fn test_valid_rename_passes_through() {
        let (existing, incoming) = sets();
        let decision = resolve(&existing, &incoming, &ScriptedPolicy::rename("t2")).unwrap();
        assert_eq!(decision, ConflictDecision::Rename("t2".to_string()));
    }
}
