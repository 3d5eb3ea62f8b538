use thiserror::Error;

/// Structural errors produced while building, validating or querying a [`crate::dfa::Dfa`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DfaError {
    #[error("identifier must not be empty")]
    InvalidIdentifier,
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("state set must not be empty")]
    EmptyStates,
    #[error("start state was never set")]
    MissingStart,
    #[error("start state '{0}' is not in the state set")]
    StartStateNotInStates(String),
    #[error("start state must not be empty")]
    EmptyStartState,
    #[error("final state '{0}' is not in the state set")]
    FinalNotInStates(String),
    #[error("state '{0}' referenced by a transition is not in the state set")]
    TransitionStateNotInStates(String),
    #[error("symbol '{0}' referenced by a transition is not in the alphabet")]
    TransitionSymbolNotInAlphabet(String),
    #[error("duplicate transition from '{0}' on '{1}'")]
    DuplicateTransition(String, String),
    #[error("no transition defined from '{0}' on '{1}'")]
    NoTransition(String, String),
}

/// Top-level error surfaced by the grading facade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] DfaError),
}
