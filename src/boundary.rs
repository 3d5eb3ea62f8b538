//! External interface types (§6): the typed request/response pair the core is handed
//! by whichever delivery layer (HTTP, CLI, ...) the caller chooses to build.
//!
//! Grounded on `original_source/server/types.go`'s `transition`/`automata`/`response`
//! structs: field names and JSON shape carried forward, `serde` derives replacing Go's
//! struct tags.
use crate::dfa::Dfa;
use crate::error::DfaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `{from, to, symbol}` edge of an [`AutomatonSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub from: String,
    pub to: String,
    pub symbol: String,
}

/// The wire shape of a single automaton, as handed to the core by its delivery layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatonSpec {
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub start_state: String,
    pub final_states: Vec<String>,
    pub transitions: Vec<TransitionSpec>,
}

impl TryFrom<&AutomatonSpec> for Dfa {
    type Error = DfaError;

    /// Builds and validates a [`Dfa`] from its wire form, in the order the errors are
    /// listed in §6: alphabet/state non-emptiness first, then start/final membership,
    /// then per-transition membership, then duplicate-transition rejection.
    fn try_from(spec: &AutomatonSpec) -> Result<Self, Self::Error> {
        if spec.alphabet.is_empty() {
            return Err(DfaError::EmptyAlphabet);
        }
        if spec.states.is_empty() {
            return Err(DfaError::EmptyStates);
        }
        if spec.start_state.is_empty() {
            return Err(DfaError::EmptyStartState);
        }

        let alphabet: HashSet<&str> = spec.alphabet.iter().map(String::as_str).collect();
        let states: HashSet<&str> = spec.states.iter().map(String::as_str).collect();

        if !states.contains(spec.start_state.as_str()) {
            return Err(DfaError::StartStateNotInStates(spec.start_state.clone()));
        }
        for f in &spec.final_states {
            if !states.contains(f.as_str()) {
                return Err(DfaError::FinalNotInStates(f.clone()));
            }
        }

        let mut seen_edges: HashSet<(&str, &str)> = HashSet::new();
        for t in &spec.transitions {
            if !states.contains(t.from.as_str()) {
                return Err(DfaError::TransitionStateNotInStates(t.from.clone()));
            }
            if !states.contains(t.to.as_str()) {
                return Err(DfaError::TransitionStateNotInStates(t.to.clone()));
            }
            if !alphabet.contains(t.symbol.as_str()) {
                return Err(DfaError::TransitionSymbolNotInAlphabet(t.symbol.clone()));
            }
            if !seen_edges.insert((t.from.as_str(), t.symbol.as_str())) {
                return Err(DfaError::DuplicateTransition(t.from.clone(), t.symbol.clone()));
            }
        }

        let mut dfa = Dfa::new();
        for l in &spec.alphabet {
            dfa.add_letter(l)?;
        }
        for s in &spec.states {
            dfa.add_state(s)?;
        }
        dfa.set_start(&spec.start_state)?;
        dfa.set_finals(spec.final_states.iter().map(String::as_str))?;
        for t in &spec.transitions {
            dfa.set_transition(&t.from, &t.symbol, &t.to)?;
        }
        dfa.validate()?;
        Ok(dfa)
    }
}

/// The wire shape of the grading response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub status: GradeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub max_score: f64,
    pub total_score: f64,
    pub lang_diff_score: f64,
    pub dfa_diff_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Ok,
    Fail,
}

impl GradeResult {
    pub fn failed(max_score: f64, error: &DfaError) -> Self {
        GradeResult {
            status: GradeStatus::Fail,
            message: Some("invalid input".to_string()),
            error: Some(error.to_string()),
            max_score,
            total_score: 0.0,
            lang_diff_score: 0.0,
            dfa_diff_score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> AutomatonSpec {
        AutomatonSpec {
            alphabet: vec!["0".to_string(), "1".to_string()],
            states: vec!["s0".to_string(), "s1".to_string()],
            start_state: "s0".to_string(),
            final_states: vec!["s1".to_string()],
            transitions: vec![
                TransitionSpec { from: "s0".into(), to: "s0".into(), symbol: "0".into() },
                TransitionSpec { from: "s0".into(), to: "s1".into(), symbol: "1".into() },
                TransitionSpec { from: "s1".into(), to: "s0".into(), symbol: "0".into() },
                TransitionSpec { from: "s1".into(), to: "s1".into(), symbol: "1".into() },
            ],
        }
    }

    #[test]
    fn valid_spec_builds_a_dfa() {
        let dfa = Dfa::try_from(&spec()).unwrap();
        assert_eq!(dfa.states().len(), 2);
        assert_eq!(dfa.alphabet().len(), 2);
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let mut s = spec();
        s.alphabet.clear();
        assert_eq!(Dfa::try_from(&s).unwrap_err(), DfaError::EmptyAlphabet);
    }

    #[test]
    fn dangling_start_state_is_rejected() {
        let mut s = spec();
        s.start_state = "ghost".to_string();
        assert_eq!(
            Dfa::try_from(&s).unwrap_err(),
            DfaError::StartStateNotInStates("ghost".to_string())
        );
    }

    #[test]
    fn duplicate_transition_is_rejected() {
        let mut s = spec();
        s.transitions.push(TransitionSpec {
            from: "s0".into(),
            to: "s1".into(),
            symbol: "0".into(),
        });
        assert_eq!(
            Dfa::try_from(&s).unwrap_err(),
            DfaError::DuplicateTransition("s0".to_string(), "0".to_string())
        );
    }

    #[test]
    fn transition_referencing_unknown_symbol_is_rejected() {
        let mut s = spec();
        s.transitions[0].symbol = "2".to_string();
        assert_eq!(
            Dfa::try_from(&s).unwrap_err(),
            DfaError::TransitionSymbolNotInAlphabet("2".to_string())
        );
    }

    #[test]
    fn automaton_spec_round_trips_through_json() {
        let json = serde_json::to_string(&spec()).unwrap();
        let parsed: AutomatonSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.alphabet, spec().alphabet);
        assert_eq!(parsed.transitions.len(), spec().transitions.len());
    }

    #[test]
    fn grade_result_omits_absent_message_and_error_in_json() {
        let result = GradeResult {
            status: GradeStatus::Ok,
            message: None,
            error: None,
            max_score: 100.0,
            total_score: 100.0,
            lang_diff_score: 100.0,
            dfa_diff_score: 100.0,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("message"));
        assert!(!json.contains("error"));
        assert!(json.contains("\"status\":\"ok\""));
    }
}
