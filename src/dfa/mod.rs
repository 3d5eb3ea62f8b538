//! # Deterministic Finite Automaton
//!
//! [`Dfa`] is built incrementally: states, letters, a start state, final states and
//! transitions may be added in any order, then [validated](Dfa::validate) once the
//! caller believes the automaton is complete. This differs from a parser-backed
//! representation (which only ever produces already-consistent automata in one shot).
//! Here, `set_start`/`set_finals` may legally name an identifier that hasn't been
//! registered by `add_state` yet. It is `validate`, not the setters, that turns
//! a dangling reference into an observable [`DfaError`].
//!
//! ```
//! use dfa_grader::dfa::Dfa;
//!
//! let mut dfa = Dfa::new();
//! dfa.add_letter("a").unwrap();
//! dfa.add_letter("b").unwrap();
//! dfa.add_state("s0").unwrap();
//! dfa.add_state("s1").unwrap();
//! dfa.set_start("s0").unwrap();
//! dfa.set_finals(["s1"]).unwrap();
//! dfa.set_transition("s0", "a", "s0").unwrap();
//! dfa.set_transition("s0", "b", "s1").unwrap();
//! dfa.set_transition("s1", "a", "s0").unwrap();
//! dfa.set_transition("s1", "b", "s1").unwrap();
//! dfa.validate().unwrap();
//! ```
use crate::error::DfaError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub mod algebra;

/// A deterministic finite automaton under construction or already built.
///
/// State and letter names are interned as `Arc<str>`, so [`Clone`] never copies string
/// data; only the index maps and the transition table are duplicated, giving a clone
/// that is structurally independent of its origin (mutating it never affects the
/// original).
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    alphabet_order: Vec<Arc<str>>,
    alphabet_index: HashMap<Arc<str>, usize>,
    state_order: Vec<Arc<str>>,
    state_index: HashMap<Arc<str>, usize>,
    start: Option<Arc<str>>,
    finals: HashSet<Arc<str>>,
    transitions: HashMap<(usize, usize), usize>,
}

impl Dfa {
    pub fn new() -> Self {
        Dfa::default()
    }

    fn intern(name: &str) -> Result<Arc<str>, DfaError> {
        if name.is_empty() {
            Err(DfaError::InvalidIdentifier)
        } else {
            Ok(Arc::from(name))
        }
    }

    fn register_state(&mut self, name: &str) -> Result<usize, DfaError> {
        let name = Self::intern(name)?;
        if let Some(&idx) = self.state_index.get(&name) {
            return Ok(idx);
        }
        let idx = self.state_order.len();
        self.state_order.push(name.clone());
        self.state_index.insert(name, idx);
        Ok(idx)
    }

    fn register_letter(&mut self, name: &str) -> Result<usize, DfaError> {
        let name = Self::intern(name)?;
        if let Some(&idx) = self.alphabet_index.get(&name) {
            return Ok(idx);
        }
        let idx = self.alphabet_order.len();
        self.alphabet_order.push(name.clone());
        self.alphabet_index.insert(name, idx);
        Ok(idx)
    }

    /// Registers a state identifier. Idempotent: adding the same state twice is not an
    /// error. Fails with [`DfaError::InvalidIdentifier`] if `s` is empty.
    pub fn add_state(&mut self, s: &str) -> Result<(), DfaError> {
        self.register_state(s).map(|_| ())
    }

    /// Registers a letter identifier. Idempotent. Fails with
    /// [`DfaError::InvalidIdentifier`] if `l` is empty.
    pub fn add_letter(&mut self, l: &str) -> Result<(), DfaError> {
        self.register_letter(l).map(|_| ())
    }

    /// Sets the start state. Does not require `s` to already be registered; an
    /// unregistered start state is only surfaced by [`validate`](Self::validate).
    pub fn set_start(&mut self, s: &str) -> Result<(), DfaError> {
        self.start = Some(Self::intern(s)?);
        Ok(())
    }

    /// Sets the final states, replacing any previously set final set. Like `set_start`,
    /// names that aren't (yet) registered states are only caught by `validate`.
    pub fn set_finals<'a>(&mut self, finals: impl IntoIterator<Item = &'a str>) -> Result<(), DfaError> {
        let mut set = HashSet::new();
        for name in finals {
            set.insert(Self::intern(name)?);
        }
        self.finals = set;
        Ok(())
    }

    /// Sets `δ(from, l) := to`, registering `from`, `to` and `l` if they aren't already
    /// present. Overwrites any prior transition for the same `(from, l)` pair: the
    /// programmatic builder keeps "last write wins" semantics; input arriving from an
    /// external boundary is expected to reject duplicates before calling this.
    pub fn set_transition(&mut self, from: &str, l: &str, to: &str) -> Result<(), DfaError> {
        let from_idx = self.register_state(from)?;
        let to_idx = self.register_state(to)?;
        let l_idx = self.register_letter(l)?;
        self.transitions.insert((from_idx, l_idx), to_idx);
        Ok(())
    }

    /// Succeeds iff a start state was set and it, along with every final state, is a
    /// registered state. Does not require `δ` to be total.
    pub fn validate(&self) -> Result<(), DfaError> {
        let start = self.start.as_ref().ok_or(DfaError::MissingStart)?;
        if !self.state_index.contains_key(start) {
            return Err(DfaError::StartStateNotInStates(start.to_string()));
        }
        for f in &self.finals {
            if !self.state_index.contains_key(f) {
                return Err(DfaError::FinalNotInStates(f.to_string()));
            }
        }
        Ok(())
    }

    /// Read-only view of the registered states, in registration order (unspecified by
    /// contract; sort if you need determinism).
    pub fn states(&self) -> &[Arc<str>] {
        &self.state_order
    }

    /// Read-only view of the registered alphabet, in registration order.
    pub fn alphabet(&self) -> &[Arc<str>] {
        &self.alphabet_order
    }

    /// Read-only view of the final states.
    pub fn finals(&self) -> impl Iterator<Item = &Arc<str>> {
        self.finals.iter()
    }

    pub fn start(&self) -> Option<&Arc<str>> {
        self.start.as_ref()
    }

    pub fn is_final(&self, s: &str) -> bool {
        self.finals.iter().any(|f| f.as_ref() == s)
    }

    /// The target state of `δ(s, l)`, or [`DfaError::NoTransition`] if undefined (or if
    /// `s`/`l` aren't registered at all).
    pub fn transition_target(&self, s: &str, l: &str) -> Result<Arc<str>, DfaError> {
        let no_transition = || DfaError::NoTransition(s.to_string(), l.to_string());
        let s_idx = *self.state_index.get(s).ok_or_else(no_transition)?;
        let l_idx = *self.alphabet_index.get(l).ok_or_else(no_transition)?;
        let target_idx = *self.transitions.get(&(s_idx, l_idx)).ok_or_else(no_transition)?;
        Ok(self.state_order[target_idx].clone())
    }

    /// A state identifier guaranteed not to already be in `Q`, generated from a fixed
    /// prefix and an incrementing counter.
    pub fn fresh_state_id(&self) -> Arc<str> {
        let mut n = 0usize;
        loop {
            let candidate = format!("_fresh{n}");
            if !self.state_index.contains_key(candidate.as_str()) {
                return Arc::from(candidate);
            }
            n += 1;
        }
    }

    pub(crate) fn state_idx(&self, s: &str) -> Option<usize> {
        self.state_index.get(s).copied()
    }

    pub(crate) fn letter_idx(&self, l: &str) -> Option<usize> {
        self.alphabet_index.get(l).copied()
    }

    pub(crate) fn start_idx(&self) -> Option<usize> {
        self.start.as_ref().and_then(|s| self.state_idx(s))
    }

    pub(crate) fn transition_idx(&self, s_idx: usize, l_idx: usize) -> Option<usize> {
        self.transitions.get(&(s_idx, l_idx)).copied()
    }
}
