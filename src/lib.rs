//! # dfa-grader
//!
//! `dfa-grader` grades a student's deterministic finite automaton against a reference
//! automaton and produces a numeric score in `[0, max_score]`. A perfect score means the
//! two automata accept the same language; lower scores measure how different they are,
//! by two complementary metrics combined into a single grade.
//!
//! ## Usage
//!
//! ```
//! use dfa_grader::boundary::{AutomatonSpec, TransitionSpec};
//! use dfa_grader::cancel::CancellationToken;
//! use dfa_grader::config::Config;
//! use dfa_grader::grader::grade;
//!
//! fn binary_automaton(finals: &[&str]) -> AutomatonSpec {
//!     AutomatonSpec {
//!         alphabet: vec!["0".to_string(), "1".to_string()],
//!         states: vec!["s0".to_string(), "s1".to_string()],
//!         start_state: "s0".to_string(),
//!         final_states: finals.iter().map(|s| s.to_string()).collect(),
//!         transitions: vec![
//!             TransitionSpec { from: "s0".into(), to: "s0".into(), symbol: "0".into() },
//!             TransitionSpec { from: "s0".into(), to: "s1".into(), symbol: "1".into() },
//!             TransitionSpec { from: "s1".into(), to: "s0".into(), symbol: "0".into() },
//!             TransitionSpec { from: "s1".into(), to: "s1".into(), symbol: "1".into() },
//!         ],
//!     }
//! }
//!
//! let attempt = binary_automaton(&["s1"]);
//! let target = binary_automaton(&["s1"]);
//! let result = grade(&attempt, &target, &Config::default(), &CancellationToken::new());
//! assert_eq!(result.total_score, result.max_score);
//! ```
//!
//! ## Operations
//!
//! This crate currently supports:
//!
//! * Building, [validating](dfa::Dfa::validate) and incrementally mutating a [DFA](dfa::Dfa)
//! * [Totalizing](dfa::Dfa::totalize) and [minimizing](dfa::Dfa::minimize) a DFA
//! * [Checking whether two DFAs are equivalent up to renaming](dfa::Dfa::equiv)
//! * [Enumerating words level by level](words::WordEnumerator) over a totalized DFA
//! * Scoring [language difference](metrics::lang_diff::lang_diff_score) and
//!   [syntax-edit distance](metrics::syntax_diff::syntax_diff_score) between two DFAs
//! * [Grading](grader::grade) a full attempt/target pair from their wire representation

pub mod boundary;
pub mod cancel;
pub mod config;
pub mod dfa;
pub mod error;
pub mod grader;
pub mod metrics;
pub mod words;
