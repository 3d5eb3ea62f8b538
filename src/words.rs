//! Level-by-level word enumeration over a totalized [`Dfa`].
//!
//! Advances a `word -> state` map one letter at a time rather than materializing an
//! NFA-style adjacency-matrix power series. The simpler shape fits a total DFA exactly
//! and avoids pulling in a linear-algebra crate for a single-automaton enumeration.
use crate::cancel::CancellationToken;
use crate::dfa::Dfa;
use std::collections::HashMap;
use std::sync::Arc;

/// All length-`k` words reachable from the start state, each mapped to whether the DFA
/// accepts it. `|WordLevel|` is exactly `|Σ|^k` once the source DFA is total.
#[derive(Debug, Clone, Default)]
pub struct WordLevel {
    pub k: usize,
    pub acceptance: HashMap<Arc<str>, bool>,
}

impl WordLevel {
    pub fn len(&self) -> usize {
        self.acceptance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acceptance.is_empty()
    }

    pub fn accepted_count(&self) -> usize {
        self.acceptance.values().filter(|&&accepted| accepted).count()
    }
}

/// Produces `W_0..=W_n` for a total DFA, one level at a time, honoring a
/// [`CancellationToken`] polled before each level is produced.
pub struct WordEnumerator<'a> {
    dfa: &'a Dfa,
    prev: HashMap<Arc<str>, Arc<str>>,
    next_k: usize,
    cancel: CancellationToken,
}

impl<'a> WordEnumerator<'a> {
    pub fn new(dfa: &'a Dfa, cancel: CancellationToken) -> Self {
        let start = dfa.start().cloned().unwrap_or_else(|| Arc::from(""));
        WordEnumerator {
            dfa,
            prev: HashMap::from([(Arc::from(""), start)]),
            next_k: 0,
            cancel,
        }
    }

    /// Produces the next level, or `None` if cancellation was observed or the source
    /// DFA has no start state at all.
    pub fn next_level(&mut self) -> Option<WordLevel> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let k = self.next_k;
        if k == 0 {
            self.next_k = 1;
            let acceptance = self
                .prev
                .iter()
                .map(|(word, state)| (word.clone(), self.dfa.is_final(state)))
                .collect();
            return Some(WordLevel { k, acceptance });
        }

        let mut next = HashMap::with_capacity(self.prev.len() * self.dfa.alphabet().len());
        for (word, state) in &self.prev {
            for letter in self.dfa.alphabet() {
                let Ok(target) = self.dfa.transition_target(state, letter) else {
                    continue;
                };
                let mut next_word = String::with_capacity(word.len() + letter.len());
                next_word.push_str(word);
                next_word.push_str(letter);
                next.insert(Arc::from(next_word), target);
            }
        }
        let acceptance = next
            .iter()
            .map(|(word, state)| (word.clone(), self.dfa.is_final(state)))
            .collect();
        self.prev = next;
        self.next_k = k + 1;
        Some(WordLevel { k, acceptance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_dfa() -> Dfa {
        let mut dfa = Dfa::new();
        dfa.add_letter("0").unwrap();
        dfa.add_letter("1").unwrap();
        dfa.add_state("even").unwrap();
        dfa.add_state("odd").unwrap();
        dfa.set_start("even").unwrap();
        dfa.set_finals(["odd"]).unwrap();
        dfa.set_transition("even", "0", "even").unwrap();
        dfa.set_transition("even", "1", "odd").unwrap();
        dfa.set_transition("odd", "0", "odd").unwrap();
        dfa.set_transition("odd", "1", "even").unwrap();
        dfa
    }

    #[test]
    fn level_sizes_match_alphabet_power() {
        let dfa = binary_dfa();
        let mut enumerator = WordEnumerator::new(&dfa, CancellationToken::new());
        for k in 0..5 {
            let level = enumerator.next_level().unwrap();
            assert_eq!(level.k, k);
            assert_eq!(level.len(), 2usize.pow(k as u32));
        }
    }

    #[test]
    fn cancellation_stops_enumeration() {
        let dfa = binary_dfa();
        let token = CancellationToken::new();
        let mut enumerator = WordEnumerator::new(&dfa, token.clone());
        assert!(enumerator.next_level().is_some());
        token.cancel();
        assert!(enumerator.next_level().is_none());
    }
}
