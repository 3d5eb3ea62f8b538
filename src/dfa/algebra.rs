//! Totalization, minimization and equivalence-up-to-renaming over [`Dfa`].
//!
//! Partition refinement via a `P`/`W` worklist, and a paired BFS over a product of the
//! two automata's transition functions for equivalence checking. The representative
//! chosen when merging an equivalence class is always the lexicographically smallest
//! member by name, for deterministic output across runs.
use super::Dfa;
use crate::error::DfaError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

impl Dfa {
    /// Adds a fresh, non-accepting sink state and fills every undefined `(s, l)` pair
    /// to point at it. A no-op (no new state added) if `δ` is already total.
    pub fn totalize(&mut self) {
        let missing: Vec<(usize, usize)> = (0..self.state_order.len())
            .flat_map(|s| (0..self.alphabet_order.len()).map(move |l| (s, l)))
            .filter(|&(s, l)| self.transition_idx(s, l).is_none())
            .collect();
        if missing.is_empty() {
            return;
        }
        let sink_name = self.fresh_state_id();
        let sink_idx = self.state_order.len();
        self.state_order.push(sink_name.clone());
        self.state_index.insert(sink_name, sink_idx);
        for (s, l) in missing {
            self.transitions.insert((s, l), sink_idx);
        }
        for l in 0..self.alphabet_order.len() {
            self.transitions.entry((sink_idx, l)).or_insert(sink_idx);
        }
    }

    fn reachable_idx(&self) -> HashSet<usize> {
        let Some(start) = self.start_idx() else {
            return HashSet::new();
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(s) = queue.pop_front() {
            for l in 0..self.alphabet_order.len() {
                if let Some(target) = self.transition_idx(s, l) {
                    if seen.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }
        seen
    }

    /// Deletes every state unreachable from the start state, together with its
    /// transitions and its membership in the final set.
    pub fn remove_unreachable_states(&mut self) {
        let reachable = self.reachable_idx();
        let to_remove: Vec<usize> = (0..self.state_order.len())
            .filter(|idx| !reachable.contains(idx))
            .collect();
        if to_remove.is_empty() {
            return;
        }
        self.remove_states(to_remove);
    }

    /// Removes the given state indices (sorted ascending), compacting and remapping all
    /// transitions and the start index. Panics if asked to remove the start state.
    fn remove_states(&mut self, to_remove: Vec<usize>) {
        let remove_set: HashSet<usize> = to_remove.iter().copied().collect();
        let start = self.start_idx().expect("remove_states requires a valid start state");
        assert!(!remove_set.contains(&start), "cannot remove the start state");

        let mut old_to_new = HashMap::new();
        let mut new_order = Vec::new();
        for (old_idx, name) in self.state_order.iter().enumerate() {
            if remove_set.contains(&old_idx) {
                continue;
            }
            old_to_new.insert(old_idx, new_order.len());
            new_order.push(name.clone());
        }

        let mut new_transitions = HashMap::new();
        for (&(s, l), &t) in &self.transitions {
            if let (Some(&ns), Some(&nt)) = (old_to_new.get(&s), old_to_new.get(&t)) {
                new_transitions.insert((ns, l), nt);
            }
        }

        self.state_index = new_order
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        self.state_order = new_order;
        self.transitions = new_transitions;
        self.finals.retain(|f| self.state_index.contains_key(f));
    }

    /// Hopcroft-style partition refinement: starts from the final/non-final split and
    /// refines with a `P`/`W` worklist over each letter until fixpoint, returning the
    /// resulting equivalence classes as sets of state indices.
    fn equivalence_classes_idx(&self) -> Vec<HashSet<usize>> {
        let n = self.state_order.len();
        let (finals, nonfinals): (HashSet<usize>, HashSet<usize>) =
            (0..n).partition(|&idx| self.is_final(&self.state_order[idx]));
        if finals.is_empty() {
            return vec![nonfinals];
        }
        if nonfinals.is_empty() {
            return vec![finals];
        }
        let mut p = vec![finals, nonfinals];
        let mut w = p.clone();

        while let Some(a) = w.pop() {
            for l in 0..self.alphabet_order.len() {
                let x: HashSet<usize> = (0..n)
                    .filter(|&s| self.transition_idx(s, l).is_some_and(|t| a.contains(&t)))
                    .collect();
                if x.is_empty() {
                    continue;
                }
                p = p
                    .into_iter()
                    .flat_map(|y| {
                        let inter: HashSet<usize> = x.intersection(&y).copied().collect();
                        let diff: HashSet<usize> = y.difference(&x).copied().collect();
                        if !inter.is_empty() && !diff.is_empty() {
                            if let Some(pos) = w.iter().position(|set| set == &y) {
                                w.swap_remove(pos);
                                w.push(inter.clone());
                                w.push(diff.clone());
                            } else if inter.len() <= diff.len() {
                                w.push(inter.clone());
                            } else {
                                w.push(diff.clone());
                            }
                            vec![inter, diff]
                        } else {
                            vec![y]
                        }
                    })
                    .collect();
            }
        }
        p
    }

    fn lexicographically_smallest(&self, class: &HashSet<usize>) -> usize {
        *class
            .iter()
            .min_by_key(|&&idx| self.state_order[idx].as_ref())
            .expect("equivalence class must not be empty")
    }

    /// Merges each equivalence class into its lexicographically smallest member,
    /// rewriting transitions, the start state and the final set accordingly.
    pub fn merge_nondistinguishable_states(&mut self) {
        let classes = self.equivalence_classes_idx();
        let mut old_to_representative = HashMap::new();
        let mut to_remove = Vec::new();
        for class in &classes {
            let representative = self.lexicographically_smallest(class);
            for &member in class {
                old_to_representative.insert(member, representative);
                if member != representative {
                    to_remove.push(member);
                }
            }
        }
        if to_remove.is_empty() {
            return;
        }

        let remapped: HashMap<(usize, usize), usize> = self
            .transitions
            .iter()
            .map(|(&(s, l), &t)| {
                let ns = *old_to_representative.get(&s).unwrap_or(&s);
                let nt = *old_to_representative.get(&t).unwrap_or(&t);
                ((ns, l), nt)
            })
            .collect();
        self.transitions = remapped;

        to_remove.sort_unstable();
        self.remove_states(to_remove);
    }

    /// Removes unreachable states, then merges language-equivalent ones.
    pub fn minimize(&mut self) {
        self.remove_unreachable_states();
        self.merge_nondistinguishable_states();
    }

    /// Two DFAs are equivalent up to renaming iff there is a bijection between their
    /// state sets respecting start, final-flags and transitions. Assumes both are
    /// already totalized and minimized. Computed by paired BFS, failing fast on any
    /// final-flag disagreement or inconsistent mapping.
    pub fn equiv(&self, other: &Dfa) -> bool {
        let self_alphabet: HashSet<&str> = self.alphabet_order.iter().map(|l| l.as_ref()).collect();
        let other_alphabet: HashSet<&str> = other.alphabet_order.iter().map(|l| l.as_ref()).collect();
        if self_alphabet != other_alphabet {
            return false;
        }
        let (Some(start1), Some(start2)) = (self.start_idx(), other.start_idx()) else {
            return false;
        };

        let mut phi: HashMap<usize, usize> = HashMap::new();
        phi.insert(start1, start2);
        let mut queue = VecDeque::from([(start1, start2)]);

        while let Some((s1, s2)) = queue.pop_front() {
            if self.is_final(&self.state_order[s1]) != other.is_final(&other.state_order[s2]) {
                return false;
            }
            for letter in &self.alphabet_order {
                let Some(l1) = self.letter_idx(letter) else { continue };
                let Some(l2) = other.letter_idx(letter) else { return false };
                let (Some(t1), Some(t2)) = (self.transition_idx(s1, l1), other.transition_idx(s2, l2)) else {
                    return false;
                };
                match phi.get(&t1) {
                    Some(&mapped) if mapped != t2 => return false,
                    Some(_) => {}
                    None => {
                        phi.insert(t1, t2);
                        queue.push_back((t1, t2));
                    }
                }
            }
        }
        true
    }

    /// Clones, totalizes and minimizes both automata, then checks [`equiv`](Self::equiv).
    pub fn compare(a: &Dfa, b: &Dfa) -> Result<bool, DfaError> {
        let mut a = a.clone();
        let mut b = b.clone();
        a.totalize();
        b.totalize();
        a.minimize();
        b.minimize();
        Ok(a.equiv(&b))
    }

    /// Number of defined `(state, letter)` pairs; equal to `|Q| * |Σ|` once totalized.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

pub(crate) fn sorted_names(names: &[Arc<str>]) -> Vec<Arc<str>> {
    let mut sorted = names.to_vec();
    sorted.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    sorted
}
