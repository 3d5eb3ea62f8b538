//! Bounded language-difference metric: enumerate words up to a clamped depth and
//! measure the normalized symmetric difference of acceptance.
//!
//! Grounded on `grader/language_diff.go` (the config-aware revision of the Go
//! original): the depth formula, the per-level `diff_k / max(1, len_T_k)` score, and
//! the "return the partial mean over whatever levels were collected before the
//! timeout" truncation behavior are all taken from there.
use crate::cancel::CancellationToken;
use crate::config::LangDiffConfig;
use crate::dfa::Dfa;
use crate::words::{WordEnumerator, WordLevel};

fn resolve_depth(config: &LangDiffConfig, target_alphabet_len: usize) -> usize {
    let alpha = target_alphabet_len as i64;
    let mut n = config.max_depth as i64 - alpha;
    if alpha == 5 {
        n -= 1;
    }
    if n < config.max_depth as i64 {
        n = config.max_depth as i64;
    }
    let n = n.max(0) as usize;
    tracing::debug!(
        alpha,
        max_depth = config.max_depth,
        resolved_depth = n,
        "language-diff depth clamp is arithmetically dead whenever alpha >= 0"
    );
    n
}

fn collect_levels(dfa: &Dfa, n: usize, global: &CancellationToken, local: &CancellationToken) -> Vec<WordLevel> {
    let mut enumerator = WordEnumerator::new(dfa, global.clone());
    let mut levels = Vec::with_capacity(n + 1);
    for _ in 0..=n {
        if local.is_cancelled() {
            break;
        }
        match enumerator.next_level() {
            Some(level) => levels.push(level),
            None => break,
        }
    }
    levels
}

fn level_score(attempt: &WordLevel, target: &WordLevel) -> f64 {
    let mut diff_k = 0;
    for (word, &t_accept) in &target.acceptance {
        let a_accept = attempt.acceptance.get(word.as_ref()).copied().unwrap_or(false);
        if a_accept != t_accept {
            diff_k += 1;
        }
    }
    for (word, &a_accept) in &attempt.acceptance {
        if !target.acceptance.contains_key(word.as_ref()) && a_accept {
            diff_k += 1;
        }
    }
    let len_t_k = target.accepted_count().max(1);
    diff_k as f64 / len_t_k as f64
}

/// Computes the normalized language-difference score of `attempt` against `target`,
/// both assumed totalized. Returns a real number, typically in `[0, 1]`; `0.0` if no
/// level could be collected (e.g. cancelled before the first level).
pub fn lang_diff_score(attempt: &Dfa, target: &Dfa, config: &LangDiffConfig, cancel: &CancellationToken) -> f64 {
    let n = resolve_depth(config, target.alphabet().len());
    let local_timeout = CancellationToken::with_timeout(config.timeout);

    let (attempt_levels, target_levels) = rayon::join(
        || collect_levels(attempt, n, cancel, &local_timeout),
        || collect_levels(target, n, cancel, &local_timeout),
    );

    let r = attempt_levels.len().min(target_levels.len());
    if r == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    for k in 0..r {
        let score_k = level_score(&attempt_levels[k], &target_levels[k]);
        tracing::trace!(k, score_k, "language-diff level scored");
        sum += score_k;
    }
    sum / r as f64
}
