//! Grading facade (component F), orchestrating the automaton algebra and both metrics
//! for a single `(attempt, target)` pair.
//!
//! A `grade` call takes one [`Config`] [`snapshot`](crate::config::ConfigHandle::snapshot)
//! at entry and uses it throughout, per the reload lifecycle documented on
//! [`crate::config::ConfigHandle`].
use crate::boundary::{AutomatonSpec, GradeResult, GradeStatus};
use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::dfa::Dfa;
use crate::error::GradeError;
use crate::metrics::{lang_diff, syntax_diff};

fn build(spec: &AutomatonSpec) -> Result<Dfa, GradeError> {
    Ok(Dfa::try_from(spec)?)
}

/// Builds both automata from their wire form, totalizes and minimizes clones to check
/// for outright equivalence, and otherwise combines the language-diff and syntax-diff
/// metrics into a single score, per §4.F.
pub fn grade(
    attempt: &AutomatonSpec,
    target: &AutomatonSpec,
    config: &Config,
    cancel: &CancellationToken,
) -> GradeResult {
    let attempt_dfa = match build(attempt) {
        Ok(dfa) => dfa,
        Err(GradeError::InvalidInput(e)) => return GradeResult::failed(config.max_score, &e),
    };
    let target_dfa = match build(target) {
        Ok(dfa) => dfa,
        Err(GradeError::InvalidInput(e)) => return GradeResult::failed(config.max_score, &e),
    };

    let mut attempt_total = attempt_dfa.clone();
    attempt_total.totalize();
    let mut target_total = target_dfa.clone();
    target_total.totalize();

    let mut attempt_min = attempt_total.clone();
    attempt_min.minimize();
    let mut target_min = target_total.clone();
    target_min.minimize();

    if attempt_min.equiv(&target_min) {
        tracing::info!("attempt is language-equivalent to target");
        return GradeResult {
            status: GradeStatus::Ok,
            message: None,
            error: None,
            max_score: config.max_score,
            total_score: config.max_score,
            lang_diff_score: config.max_score,
            dfa_diff_score: config.max_score,
        };
    }

    let (lang_score, syntax_score) = rayon::join(
        || lang_diff::lang_diff_score(&attempt_total, &target_total, &config.lang_diff, cancel),
        || syntax_diff::syntax_diff_score(&attempt_total, &target_total, &config.dfa_syntax_diff, cancel),
    );

    let lang_component = config.max_score * lang_score;
    let syntax_component = config.max_score * syntax_score;
    let total_score = lang_component.max(syntax_component);

    tracing::debug!(lang_score, syntax_score, total_score, "grading complete");

    GradeResult {
        status: GradeStatus::Ok,
        message: None,
        error: None,
        max_score: config.max_score,
        total_score,
        lang_diff_score: lang_component,
        dfa_diff_score: syntax_component,
    }
}
