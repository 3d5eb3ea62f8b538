//! The two complementary metrics combined by [crate::grader::grade]: a bounded
//! language-difference score ([lang_diff]) and a bounded syntax-edit-distance search
//! ([syntax_diff]). Both are total functions; algorithm-level failures are absorbed
//! into a `0.0` score rather than surfaced as an error, per the facade's error-handling
//! contract.
pub mod lang_diff;
pub mod syntax_diff;
