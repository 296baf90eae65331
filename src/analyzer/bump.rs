use crate::domain::{BumpLevel, ClassifiedCommit};
use regex::Regex;

/// Reduce a sequence of classified commits to one bump level.
///
/// A set test over the whole sequence, order-independent: any breaking
/// commit means major; else any `feat` commit means minor; else patch,
/// including for unrecognized types like `docs:` or `chore:`.
pub fn detect_bump(commits: &[ClassifiedCommit]) -> BumpLevel {
    if commits.iter().any(|c| c.is_breaking) {
        return BumpLevel::Major;
    }

    let any_with_prefix = |prefix: &str| {
        Regex::new(&format!(r"(?i)^{}(\([^)]*\))?:", prefix))
            .ok()
            .map(|re| commits.iter().any(|c| re.is_match(&c.subject)))
            .unwrap_or(false)
    };

    if any_with_prefix("feat") {
        BumpLevel::Minor
    } else if any_with_prefix("fix") {
        BumpLevel::Patch
    } else {
        BumpLevel::Patch
    }
}
