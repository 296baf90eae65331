use regex::{Captures, Regex};

/// One entry from the VCS log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub subject: String,
    pub body: String,
    pub short_hash: String,
}

impl Commit {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        short_hash: impl Into<String>,
    ) -> Self {
        Commit {
            subject: subject.into(),
            body: body.into(),
            short_hash: short_hash.into(),
        }
    }
}

/// Commit subject normalized to `type(scope): text` form, plus breaking flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub subject: String,
    pub is_breaking: bool,
}

type Rewrite = fn(&Captures) -> String;

/// Ordered normalization rules. Each pattern matches the whole subject and
/// its rewrite produces the full replacement; precedence is the slice order.
/// The two bracket forms are mutually exclusive on any one subject because
/// the scoped rewrite output no longer starts with `[`.
const REWRITE_RULES: &[(&str, Rewrite)] = &[
    // [TYPE](scope) text -> type(scope): text
    (r"^\[(\w+)\]\(([^)]+)\)\s*(.+)$", rewrite_scoped_bracket),
    // [TYPE] text -> type: text
    (r"^\[(\w+)\]\s*(.+)$", rewrite_bare_bracket),
    // feature / feature(scope) alias -> feat
    (r"^feature(\([^)]*\))?:(.*)$", rewrite_feature_alias),
];

fn rewrite_scoped_bracket(caps: &Captures) -> String {
    format!("{}({}): {}", caps[1].to_lowercase(), &caps[2], &caps[3])
}

fn rewrite_bare_bracket(caps: &Captures) -> String {
    format!("{}: {}", caps[1].to_lowercase(), &caps[2])
}

fn rewrite_feature_alias(caps: &Captures) -> String {
    let scope = caps.get(1).map_or("", |m| m.as_str());
    format!("feat{}:{}", scope, &caps[2])
}

/// Normalize a raw commit subject/body into conventional form.
///
/// The breaking flag is taken from the original trimmed subject (`!:`) or a
/// `BREAKING CHANGE:` marker in the body, before any rewrite runs, so a
/// rewrite cannot hide the marker. Idempotent: already-normalized subjects
/// pass through unchanged.
pub fn classify(subject: &str, body: &str) -> ClassifiedCommit {
    let trimmed = subject.trim();
    let is_breaking = trimmed.contains("!:") || body.contains("BREAKING CHANGE:");

    let mut normalized = trimmed.to_string();
    for (pattern, rewrite) in REWRITE_RULES {
        let rewritten = Regex::new(pattern)
            .ok()
            .and_then(|re| re.captures(&normalized).map(|caps| rewrite(&caps)));
        if let Some(rewritten) = rewritten {
            normalized = rewritten;
        }
    }

    ClassifiedCommit {
        subject: normalized,
        is_breaking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_conventional_unchanged() {
        let c = classify("feat(auth): add login", "");
        assert_eq!(c.subject, "feat(auth): add login");
        assert!(!c.is_breaking);
    }

    #[test]
    fn test_classify_breaking_subject_marker() {
        let c = classify("feat!: drop old API", "");
        assert!(c.is_breaking);
    }

    #[test]
    fn test_classify_breaking_body_marker() {
        let c = classify("feat: x", "BREAKING CHANGE: y");
        assert!(c.is_breaking);
        assert!(!classify("fix: x", "").is_breaking);
    }

    #[test]
    fn test_classify_bare_bracket() {
        assert_eq!(classify("[FIX] Fix error", "").subject, "fix: Fix error");
        assert_eq!(classify("[INFRA] Update CI", "").subject, "infra: Update CI");
    }

    #[test]
    fn test_classify_bare_bracket_feature_alias() {
        // bracket rewrite first, then the feature alias
        assert_eq!(
            classify("[FEATURE] Add search", "").subject,
            "feat: Add search"
        );
    }

    #[test]
    fn test_classify_scoped_bracket() {
        assert_eq!(
            classify("[FEAT](auth) add oauth", "").subject,
            "feat(auth): add oauth"
        );
    }

    #[test]
    fn test_classify_feature_alias_with_scope() {
        assert_eq!(
            classify("feature(search): fuzzy match", "").subject,
            "feat(search): fuzzy match"
        );
    }

    #[test]
    fn test_classify_trims_subject() {
        assert_eq!(classify("  fix: pad  ", "").subject, "fix: pad");
    }

    #[test]
    fn test_classify_is_idempotent() {
        for subject in [
            "feat: Add search",
            "[FEATURE] Add search",
            "[FIX](db) pool leak",
            "feature: shiny",
            "Random message",
        ] {
            let once = classify(subject, "");
            let twice = classify(&once.subject, "");
            assert_eq!(once.subject, twice.subject, "for input '{}'", subject);
        }
    }
}
