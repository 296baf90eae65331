//! Changelog generation
//!
//! Classifies commits into fixed sections, formats each commit as a Markdown
//! bullet (with nested body lines), and renders one `## version (date)`
//! section. File-level merge semantics live in [writer].

pub mod writer;

use crate::domain::{classify, Commit};
use crate::error::Result;
use crate::ui;
use crate::vcs::VcsPort;
use regex::Regex;

/// Fixed changelog section, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Major,
    Feat,
    Fix,
    Infra,
    Other,
}

impl Category {
    /// Render order of the sections
    pub const ORDER: [Category; 5] = [
        Category::Major,
        Category::Feat,
        Category::Fix,
        Category::Infra,
        Category::Other,
    ];

    /// Section heading in the rendered Markdown
    pub fn title(self) -> &'static str {
        match self {
            Category::Major => "### 🚨 Breaking Changes",
            Category::Feat => "### ✨ Feature",
            Category::Fix => "### 🐛 Bug Fix",
            Category::Infra => "### 🔧 Infra Change",
            Category::Other => "### 🗃 Other",
        }
    }

    fn index(self) -> usize {
        match self {
            Category::Major => 0,
            Category::Feat => 1,
            Category::Fix => 2,
            Category::Infra => 3,
            Category::Other => 4,
        }
    }

    /// Pick the section for a normalized subject and breaking flag
    fn for_subject(subject: &str, is_breaking: bool) -> Category {
        if is_breaking {
            return Category::Major;
        }
        let matches_prefix = |prefix: &str| {
            Regex::new(&format!(r"^{}(\([^)]*\))?:", prefix))
                .ok()
                .map(|re| re.is_match(subject))
                .unwrap_or(false)
        };
        if matches_prefix("feat") {
            Category::Feat
        } else if matches_prefix("fix") {
            Category::Fix
        } else if matches_prefix("infra") {
            Category::Infra
        } else {
            Category::Other
        }
    }
}

/// Rendered commit entries accumulated per section, in VCS-log order
#[derive(Debug, Default)]
pub struct Groups {
    buckets: [Vec<String>; 5],
}

impl Groups {
    fn push(&mut self, category: Category, entry: String) {
        self.buckets[category.index()].push(entry);
    }

    pub fn entries(&self, category: Category) -> &[String] {
        &self.buckets[category.index()]
    }
}

/// Derive a browsable GitHub URL from a git remote URL.
///
/// Understands the SSH form `git@github.com:OWNER/REPO.git` and the HTTPS
/// form `https://github.com/OWNER/REPO[.git]`. Anything else yields None,
/// which disables commit links.
pub fn github_repo_url(remote_url: &str) -> Option<String> {
    let remote_url = remote_url.trim();

    if let Some(caps) = Regex::new(r"^git@github\.com:(.*)\.git$")
        .ok()
        .and_then(|re| re.captures(remote_url))
    {
        return Some(format!("https://github.com/{}", &caps[1]));
    }

    if let Some(caps) = Regex::new(r"^https://github\.com/(.*?)(\.git)?$")
        .ok()
        .and_then(|re| re.captures(remote_url))
    {
        return Some(format!("https://github.com/{}", &caps[1]));
    }

    None
}

fn leading_bullet(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if !matches!(first, '-' | '*' | '•') {
        return None;
    }
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(first),
        _ => None,
    }
}

/// Indent body lines by nesting depth derived from bullet-character
/// transitions.
///
/// A bullet character not yet on the stack opens a deeper level; one seen
/// before pops back to its level. Non-bullet lines inherit the current depth
/// (minimum 1) and become synthetic `-` bullets. Each line gets two spaces
/// of indent per level.
fn format_indented_lines(lines: &[String]) -> String {
    let mut stack: Vec<char> = Vec::new();

    lines
        .iter()
        .map(|line| {
            let bullet = leading_bullet(line);

            if let Some(bullet) = bullet {
                if !stack.contains(&bullet) {
                    stack.push(bullet);
                } else {
                    while stack.last() != Some(&bullet) {
                        stack.pop();
                    }
                }
            }

            let depth = stack.len().max(1);
            let indent = "  ".repeat(depth);

            match bullet {
                Some(_) => format!("{}{}", indent, line),
                None => format!("{}- {}", indent, line),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn body_lines(body: &str) -> Vec<String> {
    let coauthor = Regex::new(r"(?i)^co-authored-by:").ok();
    let separator = Regex::new(r"^[-*•]{3,}$").ok();

    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !coauthor.as_ref().map_or(false, |re| re.is_match(line)))
        .filter(|line| !separator.as_ref().map_or(false, |re| re.is_match(line)))
        .map(str::to_string)
        .collect()
}

/// Render one commit as a changelog entry, picking its section.
///
/// Returns None when the commit misses its subject or short hash; such log
/// entries are dropped entirely.
fn render_entry(commit: &Commit, repo_url: &str) -> Option<(Category, String)> {
    if commit.subject.trim().is_empty() || commit.short_hash.is_empty() {
        return None;
    }

    let classified = classify(&commit.subject, &commit.body);

    let main_line = if repo_url.is_empty() {
        format!("- {} ({})", classified.subject, commit.short_hash)
    } else {
        format!(
            "- {} [({})]({}/commit/{})",
            classified.subject, commit.short_hash, repo_url, commit.short_hash
        )
    };

    let lines = body_lines(&commit.body);
    let entry = if lines.is_empty() {
        main_line
    } else {
        // the whole body block sits two spaces under the commit bullet
        let footer = format_indented_lines(&lines)
            .split('\n')
            .map(|l| format!("  {}", l))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", main_line, footer)
    };

    let category = Category::for_subject(&classified.subject, classified.is_breaking);
    Some((category, entry))
}

/// Fold commits into per-section entry lists, preserving VCS-log order
pub fn group_commits(commits: &[Commit], repo_url: &str) -> Groups {
    commits.iter().fold(Groups::default(), |mut groups, commit| {
        if let Some((category, entry)) = render_entry(commit, repo_url) {
            groups.push(category, entry);
        }
        groups
    })
}

/// Render a full `## version (date)` section from grouped commits.
///
/// Empty sections are omitted. The output is trimmed, runs of three or more
/// newlines collapse to two, and exactly one trailing blank line remains.
pub fn build_markdown(version: &str, date: &str, groups: &Groups) -> String {
    let mut out = format!("## {} ({})\n\n", version, date);

    for category in Category::ORDER {
        let entries = groups.entries(category);
        if entries.is_empty() {
            continue;
        }
        out.push_str(category.title());
        out.push('\n');
        for entry in entries {
            out.push_str(entry);
            out.push('\n');
        }
        out.push('\n');
    }

    let trimmed = out.trim();
    let collapsed = match Regex::new(r"\n{3,}") {
        Ok(re) => re.replace_all(trimmed, "\n\n").into_owned(),
        Err(_) => trimmed.to_string(),
    };
    format!("{}\n\n", collapsed)
}

/// Renders changelog sections from VCS history
pub struct ChangelogRenderer<'a, V: VcsPort> {
    vcs: &'a V,
    remote: &'a str,
}

impl<'a, V: VcsPort> ChangelogRenderer<'a, V> {
    pub fn new(vcs: &'a V, remote: &'a str) -> Self {
        ChangelogRenderer { vcs, remote }
    }

    /// Render the section for `version` from commits in `(from, to]`.
    ///
    /// An unrecognized remote URL degrades to linkless entries with a
    /// warning; it never fails the render.
    pub fn generate(&self, version: &str, date: &str, from: &str, to: &str) -> Result<String> {
        self.vcs.fetch_all()?;

        let repo_url = match self.vcs.remote_url(self.remote) {
            Ok(url) => github_repo_url(&url).unwrap_or_default(),
            Err(_) => String::new(),
        };
        if repo_url.is_empty() {
            ui::display_warning("Unable to parse GitHub repository URL");
        }

        let commits = self.vcs.log_commits(from, to)?;
        let groups = group_commits(&commits, &repo_url);
        Ok(build_markdown(version, date, &groups))
    }
}
