use crate::domain::Commit;
use crate::error::Result;
use std::sync::Mutex;

/// Mock VCS for testing without actual git operations.
///
/// Tags and commits are held in insertion order, which doubles as creation
/// order. Mutating calls are recorded so tests can assert which side effects
/// ran (or that none did).
pub struct MockVcs {
    tags: Vec<String>,
    commits: Vec<Commit>,
    remote_url: String,
    mutations: Mutex<Vec<String>>,
}

impl MockVcs {
    /// Create a new empty mock VCS
    pub fn new() -> Self {
        MockVcs {
            tags: Vec::new(),
            commits: Vec::new(),
            remote_url: String::new(),
            mutations: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag; tags added later count as created later
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Add all tags in creation order
    pub fn with_tags(mut self, names: &[&str]) -> Self {
        for name in names {
            self.add_tag(*name);
        }
        self
    }

    /// Add a commit to the log (oldest first)
    pub fn add_commit(&mut self, subject: &str, body: &str, short_hash: &str) {
        self.commits.push(Commit::new(subject, body, short_hash));
    }

    /// Set the URL reported for any remote
    pub fn set_remote_url(&mut self, url: impl Into<String>) {
        self.remote_url = url.into();
    }

    /// Mutating operations recorded so far, in call order
    pub fn mutation_log(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.mutations.lock().unwrap().push(entry);
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl super::VcsPort for MockVcs {
    fn fetch_tags(&self) -> Result<()> {
        Ok(())
    }

    fn fetch_all(&self) -> Result<()> {
        Ok(())
    }

    fn list_tags(&self, sort_by_creation_date_desc: bool) -> Result<Vec<String>> {
        let mut tags = self.tags.clone();
        if sort_by_creation_date_desc {
            tags.reverse();
        }
        Ok(tags)
    }

    fn log_commits(&self, _from: &str, _to: &str) -> Result<Vec<Commit>> {
        Ok(self
            .commits
            .iter()
            .filter(|c| !c.subject.trim().is_empty())
            .cloned()
            .collect())
    }

    fn remote_url(&self, _name: &str) -> Result<String> {
        Ok(self.remote_url.clone())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(format!("create_tag {}", name));
        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        self.record(format!("push_tag {}", name));
        Ok(())
    }

    fn push_branch(&self, name: &str) -> Result<()> {
        self.record(format!("push_branch {}", name));
        Ok(())
    }

    fn stage_files(&self, paths: &[&str]) -> Result<()> {
        self.record(format!("stage_files {}", paths.join(" ")));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));
        Ok(())
    }

    fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        self.record(format!("set_identity {} <{}>", name, email));
        Ok(())
    }
}
