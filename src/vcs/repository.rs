use crate::domain::Commit;
use crate::error::{ReleaseKitError, Result};
use git2::{FetchOptions, PushOptions, RemoteCallbacks, Repository};
use std::path::Path;

/// Wrapper around git2::Repository implementing [super::VcsPort]
pub struct Git2Vcs {
    repo: Repository,
    remote_name: String,
}

impl Git2Vcs {
    /// Open or discover a git repository starting from `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2Vcs {
            repo,
            remote_name: "origin".to_string(),
        })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Vcs {
            repo,
            remote_name: "origin".to_string(),
        }
    }

    /// Use a remote other than "origin" for fetch and push
    pub fn with_remote(mut self, name: impl Into<String>) -> Self {
        self.remote_name = name.into();
        self
    }

    /// Credential callbacks for fetch/push: SSH keys from ~/.ssh, then the
    /// SSH agent, then default credentials.
    fn callbacks<'a>() -> RemoteCallbacks<'a> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    fn fetch_refspecs(&self, refspecs: &[&str]) -> Result<()> {
        let mut remote = self.repo.find_remote(&self.remote_name).map_err(|e| {
            ReleaseKitError::remote(format!("Cannot find remote '{}': {}", self.remote_name, e))
        })?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(Self::callbacks());

        remote
            .fetch(refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                ReleaseKitError::remote(format!(
                    "Failed to fetch from remote '{}': {}",
                    self.remote_name, e
                ))
            })
    }

    fn push_refspec(&self, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(&self.remote_name).map_err(|e| {
            ReleaseKitError::remote(format!("Cannot find remote '{}': {}", self.remote_name, e))
        })?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(Self::callbacks());

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| ReleaseKitError::remote(format!("Push failed: {}", e)))
    }
}

impl super::VcsPort for Git2Vcs {
    fn fetch_tags(&self) -> Result<()> {
        self.fetch_refspecs(&["+refs/tags/*:refs/tags/*"])
    }

    fn fetch_all(&self) -> Result<()> {
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", self.remote_name);
        self.fetch_refspecs(&[refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"])
    }

    fn list_tags(&self, sort_by_creation_date_desc: bool) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(|s| s.to_string())
            .collect();

        if !sort_by_creation_date_desc {
            return Ok(names);
        }

        // Lightweight tags carry no date of their own; the target commit
        // time stands in for the creation date.
        let mut dated = Vec::with_capacity(names.len());
        for name in names {
            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(|e| ReleaseKitError::tag(format!("Cannot find tag '{}': {}", name, e)))?;
            let commit = reference
                .peel_to_commit()
                .map_err(|e| ReleaseKitError::tag(format!("Cannot peel tag '{}': {}", name, e)))?;
            dated.push((name, commit.time().seconds()));
        }
        dated.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(dated.into_iter().map(|(name, _)| name).collect())
    }

    fn log_commits(&self, from: &str, to: &str) -> Result<Vec<Commit>> {
        let to_id = self
            .repo
            .revparse_single(to)?
            .peel(git2::ObjectType::Commit)?
            .id();
        let from_id = self
            .repo
            .revparse_single(from)?
            .peel(git2::ObjectType::Commit)?
            .id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to_id)?;
        revwalk.hide(from_id)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            // Merges are excluded from the log
            if commit.parent_count() > 1 {
                continue;
            }

            let subject = commit.summary().unwrap_or("").trim().to_string();
            if subject.is_empty() {
                continue;
            }

            let body = commit.body().unwrap_or("").trim().to_string();
            let short_hash = commit
                .as_object()
                .short_id()?
                .as_str()
                .unwrap_or("")
                .to_string();

            commits.push(Commit {
                subject,
                body,
                short_hash,
            });
        }

        // revwalk yields newest first; callers expect oldest first
        commits.reverse();
        Ok(commits)
    }

    fn remote_url(&self, name: &str) -> Result<String> {
        let remote = self
            .repo
            .find_remote(name)
            .map_err(|e| ReleaseKitError::remote(format!("Cannot find remote '{}': {}", name, e)))?;
        Ok(remote.url().unwrap_or("").to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .repo
            .head()?
            .peel_to_commit()
            .map_err(|e| ReleaseKitError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| ReleaseKitError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        self.push_refspec(&format!("refs/tags/{0}:refs/tags/{0}", name))
    }

    fn push_branch(&self, name: &str) -> Result<()> {
        self.push_refspec(&format!("refs/heads/{0}:refs/heads/{0}", name))
    }

    fn stage_files(&self, paths: &[&str]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map(|oid| self.repo.find_commit(oid))
            .transpose()?;

        match parent {
            Some(parent) => {
                self.repo
                    .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;
            }
            None => {
                self.repo
                    .commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;
            }
        }

        Ok(())
    }

    fn set_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self.repo.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }
}

// SAFETY: Git2Vcs wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Vcs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git2_vcs_discover() {
        // Should either succeed or fail gracefully outside a repository
        let result = Git2Vcs::discover(".");
        let _ = result;
    }
}
