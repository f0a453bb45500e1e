use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub watchers_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
    #[serde(default)]
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub clone_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub private: bool,
    pub owner: RepositoryOwner,
}

impl Repository {
    /// Namespace half of `full_name`, which is what per-repository endpoints are keyed on.
    pub fn owner_login(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.owner.login)
    }

    /// Archived and disabled repositories are skipped by the per-repository collectors.
    pub fn is_active(&self) -> bool {
        !self.archived && !self.disabled
    }

    pub fn reference(&self) -> RepositoryRef {
        RepositoryRef {
            name: self.name.clone(),
            full_name: self.full_name.clone(),
            owner: self.owner_login().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRef {
    pub name: String,
    pub full_name: String,
    pub owner: String,
}

impl RepositoryRef {
    /// Builds a reference from a `.../repos/{owner}/{name}` API URL.
    pub fn from_api_url(url: &str) -> Option<Self> {
        let mut segments = url.trim_end_matches('/').rsplit('/');
        let name = segments.next().filter(|s| !s.is_empty())?;
        let owner = segments.next().filter(|s| !s.is_empty())?;

        Some(Self {
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            owner: owner.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    pub contributions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_from_api_url() {
        let reference =
            RepositoryRef::from_api_url("https://api.github.com/repos/rust-lang/cargo").unwrap();
        assert_eq!(reference.owner, "rust-lang");
        assert_eq!(reference.name, "cargo");
        assert_eq!(reference.full_name, "rust-lang/cargo");
    }

    #[test]
    fn test_reference_from_short_url() {
        assert!(RepositoryRef::from_api_url("cargo").is_none());
        assert!(RepositoryRef::from_api_url("").is_none());
    }
}
