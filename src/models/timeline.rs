use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::{Issue, PullRequest};
use super::commit::Commit;
use super::repository::Repository;

/// Variant order doubles as the tie-break order for buckets sharing a date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    #[serde(rename = "repo")]
    Repository,
    #[serde(rename = "pr")]
    PullRequest,
    #[serde(rename = "issue")]
    Issue,
    #[serde(rename = "commit")]
    Commit,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Repository => write!(f, "repo"),
            EventKind::PullRequest => write!(f, "pr"),
            EventKind::Issue => write!(f, "issue"),
            EventKind::Commit => write!(f, "commit"),
        }
    }
}

/// Records behind one bucket. Only the list matching the bucket's kind is filled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimelineDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<Repository>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prs: Vec<PullRequest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,
}

impl TimelineDetails {
    pub fn len_of(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Repository => self.repos.len(),
            EventKind::PullRequest => self.prs.len(),
            EventKind::Issue => self.issues.len(),
            EventKind::Commit => self.commits.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub count: usize,
    pub details: TimelineDetails,
}
