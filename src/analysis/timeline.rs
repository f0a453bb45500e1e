use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{
    Commit, EventKind, Issue, PullRequest, Repository, TimelineDetails, TimelineEntry,
};

const DEFAULT_TIMELINE_LIMIT: usize = 100;

/// Groups activity into one bucket per (UTC date, event kind), newest first.
pub struct TimelineBuilder {
    limit: usize,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_TIMELINE_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn build(
        &self,
        repositories: &[Repository],
        pull_requests: &[PullRequest],
        issues: &[Issue],
        commits: &[Commit],
    ) -> Vec<TimelineEntry> {
        let mut buckets: HashMap<(NaiveDate, EventKind), TimelineDetails> = HashMap::new();

        for repo in repositories {
            bucket(&mut buckets, repo.created_at.date_naive(), EventKind::Repository)
                .repos
                .push(repo.clone());
        }

        for pr in pull_requests {
            bucket(&mut buckets, pr.created_at.date_naive(), EventKind::PullRequest)
                .prs
                .push(pr.clone());
        }

        for issue in issues {
            bucket(&mut buckets, issue.created_at.date_naive(), EventKind::Issue)
                .issues
                .push(issue.clone());
        }

        for commit in commits {
            bucket(&mut buckets, commit.authored_at().date_naive(), EventKind::Commit)
                .commits
                .push(commit.clone());
        }

        let mut timeline: Vec<TimelineEntry> = buckets
            .into_iter()
            .map(|((date, kind), details)| TimelineEntry {
                date,
                kind,
                count: details.len_of(kind),
                details,
            })
            .collect();

        timeline.sort_by(|a, b| b.date.cmp(&a.date).then(a.kind.cmp(&b.kind)));
        timeline.truncate(self.limit);
        timeline
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn bucket(
    buckets: &mut HashMap<(NaiveDate, EventKind), TimelineDetails>,
    date: NaiveDate,
    kind: EventKind,
) -> &mut TimelineDetails {
    buckets.entry((date, kind)).or_default()
}
