use crate::models::{
    ContributionCalendar, ContributionStats, Issue, LanguageBytes, LanguageShare, PullRequest,
    Repository, WEEKDAY_NAMES,
};

const TOP_LANGUAGE_LIMIT: usize = 10;
const DEFAULT_ACTIVE_DAY: &str = "Monday";

pub struct StatsCalculator {
    weights: ScoreWeights,
}

/// Coefficients of the three composite scores.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub repository: f64,
    pub contribution: f64,
    pub pull_request: f64,
    pub issue: f64,
    pub star: f64,
    pub fork: f64,
    pub merged_pull_request: f64,
    pub collaboration_pull_request: f64,
    pub collaboration_issue: f64,
    pub comment: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            repository: 5.0,
            contribution: 0.5,
            pull_request: 10.0,
            issue: 3.0,
            star: 2.0,
            fork: 3.0,
            merged_pull_request: 5.0,
            collaboration_pull_request: 2.0,
            collaboration_issue: 1.0,
            comment: 0.5,
        }
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self::with_weights(ScoreWeights::default())
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn calculate(
        &self,
        repositories: &[Repository],
        pull_requests: &[PullRequest],
        issues: &[Issue],
        calendar: &ContributionCalendar,
        languages: &LanguageBytes,
    ) -> ContributionStats {
        let total_stars: u64 = repositories.iter().map(|r| r.stargazers_count as u64).sum();
        let total_forks: u64 = repositories.iter().map(|r| r.forks_count as u64).sum();
        let total_watchers: u64 = repositories.iter().map(|r| r.watchers_count as u64).sum();
        let lines_of_code: u64 = languages.values().sum();

        let w = &self.weights;

        let contribution_score = (repositories.len() as f64 * w.repository
            + calendar.total_contributions as f64 * w.contribution
            + pull_requests.len() as f64 * w.pull_request
            + issues.len() as f64 * w.issue)
            .round() as u64;

        let merged = pull_requests.iter().filter(|pr| pr.is_merged()).count();
        let impact_score = (total_stars as f64 * w.star
            + total_forks as f64 * w.fork
            + merged as f64 * w.merged_pull_request)
            .round() as u64;

        let comments: u64 = pull_requests.iter().map(|pr| pr.comments as u64).sum();
        let collaboration_score = (pull_requests.len() as f64 * w.collaboration_pull_request
            + issues.len() as f64 * w.collaboration_issue
            + comments as f64 * w.comment)
            .round() as u64;

        ContributionStats {
            total_commits: calendar.total_contributions,
            total_prs: pull_requests.len(),
            total_issues: issues.len(),
            total_stars,
            total_forks,
            total_watchers,
            total_repositories: repositories.len(),
            lines_of_code,
            top_languages: top_languages(languages, TOP_LANGUAGE_LIMIT),
            contribution_streak: contribution_streak(calendar),
            most_active_day: most_active_day(calendar).to_string(),
            most_active_hour: None,
            contribution_score,
            impact_score,
            collaboration_score,
        }
    }
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest languages first; each percentage is rounded on its own, so they need not sum to 100.
pub fn top_languages(languages: &LanguageBytes, limit: usize) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();

    let mut entries: Vec<(&String, &u64)> = languages.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .take(limit)
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percentage: if total == 0 {
                0
            } else {
                (bytes as f64 / total as f64 * 100.0).round() as u32
            },
        })
        .collect()
}

/// Consecutive days with contributions, counting back from the most recent day.
pub fn contribution_streak(calendar: &ContributionCalendar) -> u32 {
    calendar
        .days()
        .rev()
        .take_while(|day| day.contribution_count > 0)
        .count() as u32
}

/// Weekday with the most contributions. Ties go to the weekday seen first.
pub fn most_active_day(calendar: &ContributionCalendar) -> &'static str {
    let mut totals: Vec<(usize, u64)> = Vec::with_capacity(WEEKDAY_NAMES.len());

    for day in calendar.days() {
        let weekday = day.weekday as usize;
        if weekday >= WEEKDAY_NAMES.len() {
            continue;
        }
        match totals.iter_mut().find(|(w, _)| *w == weekday) {
            Some((_, total)) => *total += day.contribution_count as u64,
            None => totals.push((weekday, day.contribution_count as u64)),
        }
    }

    let mut best: Option<(usize, u64)> = None;
    for (weekday, total) in totals {
        if best.map_or(true, |(_, top)| total > top) {
            best = Some((weekday, total));
        }
    }

    best.map(|(weekday, _)| WEEKDAY_NAMES[weekday])
        .unwrap_or(DEFAULT_ACTIVE_DAY)
}
