use std::sync::Arc;

use chrono::Utc;

use crate::analysis::collectors::Collectors;
use crate::analysis::stats_calculator::StatsCalculator;
use crate::analysis::timeline::TimelineBuilder;
use crate::config::AggregationConfig;
use crate::error::{Error, Result};
use crate::github::PlatformApi;
use crate::models::ContributionData;

pub struct AggregationPipeline {
    api: Arc<dyn PlatformApi>,
    stats_calculator: StatsCalculator,
    timeline_builder: TimelineBuilder,
    config: AggregationConfig,
}

impl AggregationPipeline {
    pub fn new(api: impl PlatformApi + 'static, config: AggregationConfig) -> Self {
        Self::from_shared(Arc::new(api), config)
    }

    pub fn from_shared(api: Arc<dyn PlatformApi>, config: AggregationConfig) -> Self {
        Self {
            api,
            stats_calculator: StatsCalculator::new(),
            timeline_builder: TimelineBuilder::new(),
            config,
        }
    }

    /// Collects everything for the authenticated identity. Fails as a whole if the user,
    /// repository list, searches or calendar cannot be fetched.
    pub async fn aggregate(&self) -> Result<ContributionData> {
        let collectors = Collectors::new(self.api.as_ref(), &self.config);

        let user = self.api.get_authenticated_user().await?;
        let login = user.login.as_str();
        tracing::info!("Aggregating contributions for {}", login);

        // Commits and languages need the repository list, so they ride on its branch.
        let repository_branch = async {
            let repositories = collectors.repositories().await?;
            let (recent_commits, languages) = tokio::join!(
                collectors.recent_commits(login, &repositories),
                collectors.language_bytes(&repositories)
            );
            Ok::<_, Error>((repositories, recent_commits, languages))
        };

        let ((repositories, recent_commits, languages), pull_requests, issues, contributions) =
            tokio::try_join!(
                repository_branch,
                collectors.pull_requests(login),
                collectors.issues(login),
                collectors.contribution_calendar(login)
            )?;

        let collaborators = collectors.collaborators(&repositories).await;

        let stats = self.stats_calculator.calculate(
            &repositories,
            &pull_requests,
            &issues,
            &contributions.contribution_calendar,
            &languages,
        );
        let timeline =
            self.timeline_builder
                .build(&repositories, &pull_requests, &issues, &recent_commits);

        tracing::info!(
            "Aggregated {} repositories, {} pull requests, {} issues, {} timeline buckets",
            repositories.len(),
            pull_requests.len(),
            issues.len(),
            timeline.len()
        );

        Ok(ContributionData {
            user,
            repositories,
            pull_requests,
            issues,
            recent_commits,
            contribution_calendar: contributions.contribution_calendar,
            repository_contributions: contributions.commit_contributions_by_repository,
            languages,
            stats,
            timeline,
            collaborators,
            generated_at: Utc::now(),
        })
    }
}
