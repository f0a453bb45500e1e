use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gitpulse::models::{ContributionData, Insight};
use gitpulse::{
    AggregationConfig, AggregationPipeline, ClaudeProvider, Config, GeminiProvider, GitHubClient,
    InsightGenerator,
};

#[derive(Parser, Debug)]
#[command(name = "gitpulse")]
#[command(version)]
#[command(about = "Aggregate your GitHub activity into stats, a timeline and insights")]
struct Args {
    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum concurrent per-repository requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Skip the AI insight step entirely
    #[arg(long)]
    no_insights: bool,

    /// Use only the rule-based insights, even when an API key is set
    #[arg(long)]
    offline_insights: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    data: &'a ContributionData,
    insights: &'a [Insight],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut aggregation_config = AggregationConfig::from(&config);
    if let Some(limit) = args.concurrency.filter(|&n| n > 0) {
        aggregation_config.concurrency_limit = limit;
    }

    let github = GitHubClient::with_base_url(&config.github_token, &config.github_api_url)?;
    let pipeline = AggregationPipeline::new(github, aggregation_config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message("Collecting GitHub activity...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let data = match pipeline.aggregate().await {
        Ok(data) => data,
        Err(e) => {
            if e.is_retryable() {
                spinner.abandon_with_message("Failed to load data, retry later");
            } else {
                spinner.abandon_with_message("Failed to load data");
            }
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "Collected {} repositories and {} timeline buckets",
        data.repositories.len(),
        data.timeline.len()
    ));

    let insights = if args.no_insights {
        Vec::new()
    } else {
        insight_generator(&config, args.offline_insights)?
            .generate(&data)
            .await
    };

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&Report {
            data: &data,
            insights: &insights,
        })?,
        "markdown" => format_markdown(&data, &insights),
        _ => format_text(&data, &insights),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn insight_generator(config: &Config, offline: bool) -> anyhow::Result<InsightGenerator> {
    if offline {
        return Ok(InsightGenerator::offline());
    }

    let generator = if let Some(key) = &config.gemini_api_key {
        InsightGenerator::new(GeminiProvider::new(key.clone(), None)?)
    } else if let Some(key) = &config.anthropic_api_key {
        InsightGenerator::new(ClaudeProvider::new(key.clone(), None)?)
    } else {
        tracing::info!("No model API key configured, using rule-based insights");
        InsightGenerator::offline()
    };

    Ok(generator)
}

fn active_hour(data: &ContributionData) -> String {
    data.stats
        .most_active_hour
        .map(|h| format!("{}:00", h))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_text(data: &ContributionData, insights: &[Insight]) -> String {
    let stats = &data.stats;
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Contribution Report: {} ===\n\n",
        data.user.login
    ));

    if let Some(ref name) = data.user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = data.user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }

    output.push_str(&format!("Contributions (last year): {}\n", stats.total_commits));
    output.push_str(&format!("Repositories: {}\n", stats.total_repositories));
    output.push_str(&format!("Pull Requests: {}\n", stats.total_prs));
    output.push_str(&format!("Issues: {}\n", stats.total_issues));
    output.push_str(&format!(
        "Stars / Forks / Watchers: {} / {} / {}\n",
        stats.total_stars, stats.total_forks, stats.total_watchers
    ));
    output.push_str(&format!("Current Streak: {} days\n", stats.contribution_streak));
    output.push_str(&format!(
        "Most Active: {} (hour: {})\n\n",
        stats.most_active_day,
        active_hour(data)
    ));

    output.push_str("Scores:\n");
    output.push_str(&format!("  Contribution: {}\n", stats.contribution_score));
    output.push_str(&format!("  Impact: {}\n", stats.impact_score));
    output.push_str(&format!("  Collaboration: {}\n", stats.collaboration_score));

    if !stats.top_languages.is_empty() {
        output.push_str("\nTop Languages:\n");
        for language in &stats.top_languages {
            output.push_str(&format!(
                "  - {}: {}% ({} bytes)\n",
                language.name, language.percentage, language.bytes
            ));
        }
    }

    if !data.collaborators.is_empty() {
        output.push_str("\nCollaborators:\n");
        for collaborator in &data.collaborators {
            output.push_str(&format!(
                "  - {} ({} contributions)\n",
                collaborator.login, collaborator.contributions
            ));
        }
    }

    if !data.timeline.is_empty() {
        output.push_str("\nRecent Activity:\n");
        for entry in data.timeline.iter().take(10) {
            output.push_str(&format!("  {} {} x{}\n", entry.date, entry.kind, entry.count));
        }
    }

    if !insights.is_empty() {
        output.push_str("\nInsights:\n");
        for insight in insights {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                insight.kind, insight.title, insight.description
            ));
        }
    }

    output.push_str(&format!(
        "\nGenerated on: {}\n",
        data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(data: &ContributionData, insights: &[Insight]) -> String {
    let stats = &data.stats;
    let mut output = String::new();

    output.push_str(&format!("# Contribution Report: {}\n\n", data.user.login));

    if let Some(ref name) = data.user.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = data.user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Contributions (last year) | {} |\n", stats.total_commits));
    output.push_str(&format!("| Repositories | {} |\n", stats.total_repositories));
    output.push_str(&format!("| Pull Requests | {} |\n", stats.total_prs));
    output.push_str(&format!("| Issues | {} |\n", stats.total_issues));
    output.push_str(&format!("| Stars | {} |\n", stats.total_stars));
    output.push_str(&format!("| Forks | {} |\n", stats.total_forks));
    output.push_str(&format!("| Current Streak | {} days |\n", stats.contribution_streak));
    output.push_str(&format!("| Most Active Day | {} |\n", stats.most_active_day));
    output.push_str(&format!("| Peak Hour | {} |\n", active_hour(data)));
    output.push_str(&format!("| Contribution Score | {} |\n", stats.contribution_score));
    output.push_str(&format!("| Impact Score | {} |\n", stats.impact_score));
    output.push_str(&format!("| Collaboration Score | {} |\n", stats.collaboration_score));

    if !stats.top_languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Share | Bytes |\n|----------|-------|-------|\n");
        for language in &stats.top_languages {
            output.push_str(&format!(
                "| {} | {}% | {} |\n",
                language.name, language.percentage, language.bytes
            ));
        }
    }

    if !data.timeline.is_empty() {
        output.push_str("\n## Recent Activity\n\n");
        for entry in data.timeline.iter().take(15) {
            output.push_str(&format!("- {}: {} x{}\n", entry.date, entry.kind, entry.count));
        }
    }

    if !insights.is_empty() {
        output.push_str("\n## Insights\n\n");
        for insight in insights {
            output.push_str(&format!(
                "- **{}** ({}): {}\n",
                insight.title, insight.kind, insight.description
            ));
        }
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
