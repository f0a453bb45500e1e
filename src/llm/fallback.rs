use crate::models::{ContributionStats, Insight, InsightKind};

const MAX_FALLBACK_INSIGHTS: usize = 5;

/// Rule-based insights used whenever the model is unavailable or unusable.
pub fn fallback_insights(stats: &ContributionStats) -> Vec<Insight> {
    let mut insights = Vec::new();

    if stats.top_languages.len() > 3 {
        insights.push(Insight {
            kind: InsightKind::Skill,
            title: "Strong Language Diversity".to_string(),
            description: format!(
                "You're proficient in {} programming languages. Consider deepening your expertise in {} or exploring emerging technologies.",
                stats.top_languages.len(),
                stats.top_languages[0].name
            ),
            confidence: 0.9,
            actionable: true,
        });
    }

    if stats.contribution_streak > 30 {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Excellent Contribution Consistency".to_string(),
            description: format!(
                "Your {}-day streak shows remarkable dedication. This consistency is valuable for long-term project success.",
                stats.contribution_streak
            ),
            confidence: 0.95,
            actionable: false,
        });
    }

    if stats.total_stars > 50 {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Strong Community Impact".to_string(),
            description: format!(
                "Your repositories have earned {} stars, indicating valuable contributions to the community. Consider creating more open-source projects.",
                stats.total_stars
            ),
            confidence: 0.85,
            actionable: true,
        });
    }

    if (stats.total_prs as f64) < stats.total_commits as f64 * 0.1 {
        insights.push(Insight {
            kind: InsightKind::Opportunity,
            title: "Increase Collaboration".to_string(),
            description: "Consider contributing more to other projects through pull requests. This can expand your network and improve your coding skills.".to_string(),
            confidence: 0.8,
            actionable: true,
        });
    }

    insights.push(Insight {
        kind: InsightKind::Trend,
        title: format!("Peak Activity on {}", stats.most_active_day),
        description: format!(
            "You're most productive on {}s. Consider scheduling important coding tasks during your peak productivity times.",
            stats.most_active_day
        ),
        confidence: 0.75,
        actionable: true,
    });

    insights.truncate(MAX_FALLBACK_INSIGHTS);
    insights
}
