use crate::models::ContributionData;

pub const SYSTEM_PROMPT: &str = r#"You are a senior engineering mentor reviewing a developer's GitHub activity.
You write specific, actionable and encouraging observations about their work.

You must respond with a JSON array matching this exact schema:
[
    {
        "type": "skill|trend|opportunity|achievement",
        "title": "Brief insight title",
        "description": "Detailed explanation with specific recommendations",
        "confidence": 0.0-1.0,
        "actionable": true|false
    }
]"#;

#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub display_name: String,
    pub total_commits: u64,
    pub total_stars: u64,
    pub total_repositories: usize,
    pub top_languages: Vec<String>,
    pub contribution_streak: u32,
    pub most_active_day: String,
    pub recent_activity: Vec<String>,
}

impl InsightRequest {
    pub fn from_data(data: &ContributionData) -> Self {
        let stats = &data.stats;
        Self {
            display_name: data.user.display_name().to_string(),
            total_commits: stats.total_commits,
            total_stars: stats.total_stars,
            total_repositories: stats.total_repositories,
            top_languages: stats
                .top_languages
                .iter()
                .take(5)
                .map(|l| l.name.clone())
                .collect(),
            contribution_streak: stats.contribution_streak,
            most_active_day: stats.most_active_day.clone(),
            recent_activity: data
                .timeline
                .iter()
                .take(10)
                .map(|e| format!("{}: {}", e.kind, e.count))
                .collect(),
        }
    }

    pub fn to_prompt(&self) -> String {
        let mut prompt = String::from(
            "Analyze this GitHub developer profile data and provide 4-6 actionable insights:\n\n",
        );

        prompt.push_str(&format!("Profile: {}\n", self.display_name));
        prompt.push_str(&format!("Total Commits: {}\n", self.total_commits));
        prompt.push_str(&format!("Total Stars: {}\n", self.total_stars));
        prompt.push_str(&format!("Total Repositories: {}\n", self.total_repositories));
        prompt.push_str(&format!("Top Languages: {}\n", self.top_languages.join(", ")));
        prompt.push_str(&format!(
            "Contribution Streak: {} days\n",
            self.contribution_streak
        ));
        prompt.push_str(&format!("Most Active Day: {}\n", self.most_active_day));
        prompt.push_str(&format!(
            "Recent Activity: {}\n\n",
            self.recent_activity.join(", ")
        ));

        prompt.push_str(
            "Focus on:\n\
             1. Skill development opportunities based on language usage\n\
             2. Contribution patterns and trends\n\
             3. Areas for improvement or growth\n\
             4. Notable achievements or strengths\n\
             5. Collaboration opportunities\n\
             6. Technical recommendations\n\n",
        );
        prompt.push_str("Provide your insights as a JSON array:\n");
        prompt
    }
}
