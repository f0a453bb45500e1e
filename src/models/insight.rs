use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Skill,
    Trend,
    Opportunity,
    Achievement,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightKind::Skill => write!(f, "Skill"),
            InsightKind::Trend => write!(f, "Trend"),
            InsightKind::Opportunity => write!(f, "Opportunity"),
            InsightKind::Achievement => write!(f, "Achievement"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub confidence: f32,
    pub actionable: bool,
}
