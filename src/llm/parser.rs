use crate::error::{Error, Result};
use crate::models::Insight;

const MAX_INSIGHTS: usize = 6;

/// Pulls the insight array out of a model reply, dropping malformed entries.
pub fn parse_insights(response: &str) -> Result<Vec<Insight>> {
    let json_str = extract_json_array(response)?;

    let values: Vec<serde_json::Value> = serde_json::from_str(json_str)
        .map_err(|e| Error::ParseError(format!("Failed to parse insight array: {}", e)))?;

    let insights: Vec<Insight> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Insight>(v).ok())
        .filter(|i| !i.title.trim().is_empty() && !i.description.trim().is_empty())
        .take(MAX_INSIGHTS)
        .collect();

    if insights.is_empty() {
        return Err(Error::ParseError("Response held no valid insights".to_string()));
    }

    Ok(insights)
}

/// Outermost `[` .. `]` span, which also covers arrays wrapped in markdown fences.
fn extract_json_array(text: &str) -> Result<&str> {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if end > start => Ok(&text[start..=end]),
        _ => Err(Error::ParseError("No JSON array found in response".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InsightKind;

    #[test]
    fn test_extract_array_from_markdown() {
        let input = r#"Here you go:
```json
[{"type": "skill", "title": "Rust", "description": "Keep going", "confidence": 0.8, "actionable": true}]
```
"#;
        let insights = parse_insights(input).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Skill);
        assert_eq!(insights[0].title, "Rust");
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let input = r#"[
            {"type": "trend", "title": "Weekends", "description": "Busy Saturdays", "confidence": 0.7, "actionable": false},
            {"type": "trend", "title": "No confidence", "description": "x", "actionable": true},
            {"type": "mystery", "title": "Bad type", "description": "x", "confidence": 0.5, "actionable": true},
            {"type": "skill", "title": "", "description": "x", "confidence": 0.5, "actionable": true}
        ]"#;
        let insights = parse_insights(input).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Weekends");
    }

    #[test]
    fn test_caps_at_six() {
        let item = r#"{"type": "achievement", "title": "t", "description": "d", "confidence": 1.0, "actionable": false}"#;
        let input = format!("[{}]", vec![item; 8].join(","));
        assert_eq!(parse_insights(&input).unwrap().len(), 6);
    }

    #[test]
    fn test_no_array_is_an_error() {
        assert!(matches!(
            parse_insights("I cannot help with that."),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(parse_insights("[]"), Err(Error::ParseError(_))));
    }
}
