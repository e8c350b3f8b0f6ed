use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub name: String,
    /// Either a plain string or the parser's structured output.
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    /// The résumé as one text blob for extraction.
    pub fn text(&self) -> String {
        flatten_resume_data(&self.data)
    }
}

/// Flattens résumé data to text: every string and number leaf, in document
/// order, joined by single spaces.
pub fn flatten_resume_data(data: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect_leaves(data, &mut parts);
    parts.join(" ")
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            if !s.trim().is_empty() {
                out.push(s.clone());
            }
        }
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, out)),
        Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_plain_string() {
        assert_eq!(flatten_resume_data(&json!("Rust developer")), "Rust developer");
    }

    #[test]
    fn test_flatten_structured_resume() {
        let data = json!({
            "experience": [{"company": "Acme", "years": 5}],
            "skills": {"languages": ["python", "go"], "cloud": ["aws"]},
            "remote": true,
            "summary": null
        });
        let text = flatten_resume_data(&data);
        for piece in ["Acme", "5", "python", "go", "aws"] {
            assert!(text.contains(piece), "missing {piece} in {text}");
        }
        assert!(!text.contains("true"));
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_flatten_null_is_empty() {
        assert_eq!(flatten_resume_data(&Value::Null), "");
    }
}
