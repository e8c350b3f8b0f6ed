use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Statuses that make a job part of the matching run.
pub const ACTIVE_JOB_STATUSES: &[&str] = &["new", "applied", "interview"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
    pub url: String,
    pub date_posted: DateTime<Utc>,
    pub source: String,
    pub status: String,
    pub salary: Option<String>,
    pub benefits: Vec<String>,
    pub is_remote: bool,
    pub match_score: i32,
    pub matched_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// The view of a job the matcher works on.
///
/// Text fields the scraper left out, sent as `null` or sent as a non-string
/// value become empty strings, so scoring never has to deal with absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub url: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_remote: bool,
    #[serde(default)]
    pub date_posted: Option<DateTime<Utc>>,
}

/// Reads any JSON value as text: strings pass through, everything else is `""`.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description.unwrap_or_default(),
            url: row.url,
            salary: row.salary,
            benefits: row.benefits,
            is_remote: row.is_remote,
            date_posted: Some(row.date_posted),
        }
    }
}
