use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Admin login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Social link upserted by platform name ("GitHub", "LinkedIn", ...).
#[derive(Debug, Deserialize)]
pub struct SocialUpsert {
    pub platform: String,
    #[serde(default)]
    pub url: String,
}

impl SocialUpsert {
    /// An empty url disables the link instead of deleting it.
    pub fn into_patch(self) -> Map<String, Value> {
        let enabled = !self.url.is_empty();
        let mut patch = Map::new();
        patch.insert("platform".to_string(), Value::String(self.platform));
        patch.insert("url".to_string(), Value::String(self.url));
        patch.insert("enabled".to_string(), Value::Bool(enabled));
        patch
    }
}

/// Experience entry: explicit fields only, extra body fields are dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInput {
    pub title: String,
    pub company: String,
    pub description: String,
    pub start_date: String,
    /// Can be a date string or "Present".
    pub end_date: String,
}

impl ExperienceInput {
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(self.title));
        fields.insert("company".to_string(), Value::String(self.company));
        fields.insert("description".to_string(), Value::String(self.description));
        fields.insert("startDate".to_string(), Value::String(self.start_date));
        fields.insert("endDate".to_string(), Value::String(self.end_date));
        fields
    }
}
