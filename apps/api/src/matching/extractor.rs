//! Skill Extractor: pluggable, trait-based source of skill names for a document.
//!
//! Default: `EmsiSkillExtractor` (token manager + skills API).
//! `AppState` holds an `Arc<dyn SkillExtractor>`; tests swap in a fixed table.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::skills_client::token::TokenManager;
use crate::skills_client::SkillsClient;

/// Pulls `data[].skill.name` out of a raw extraction response, in response order.
///
/// Skip policy: an entry without a `skill` object, without a `name`, or whose
/// `name` is not a string is dropped. A missing or non-array `data` field
/// yields an empty list. This never fails.
pub fn extract_skill_names(raw: &Value) -> Vec<String> {
    let Some(items) = raw.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.get("skill")?.get("name")?.as_str())
        .map(str::to_string)
        .collect()
}

/// Turns free text into an ordered list of skill names.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract_skill_names(&self, text: &str) -> Result<Vec<String>, AppError>;
}

/// Production extractor backed by the EMSI skills API.
///
/// Owns the token manager; the mutex is held only while a token is checked
/// or refreshed, never across the extraction call itself.
pub struct EmsiSkillExtractor {
    client: SkillsClient,
    tokens: Mutex<TokenManager>,
}

impl EmsiSkillExtractor {
    pub fn new(client: SkillsClient, tokens: TokenManager) -> Self {
        Self {
            client,
            tokens: Mutex::new(tokens),
        }
    }
}

#[async_trait]
impl SkillExtractor for EmsiSkillExtractor {
    async fn extract_skill_names(&self, text: &str) -> Result<Vec<String>, AppError> {
        let token = {
            let mut tokens = self.tokens.lock().await;
            tokens.access_token(&self.client).await?
        };

        let raw = self.client.extract_skills(&token, text).await?;

        Ok(extract_skill_names(&raw))
    }
}
