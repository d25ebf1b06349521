//! Health advisories and the chat assistant.
//!
//! Both features forward the current AQI and a location label to an external
//! generative language model and hand its text back to the dashboard. The
//! model sits behind [`LanguageModel`]; when it is unconfigured, unreachable,
//! or returns something unusable the caller gets a fixed fallback instead of
//! an error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Advisory, AqiCategory, ChatMessage, ChatRole, HealthCondition};
use crate::Config;

mod gemini;

pub use gemini::GeminiModel;

// ---

pub const CHAT_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

const DEFAULT_LOCATION: &str = "this area";

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("language model is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("could not parse model output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything sent to the model for one completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    // ---
    pub system: Option<String>,
    /// Conversation in order; the last entry is the message being answered.
    pub turns: Vec<ChatMessage>,
    /// Ask the model for an `application/json` body.
    pub json_response: bool,
}

impl Prompt {
    fn user_text(text: impl Into<String>) -> Self {
        Prompt {
            turns: vec![ChatMessage {
                role: ChatRole::User,
                text: text.into(),
            }],
            ..Prompt::default()
        }
    }
}

/// Text completion seam for the external model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError>;
}

pub type SharedModel = Arc<dyn LanguageModel>;

/// Stand-in used when no API key is configured. Every call fails, so every
/// caller takes its fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

#[async_trait]
impl LanguageModel for Unconfigured {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, AdvisorError> {
        Err(AdvisorError::NotConfigured)
    }
}

/// Pick the model implementation for this configuration.
pub fn model_from_config(cfg: &Config) -> Result<SharedModel, AdvisorError> {
    // ---
    match &cfg.gemini_api_key {
        Some(key) => {
            info!("Advisor using model '{}'", cfg.gemini_model);
            let model = GeminiModel::new(
                &cfg.gemini_api_url,
                &cfg.gemini_model,
                key,
                Duration::from_secs(u64::from(cfg.advisor_timeout_secs)),
            )?;
            Ok(Arc::new(model))
        }
        None => {
            info!("GEMINI_API_KEY not set, advisories will use the static fallback");
            Ok(Arc::new(Unconfigured))
        }
    }
}

// --- Health advisory

/// What the dashboard knows when it asks for an advisory.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryContext {
    // ---
    pub aqi: i64,
    pub location: Option<String>,
    pub condition: HealthCondition,
}

/// Advisory served when the model cannot produce one.
pub fn fallback_advisory(aqi: i64) -> Advisory {
    // ---
    let level = if aqi > 150 { "Unhealthy" } else { "Moderate" };
    Advisory {
        level: level.to_string(),
        general: "Limit prolonged outdoor exertion.".to_string(),
        vulnerable: "Reduce prolonged or heavy outdoor exertion.".to_string(),
        patients: "Avoid all outdoor physical activities.".to_string(),
    }
}

pub fn advisory_prompt(ctx: &AdvisoryContext) -> Prompt {
    // ---
    let location = label_or_default(ctx.location.as_deref());
    let category = AqiCategory::from_aqi(ctx.aqi);

    let mut text = format!(
        "The current Air Quality Index (AQI) in {} is {} ({}).\n",
        location, ctx.aqi, category
    );
    if ctx.condition != HealthCondition::None {
        text.push_str(&format!(
            "CRITICAL: The user has a specific health condition: {}. \
             Tailor the 'patients' or 'vulnerable' advice specifically for this condition.\n",
            ctx.condition.describe()
        ));
    }
    text.push_str(
        "Provide a short, structured health advisory based on this AQI level.\n\
         Include specific advice for:\n\
         1. General Public\n\
         2. Children & Elderly\n\
         3. Asthma / Heart Patients\n\
         Keep it concise, actionable, and formatted as JSON with the following structure:\n\
         {\"level\": \"Good/Moderate/Unhealthy/Severe\", \"general\": \"advice\", \
         \"vulnerable\": \"advice for children/elderly\", \"patients\": \"advice for patients\"}",
    );

    Prompt {
        json_response: true,
        ..Prompt::user_text(text)
    }
}

/// Ask the model for an advisory, falling back on any failure.
pub async fn advise(model: &dyn LanguageModel, ctx: &AdvisoryContext) -> Advisory {
    // ---
    let prompt = advisory_prompt(ctx);
    let result = match model.generate(&prompt).await {
        Ok(text) => parse_advisory(&text),
        Err(e) => Err(e),
    };

    match result {
        Ok(advisory) => {
            debug!("Model advisory level: {}", advisory.level);
            advisory
        }
        Err(e) => {
            warn!("Advisory unavailable, using fallback: {}", e);
            fallback_advisory(ctx.aqi)
        }
    }
}

/// Parse the model's JSON, tolerating a surrounding Markdown code fence.
fn parse_advisory(text: &str) -> Result<Advisory, AdvisorError> {
    // ---
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}

// --- Chat

/// Dashboard state the assistant is told about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatContext {
    // ---
    pub location: Option<String>,
    pub aqi: Option<i64>,
}

pub fn chat_system_instruction(ctx: &ChatContext) -> String {
    // ---
    let viewing = match (ctx.location.as_deref().map(str::trim), ctx.aqi) {
        (Some(location), Some(aqi)) if !location.is_empty() => format!(
            " The user is currently viewing data for {} where the AQI is {}.",
            location, aqi
        ),
        _ => String::new(),
    };
    format!(
        "You are the Bharatvayu AI Assistant. Provide accurate, helpful information about \
         air pollution, health impacts, and the Bharatvayu platform.{} CRITICAL RULE: You MUST \
         reply in exactly ONE single, concise sentence. Never use bullet points, multiple \
         paragraphs, or long explanations.",
        viewing
    )
}

/// Answer `message` given the earlier `history`. Never fails; connection
/// problems produce the apology text.
pub async fn chat(
    model: &dyn LanguageModel,
    ctx: &ChatContext,
    history: &[ChatMessage],
    message: &str,
) -> String {
    // ---
    let mut turns = history.to_vec();
    turns.push(ChatMessage {
        role: ChatRole::User,
        text: message.to_string(),
    });

    let prompt = Prompt {
        system: Some(chat_system_instruction(ctx)),
        turns,
        json_response: false,
    };

    match model.generate(&prompt).await {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => {
            warn!("Chat model returned an empty reply");
            CHAT_APOLOGY.to_string()
        }
        Err(e) => {
            warn!("Chat error: {}", e);
            CHAT_APOLOGY.to_string()
        }
    }
}

fn label_or_default(location: Option<&str>) -> &str {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LOCATION)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::sync::Mutex;

    /// Replies with a canned answer and records the prompt it was given.
    struct CannedModel {
        reply: Result<String, ()>,
        seen: Mutex<Vec<Prompt>>,
    }

    impl CannedModel {
        fn replying(text: &str) -> Self {
            CannedModel {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            CannedModel {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> Prompt {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError> {
            self.seen.lock().unwrap().push(prompt.clone());
            self.reply.clone().map_err(|_| AdvisorError::EmptyResponse)
        }
    }

    fn ctx(aqi: i64) -> AdvisoryContext {
        AdvisoryContext {
            aqi,
            location: Some("Delhi".to_string()),
            condition: HealthCondition::None,
        }
    }

    #[test]
    fn test_fallback_level_threshold() {
        // ---
        assert_eq!(fallback_advisory(150).level, "Moderate");
        assert_eq!(fallback_advisory(151).level, "Unhealthy");
        assert_eq!(
            fallback_advisory(20).patients,
            "Avoid all outdoor physical activities."
        );
    }

    #[test]
    fn test_unconfigured_model_uses_fallback() {
        // ---
        let advisory = tokio_test::block_on(advise(&Unconfigured, &ctx(240)));
        assert_eq!(advisory, fallback_advisory(240));
    }

    #[test]
    fn test_model_json_passes_through() {
        // ---
        let model = CannedModel::replying(
            r#"{"level":"Severe","general":"Stay in.","vulnerable":"Stay in.","patients":"Keep inhalers close."}"#,
        );
        let advisory = tokio_test::block_on(advise(&model, &ctx(320)));
        assert_eq!(advisory.level, "Severe");
        assert_eq!(advisory.patients, "Keep inhalers close.");
        assert!(model.last_prompt().json_response);
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        // ---
        let text = "```json\n{\"level\":\"Good\",\"general\":\"a\",\"vulnerable\":\"b\",\"patients\":\"c\"}\n```";
        assert_eq!(parse_advisory(text).unwrap().level, "Good");
    }

    #[test]
    fn test_unparseable_reply_uses_fallback() {
        // ---
        let model = CannedModel::replying("The air is fine today.");
        let advisory = tokio_test::block_on(advise(&model, &ctx(90)));
        assert_eq!(advisory, fallback_advisory(90));
    }

    #[test]
    fn test_advisory_prompt_mentions_context() {
        // ---
        let mut context = ctx(180);
        context.condition = HealthCondition::Asthma;
        let prompt = advisory_prompt(&context);
        let text = &prompt.turns[0].text;

        assert!(text.contains("in Delhi is 180 (Unhealthy)"));
        assert!(text.contains("asthma"));
    }

    #[test]
    fn test_advisory_prompt_defaults() {
        // ---
        let context = AdvisoryContext {
            aqi: 42,
            location: Some("   ".to_string()),
            condition: HealthCondition::None,
        };
        let text = advisory_prompt(&context).turns[0].text.clone();
        assert!(text.contains("in this area is 42 (Good)"));
        assert!(!text.contains("CRITICAL"));
    }

    #[test]
    fn test_chat_context_requires_location_and_aqi() {
        // ---
        let both = ChatContext {
            location: Some("Mumbai".to_string()),
            aqi: Some(130),
        };
        assert!(chat_system_instruction(&both)
            .contains("viewing data for Mumbai where the AQI is 130."));

        let partial = ChatContext {
            location: Some("Mumbai".to_string()),
            aqi: None,
        };
        assert!(!chat_system_instruction(&partial).contains("viewing data"));
    }

    #[test]
    fn test_chat_appends_message_to_history() {
        // ---
        let model = CannedModel::replying("  PM2.5 are fine particles.  ");
        let history = vec![ChatMessage {
            role: ChatRole::Model,
            text: "Hello!".to_string(),
        }];
        let reply = tokio_test::block_on(chat(
            &model,
            &ChatContext::default(),
            &history,
            "What is PM2.5?",
        ));

        assert_eq!(reply, "PM2.5 are fine particles.");
        let prompt = model.last_prompt();
        assert_eq!(prompt.turns.len(), 2);
        assert_eq!(prompt.turns[1].role, ChatRole::User);
        assert_eq!(prompt.turns[1].text, "What is PM2.5?");
        assert!(prompt.system.is_some());
    }

    #[test]
    fn test_chat_failure_apologizes() {
        // ---
        let model = CannedModel::failing();
        let reply = tokio_test::block_on(chat(&model, &ChatContext::default(), &[], "hi"));
        assert_eq!(reply, CHAT_APOLOGY);
    }
}
