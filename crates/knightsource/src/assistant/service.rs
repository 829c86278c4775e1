use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::keywords::KeywordResponder;
use super::remote::HttpAnswerSource;

/// Outbound seam for the remote question-answering service.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn answer(&self, question: &str) -> Result<String, AnswerError>;
}

#[async_trait]
impl AnswerSource for Box<dyn AnswerSource> {
    async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        self.as_ref().answer(question).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("answer service unavailable: {0}")]
    Unavailable(String),
    #[error("answer service returned status {0}")]
    Status(u16),
}

/// Placeholder source for deployments without a remote answer service.
#[derive(Debug, Clone, Default)]
pub struct NoRemote;

#[async_trait]
impl AnswerSource for NoRemote {
    async fn answer(&self, _question: &str) -> Result<String, AnswerError> {
        Err(AnswerError::Unavailable(
            "no remote answer service configured".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub paragraphs: Vec<String>,
    pub source: ReplySource,
    pub answered_at: DateTime<Utc>,
}

impl AssistantReply {
    /// Keyword answers are authored one paragraph or bullet per line.
    fn fallback(text: String) -> Self {
        let paragraphs = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self::stamped(text, paragraphs, ReplySource::Fallback)
    }

    fn remote(raw: &str) -> Self {
        let text = normalize_remote(raw);
        let paragraphs = split_paragraphs(&text);
        Self::stamped(text, paragraphs, ReplySource::Remote)
    }

    fn stamped(text: String, paragraphs: Vec<String>, source: ReplySource) -> Self {
        Self {
            text,
            paragraphs,
            source,
            answered_at: Utc::now(),
        }
    }
}

/// Unwraps JSON-encoded replies and restores escaped and HTML line breaks.
fn normalize_remote(raw: &str) -> String {
    let text = unwrap_json(raw).unwrap_or_else(|| raw.to_string());
    let text = text.replace("\r\n", "\n").replace("\\n", "\n");
    replace_html_breaks(&text)
}

fn unwrap_json(raw: &str) -> Option<String> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::String(text) => Some(text),
        Value::Object(mut fields) => ["response", "answer"]
            .iter()
            .find_map(|key| match fields.remove(*key) {
                Some(Value::String(text)) if !text.is_empty() => Some(text),
                _ => None,
            }),
        _ => None,
    }
}

/// Replaces `<br>`, `<br/>` and `<br />` (any case) with a newline.
fn replace_html_breaks(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<br") {
        let start = cursor + found;
        let tag_rest = &text[start + 3..];
        let inner = tag_rest.trim_start();
        let inner = inner.strip_prefix('/').unwrap_or(inner);
        match inner.strip_prefix('>') {
            Some(after) => {
                out.push_str(&text[cursor..start]);
                out.push('\n');
                cursor = text.len() - after.len();
            }
            None => {
                out.push_str(&text[cursor..start + 3]);
                cursor = start + 3;
            }
        }
    }

    out.push_str(&text[cursor..]);
    out
}

/// Blank lines separate paragraphs; single line breaks inside one become spaces.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|block| {
            block
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    #[error("message must not be blank")]
    EmptyQuestion,
}

/// Asks the remote source first and falls back to keyword answers on failure.
pub struct AssistantService<S> {
    source: S,
    fallback: KeywordResponder,
}

impl AssistantService<NoRemote> {
    pub fn offline() -> Self {
        Self::new(NoRemote)
    }
}

impl AssistantService<Box<dyn AnswerSource>> {
    /// Uses the HTTP answer service at `endpoint`, or keyword answers only when unset.
    pub fn connect(endpoint: Option<&str>) -> Self {
        let source: Box<dyn AnswerSource> = match endpoint {
            Some(endpoint) => Box::new(HttpAnswerSource::new(endpoint)),
            None => Box::new(NoRemote),
        };
        Self::new(source)
    }
}

impl<S: AnswerSource> AssistantService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fallback: KeywordResponder,
        }
    }

    pub async fn ask(&self, question: &str) -> Result<AssistantReply, AssistantError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        match self.source.answer(question).await {
            Ok(raw) => {
                let reply = AssistantReply::remote(&raw);
                if reply.paragraphs.is_empty() {
                    warn!("remote answer was empty, using keyword fallback");
                    return Ok(self.fallback_reply(question));
                }
                debug!(
                    paragraphs = reply.paragraphs.len(),
                    "assistant answered from remote source"
                );
                Ok(reply)
            }
            Err(err) => {
                warn!(error = %err, "remote answer failed, using keyword fallback");
                Ok(self.fallback_reply(question))
            }
        }
    }

    fn fallback_reply(&self, question: &str) -> AssistantReply {
        AssistantReply::fallback(self.fallback.respond(question).to_string())
    }
}
