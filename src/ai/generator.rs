use async_trait::async_trait;
use thiserror::Error;

/// A system/user message pair sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No backend configured
    #[error("text generation is not configured")]
    NotConfigured,
    /// Request could not be sent or the response not read
    #[error("request failed: {0}")]
    Transport(String),
    /// Backend answered with a non-success status
    #[error("backend returned status {0}")]
    Status(u16),
    /// Backend answered without usable content
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Produces a JSON document as text in answer to a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GeneratorError>;
}

/// Stands in when no backend is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl Generator for DisabledGenerator {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, GeneratorError> {
        Err(GeneratorError::NotConfigured)
    }
}
