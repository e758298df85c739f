use async_trait::async_trait;

use crate::application::ports::{
    GenerativeModel, GenerativeModelError, PromptMessage, PromptRole,
};

/// Deterministic test double: replies with the last user message, prefixed
/// by a reasoning block so callers can verify stripping.
pub struct EchoGenerativeModel;

#[async_trait]
impl GenerativeModel for EchoGenerativeModel {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, GenerativeModelError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == PromptRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        Ok(format!(
            "<think>condensing {} characters</think>\n{}",
            last_user.len(),
            last_user
        ))
    }
}

/// Test double that always fails, for exercising degraded paths.
pub struct FailingGenerativeModel;

#[async_trait]
impl GenerativeModel for FailingGenerativeModel {
    async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, GenerativeModelError> {
        Err(GenerativeModelError::ApiRequestFailed(
            "connection refused".to_string(),
        ))
    }
}
