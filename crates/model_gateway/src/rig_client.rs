//! Rig LLM client adapter.
//!
//! Wraps Rig's Agent for integration with our LlmClient trait.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use causalflow_core::config::ModelGatewayConfig;
use causalflow_core::{
    traits::{ChatMessage, LlmClient, LlmResponse, LlmUsage},
    Error, Result,
};

// Import required Rig traits
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;

/// Provider type for Rig clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigProvider {
    OpenAI,
    Anthropic,
}

/// Configuration for Rig client.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Provider to use.
    pub provider: RigProvider,
    /// Model name.
    pub model: String,
    /// System prompt.
    pub system_prompt: Option<String>,
    /// Temperature (0.0 - 1.0).
    pub temperature: Option<f32>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            temperature: Some(0.2),
        }
    }
}

impl RigConfig {
    /// Create config for OpenAI.
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for Anthropic.
    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::Anthropic,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Rig-based LLM client.
///
/// Wraps Rig's provider clients to implement our LlmClient trait, giving the
/// agents one interface across providers.
pub struct RigLlmClient {
    config: RigConfig,
}

impl RigLlmClient {
    /// Create a new Rig client with the given configuration.
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    /// Build chat messages into a prompt string.
    fn build_prompt(&self, messages: &[ChatMessage]) -> String {
        let mut prompt = String::new();

        for msg in messages {
            match msg.role.as_str() {
                "system" => {
                    prompt.push_str(&format!("System: {}\n\n", msg.content));
                }
                "user" => {
                    prompt.push_str(&format!("User: {}\n\n", msg.content));
                }
                "assistant" => {
                    prompt.push_str(&format!("Assistant: {}\n\n", msg.content));
                }
                _ => {
                    prompt.push_str(&format!("{}: {}\n\n", msg.role, msg.content));
                }
            }
        }

        prompt
    }

    /// Call OpenAI via Rig.
    async fn call_openai(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::openai;

        // Check env var first to avoid panic
        if std::env::var("OPENAI_API_KEY").is_err() {
            return Err(Error::ModelProvider("OPENAI_API_KEY not set".to_string()));
        }

        let client = openai::Client::from_env();

        let mut agent_builder = client.agent(&self.config.model);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }

        let agent = agent_builder.build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::ModelProvider(format!("OpenAI error: {}", e)))?;

        Ok(self.to_response(prompt, response))
    }

    /// Call Anthropic via Rig.
    async fn call_anthropic(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::anthropic;

        // Check env var first to avoid panic
        if std::env::var("ANTHROPIC_API_KEY").is_err() {
            return Err(Error::ModelProvider("ANTHROPIC_API_KEY not set".to_string()));
        }

        let client = anthropic::Client::from_env();

        let mut agent_builder = client.agent(&self.config.model);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }

        let agent = agent_builder.build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::ModelProvider(format!("Anthropic error: {}", e)))?;

        Ok(self.to_response(prompt, response))
    }

    fn to_response(&self, prompt: &str, content: String) -> LlmResponse {
        LlmResponse {
            finish_reason: "stop".to_string(),
            usage: LlmUsage {
                prompt_tokens: (prompt.len() / 4) as u64,
                completion_tokens: (content.len() / 4) as u64,
                total_tokens: ((prompt.len() + content.len()) / 4) as u64,
            },
            content,
        }
    }
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Calling LLM"
        );

        match self.config.provider {
            RigProvider::OpenAI => self.call_openai(prompt).await,
            RigProvider::Anthropic => self.call_anthropic(prompt).await,
        }
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmResponse> {
        let prompt = self.build_prompt(messages);
        self.complete(&prompt).await
    }
}

/// Create an LLM client from the gateway configuration.
///
/// API keys supplied through configuration are exported to the process
/// environment for the provider SDK; otherwise the existing environment is
/// used as-is.
pub fn create_default_client(config: &ModelGatewayConfig) -> Result<RigLlmClient> {
    if let Some(key) = &config.openai_api_key {
        std::env::set_var("OPENAI_API_KEY", key.expose_secret());
    }
    if let Some(key) = &config.anthropic_api_key {
        std::env::set_var("ANTHROPIC_API_KEY", key.expose_secret());
    }

    let rig_config = match config.default_provider.as_str() {
        "anthropic" => RigConfig::anthropic(&config.model),
        _ => RigConfig::openai(&config.model),
    };

    let has_key = match rig_config.provider {
        RigProvider::OpenAI => std::env::var("OPENAI_API_KEY").is_ok(),
        RigProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").is_ok(),
    };
    if !has_key {
        return Err(Error::model_provider(
            "no API key found; set OPENAI_API_KEY or ANTHROPIC_API_KEY",
        ));
    }

    Ok(RigLlmClient::new(rig_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RigConfig::openai("gpt-4o")
            .with_system_prompt("You are a causal reasoning assistant")
            .with_temperature(0.5);

        assert_eq!(config.provider, RigProvider::OpenAI);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(
            config.system_prompt,
            Some("You are a causal reasoning assistant".to_string())
        );
        assert_eq!(config.temperature, Some(0.5));
    }

    #[test]
    fn test_build_prompt() {
        let client = RigLlmClient::new(RigConfig::default());

        let messages = vec![
            ChatMessage::system("You are helpful"),
            ChatMessage::user("Does rain cause traffic?"),
        ];

        let prompt = client.build_prompt(&messages);
        assert!(prompt.contains("System: You are helpful"));
        assert!(prompt.contains("User: Does rain cause traffic?"));
    }
}
