//! LLM API client abstraction for OpenAI, Anthropic and Gemini.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client as OpenAIClient,
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
    /// Google (Gemini models).
    Gemini,
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// JSON schema the reply must conform to.
///
/// Providers with native structured output receive the schema; the others
/// only get the instructions in the prompt.
#[derive(Debug, Clone)]
pub struct ReplySchema {
    /// Schema name (OpenAI requires one).
    pub name: String,
    /// JSON schema document.
    pub schema: serde_json::Value,
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        self.generate_structured(system_prompt, user_message, None)
            .await
    }

    /// Generates a completion, asking for JSON matching `schema` where the
    /// provider supports it.
    #[instrument(skip(self, system_prompt, user_message, schema), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate_structured(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&ReplySchema>,
    ) -> Result<String, LlmError> {
        debug!(structured = schema.is_some(), "Generating completion");
        match self.config.provider {
            LlmProvider::OpenAI => {
                self.generate_openai(system_prompt, user_message, schema)
                    .await
            }
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await,
            LlmProvider::Gemini => {
                self.generate_gemini(system_prompt, user_message, schema)
                    .await
            }
        }
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });

        debug!("Sending request to Anthropic");
        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Anthropic API request failed");
                LlmError::new(format!("Anthropic API request failed: {}", e))
            })?;

        let response_json = read_json_response("Anthropic", response).await?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Google Gemini.
    #[instrument(skip(self, system_prompt, user_message, schema))]
    async fn generate_gemini(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&ReplySchema>,
    ) -> Result<String, LlmError> {
        debug!("Building Gemini API request");
        let mut generation_config = serde_json::json!({
            "maxOutputTokens": self.config.max_tokens,
        });
        if let Some(schema) = schema {
            generation_config["responseMimeType"] = "application/json".into();
            generation_config["responseSchema"] = gemini_schema(&schema.schema);
        }

        let request_body = serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": system_prompt }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user_message }]
                }
            ],
            "generationConfig": generation_config,
        });

        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, self.config.model);

        debug!("Sending request to Gemini");
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.config.api_key.clone())
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Gemini API request failed");
                LlmError::new(format!("Gemini API request failed: {}", e))
            })?;

        let response_json = read_json_response("Gemini", response).await?;

        let content = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Gemini response");
                LlmError::new("No text content in Gemini response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using OpenAI.
    #[instrument(skip(self, system_prompt, user_message, schema))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&ReplySchema>,
    ) -> Result<String, LlmError> {
        debug!("Creating OpenAI client");

        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key.clone()),
        );

        debug!("Building chat completion request");
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| {
                        error!(error = ?e, "Failed to build system message");
                        LlmError::new(format!("Failed to build system message: {}", e))
                    })?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| {
                        error!(error = ?e, "Failed to build user message");
                        LlmError::new(format!("Failed to build user message: {}", e))
                    })?,
            ),
        ];

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.config.model)
            .messages(messages)
            .max_completion_tokens(self.config.max_tokens);
        if let Some(schema) = schema {
            builder.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: schema.name.clone(),
                    schema: Some(schema.schema.clone()),
                    strict: None,
                },
            });
        }
        let request = builder.build().map_err(|e| {
            error!(error = ?e, "Failed to build request");
            LlmError::new(format!("Failed to build request: {}", e))
        })?;

        debug!("Sending request to OpenAI");
        let response = client.chat().create(request).await.map_err(|e| {
            error!(error = ?e, "OpenAI API error");
            LlmError::new(format!("OpenAI API error: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("No content in OpenAI response");
                LlmError::new("No content in OpenAI response".to_string())
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

/// Reads a response body, failing on non-success status or invalid JSON.
async fn read_json_response(
    provider: &str,
    response: reqwest::Response,
) -> Result<serde_json::Value, LlmError> {
    let status = response.status();
    let response_text = response.text().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to read response");
        LlmError::new(format!("Failed to read response: {}", e))
    })?;

    if !status.is_success() {
        error!(provider, status = %status, response = %response_text, "API error");
        return Err(LlmError::new(format!(
            "{} API error {}: {}",
            provider, status, response_text
        )));
    }

    debug!(provider, response_length = response_text.len(), "Parsing response");
    serde_json::from_str(&response_text).map_err(|e| {
        error!(provider, error = ?e, response = %response_text, "Failed to parse response");
        LlmError::new(format!("Failed to parse response: {}", e))
    })
}

/// Converts a JSON schema into the OpenAPI subset Gemini accepts.
///
/// Keeps `type`, `properties`, `required`, `items`, `enum` and
/// `description`; type names are upper-cased.
pub fn gemini_schema(schema: &serde_json::Value) -> serde_json::Value {
    use serde_json::{Map, Value};

    let Value::Object(fields) = schema else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in fields {
        match key.as_str() {
            "type" => {
                let name = match value {
                    Value::String(name) => Some(name.as_str()),
                    // `["integer", "null"]` style unions keep the first non-null type.
                    Value::Array(names) => names
                        .iter()
                        .filter_map(Value::as_str)
                        .find(|name| *name != "null"),
                    _ => None,
                };
                if let Some(name) = name {
                    out.insert(key.clone(), Value::String(name.to_uppercase()));
                }
            }
            "properties" => {
                if let Value::Object(props) = value {
                    let props = props
                        .iter()
                        .map(|(name, prop)| (name.clone(), gemini_schema(prop)))
                        .collect();
                    out.insert(key.clone(), Value::Object(props));
                }
            }
            "items" => {
                out.insert(key.clone(), gemini_schema(value));
            }
            "required" | "enum" | "description" => {
                out.insert(key.clone(), value.clone());
            }
            _ => {}
        }
    }
    Value::Object(out)
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_names() {
        let provider: LlmProvider = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(provider, LlmProvider::Gemini);
        assert_eq!(serde_json::to_string(&LlmProvider::OpenAI).unwrap(), "\"openai\"");
    }

    #[test]
    fn test_gemini_schema_strips_unsupported_keys() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "SuggestedMove",
            "type": "object",
            "required": ["r", "c"],
            "properties": {
                "r": { "type": "integer", "format": "int64" },
                "c": { "type": ["integer", "null"] }
            },
            "additionalProperties": false
        });

        assert_eq!(
            gemini_schema(&schema),
            json!({
                "type": "OBJECT",
                "required": ["r", "c"],
                "properties": {
                    "r": { "type": "INTEGER" },
                    "c": { "type": "INTEGER" }
                }
            })
        );
    }
}
