use crate::config::AppConfig;
use crate::error::ProviderError;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use log::debug;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// A text-completion model reachable over the network.
#[rocket::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a single user message and return the first text block of the answer.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;

    fn model_id(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Claude on AWS Bedrock through the `InvokeModel` runtime API.
pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    /// Credentials come from the default AWS provider chain (env vars, profile, role).
    pub async fn new(config: &AppConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            model_id: config.bedrock_model_id.clone(),
        }
    }
}

#[rocket::async_trait]
impl LanguageModel for BedrockClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        let body = encode_request(prompt, max_tokens)?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| ProviderError::Aws(DisplayErrorContext(&e).to_string()))?;

        let text = decode_response(response.body().as_ref())?;
        debug!("Bedrock returned {} characters", text.chars().count());
        Ok(text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn encode_request(prompt: &str, max_tokens: u32) -> Result<Vec<u8>, ProviderError> {
    let request = MessagesRequest {
        anthropic_version: ANTHROPIC_VERSION,
        max_tokens,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
    };
    Ok(serde_json::to_vec(&request)?)
}

fn decode_response(body: &[u8]) -> Result<String, ProviderError> {
    let response: MessagesResponse = serde_json::from_slice(body)?;
    response
        .content
        .into_iter()
        .filter(|block| block.kind.as_deref().map_or(true, |kind| kind == "text"))
        .find_map(|block| block.text)
        .ok_or_else(|| ProviderError::InvalidResponse("no text content in model output".into()))
}
