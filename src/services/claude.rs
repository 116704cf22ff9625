use anyhow::Result;
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::parser;
use super::vision::{VisionService, ANALYSIS_PROMPT};
use crate::models::AnalysisResult;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Allow-listed Claude model variants the UI can select between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeModel {
    Claude3Haiku,
    Claude35Haiku,
}

impl ClaudeModel {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim() {
            "claude-3-haiku-20240307" => Some(ClaudeModel::Claude3Haiku),
            "claude-3-5-haiku-20241022" => Some(ClaudeModel::Claude35Haiku),
            _ => None,
        }
    }

    pub fn api_id(&self) -> &'static str {
        match self {
            ClaudeModel::Claude3Haiku => "claude-3-haiku-20240307",
            ClaudeModel::Claude35Haiku => "claude-3-5-haiku-20241022",
        }
    }
}

impl std::fmt::Display for ClaudeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_id())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentBlock {
    Text {
        #[serde(rename = "type")]
        block_type: String,
        text: String,
    },
    Image {
        #[serde(rename = "type")]
        block_type: String,
        source: ImageSource,
    },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    text: String,
}

/// Anthropic messages-API adapter. The image rides base64-inlined in a
/// chat-style content block.
pub struct ClaudeVisionService {
    api_key: String,
    client: reqwest::Client,
}

impl ClaudeVisionService {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn try_analyze(&self, image_path: &str, model_variant: &str) -> Result<AnalysisResult> {
        let model = ClaudeModel::from_string(model_variant)
            .ok_or_else(|| anyhow::anyhow!("Unknown Claude model variant: {}", model_variant))?;

        if !Path::new(image_path).exists() {
            anyhow::bail!("Image file not found at {}", image_path);
        }

        log::debug!("📸 Starting Claude image analysis for: {}", image_path);

        let image_data = fs::read(image_path)
            .map_err(|e| anyhow::anyhow!("Could not read image file {}: {}", image_path, e))?;
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        log::debug!("🔄 Base64 encoded size: {} bytes", base64_image.len());

        let request = MessagesRequest {
            model: model.api_id().to_string(),
            max_tokens: 500,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Text {
                        block_type: "text".to_string(),
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    ContentBlock::Image {
                        block_type: "image".to_string(),
                        source: ImageSource {
                            source_type: "base64".to_string(),
                            media_type: media_type_for(image_path).to_string(),
                            data: base64_image,
                        },
                    },
                ],
            }],
        };

        log::info!("🤖 Sending request to Anthropic with model: {}", model);

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Anthropic response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Anthropic API error response: {}", error_text);
            anyhow::bail!("Anthropic API error ({}): {}", status, error_text);
        }

        let messages_response: MessagesResponse = response.json().await?;
        let text = messages_response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| anyhow::anyhow!("Anthropic reply contained no content blocks"))?;

        log::debug!("💬 Claude reply: {} bytes of text", text.len());

        Ok(parser::parse_analysis(&text))
    }
}

#[async_trait::async_trait]
impl VisionService for ClaudeVisionService {
    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn analyze(&self, image_path: &str, model_variant: &str) -> AnalysisResult {
        match self.try_analyze(image_path, model_variant).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("❌ Claude analysis failed: {:#}", e);
                AnalysisResult::failure(format!("Claude analysis failed: {:#}", e))
            }
        }
    }
}

fn media_type_for(image_path: &str) -> &'static str {
    if image_path.ends_with(".png") {
        "image/png"
    } else if image_path.ends_with(".jpg") || image_path.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "image/jpeg" // default
    }
}
