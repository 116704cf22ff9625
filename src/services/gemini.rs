use anyhow::Result;
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use super::parser;
use super::vision::{VisionService, ANALYSIS_PROMPT};
use crate::models::AnalysisResult;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData { inline_data: Blob },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Gemini generateContent adapter. Decodes the image in memory first, so an
/// unreadable file fails here instead of on the provider side, then ships a
/// normalized PNG as inline data.
pub struct GeminiVisionService {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiVisionService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn try_analyze(&self, image_path: &str) -> Result<AnalysisResult> {
        if !Path::new(image_path).exists() {
            anyhow::bail!("Image file not found at {}", image_path);
        }

        log::debug!("📸 Starting Gemini image analysis for: {}", image_path);

        let image_data = fs::read(image_path)
            .map_err(|e| anyhow::anyhow!("Could not read image file {}: {}", image_path, e))?;
        let decoded = image::load_from_memory(&image_data)
            .map_err(|e| anyhow::anyhow!("Could not open image file {}: {}", image_path, e))?;

        // Re-encode the decoded frame so the wire format never depends on
        // whatever the upload happened to be.
        let mut png_bytes = Vec::new();
        decoded.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)?;
        let base64_image = general_purpose::STANDARD.encode(&png_bytes);

        log::debug!("🔄 Re-encoded decoded image as PNG: {} bytes", png_bytes.len());

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: "image/png".to_string(),
                            data: base64_image,
                        },
                    },
                    Part::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                ],
            }],
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Gemini API error response: {}", error_text);
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let generate_response: GenerateResponse = response.json().await?;
        let candidate = generate_response
            .candidates
            .first()
            .ok_or_else(|| anyhow::anyhow!("Gemini reply contained no candidates"))?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();

        log::debug!("💬 Gemini reply: {} bytes of text", text.len());

        Ok(parser::parse_analysis(&text))
    }
}

#[async_trait::async_trait]
impl VisionService for GeminiVisionService {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    // The variant selector only drives the Claude side; Gemini runs the one
    // model configured at startup.
    async fn analyze(&self, image_path: &str, _model_variant: &str) -> AnalysisResult {
        match self.try_analyze(image_path).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("❌ Gemini analysis failed: {:#}", e);
                AnalysisResult::failure(format!("Gemini analysis failed: {:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_becomes_an_error_result() {
        let service = GeminiVisionService::new("test_key".to_string(), "gemini-2.5-flash".to_string());
        let result = service.analyze("/definitely/not/here.png", "").await;
        assert!(result.is_error());
        assert!(result.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn undecodable_file_becomes_an_error_result() {
        let path = std::env::temp_dir().join("gemini-test-not-an-image.png");
        fs::write(&path, b"this is not a png").unwrap();

        let service = GeminiVisionService::new("test_key".to_string(), "gemini-2.5-flash".to_string());
        let result = service.analyze(path.to_str().unwrap(), "").await;

        let _ = fs::remove_file(&path);
        assert!(result.is_error());
        assert!(result.error.unwrap().contains("Could not open image file"));
    }
}
