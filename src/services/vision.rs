use crate::models::AnalysisResult;

/// Instruction sent to every provider. Asks for the one JSON shape the
/// parser and the comparison view understand.
pub(crate) const ANALYSIS_PROMPT: &str = r#"Analyze the food in this image and provide a detailed JSON response.
Identify the following:
1. food_items: A list of all food items present.
2. estimated_quantities: Estimated portion size for each food item (e.g., "one serving," "a slice," "a cup").
3. cooking_method: The apparent cooking method (e.g., "fried," "boiled," "baked"). If not clear, state "not apparent."
4. cuisine_type: The likely cuisine (e.g., "Italian," "Mexican," "Indian"). If not clear, state "not apparent."
5. confidence_score: A high-level confidence score (from 0.0 to 1.0) for the overall analysis.

Format the response as a single, valid JSON object.
```json
{
  "food_items": [
    {
      "item": "",
      "estimated_quantities": "",
      "cooking_method": "",
      "cuisine_type": ""
    }
  ],
  "overall_cuisine_type": "",
  "overall_cooking_method": "",
  "confidence_score": 0.0
}
```"#;

/// Trait for multimodal food-vision providers (Claude, Gemini, etc.)
#[async_trait::async_trait]
pub trait VisionService: Send + Sync {
    /// Provider name used in logs and task bookkeeping.
    fn name(&self) -> &'static str;

    /// Analyze one food photo. Infallible by contract: bad input files,
    /// transport failures and provider errors all come back as a result
    /// with `error` set, never as a panic or an `Err`.
    async fn analyze(&self, image_path: &str, model_variant: &str) -> AnalysisResult;
}
