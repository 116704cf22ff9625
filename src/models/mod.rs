use serde::{Deserialize, Serialize};

/// One detected food in the photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub estimated_quantities: Option<String>,  // free text, e.g. "one slice"
    #[serde(default)]
    pub cooking_method: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
}

/// Canonical analysis produced by either provider.
///
/// Either `error` is set and the data fields are meaningless, or `error` is
/// `None` and the (possibly sparse) data fields are real. Missing fields
/// render as "N/A" / 0.00 downstream, never as a crash.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
    #[serde(default)]
    pub overall_cuisine_type: Option<String>,
    #[serde(default)]
    pub overall_cooking_method: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,  // 0.0 - 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Result for an adapter-level failure (bad input file, transport error,
    /// provider-side error). Data fields stay empty.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Sentinel for model output nothing could be parsed from. Not an error:
    /// the UI shows it as an all-defaults table.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One row of the side-by-side view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub attribute: String,
    pub claude: String,
    pub gemini: String,
}

/// Row-oriented comparison of two error-free analyses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}
