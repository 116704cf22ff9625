use crate::models::AnalysisResult;

/// Extract one `AnalysisResult` from free-form model text.
///
/// Providers wrap their JSON in prose or markdown fences unpredictably, so
/// this tries increasingly desperate extractions and never fails: anything
/// unparseable comes back as `AnalysisResult::unknown()` so the caller always
/// has something to render.
pub fn parse_analysis(raw: &str) -> AnalysisResult {
    let text = raw.trim();

    // 1. The whole reply is a bare JSON object.
    if text.starts_with('{') && text.ends_with('}') {
        if let Ok(result) = serde_json::from_str::<AnalysisResult>(text) {
            return result;
        }
    }

    // 2. JSON inside a ``` / ```json fence. A fence that does not decode is
    //    final: we do not fall back to the brace scan for fenced replies.
    if let Some(inner) = fenced_block(text) {
        return match serde_json::from_str::<AnalysisResult>(inner.trim()) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("⚠️ Fenced block in model reply did not decode: {}", e);
                AnalysisResult::unknown()
            }
        };
    }

    // 3. Greedy scan: first '{' to last '}' buried in prose.
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(result) = serde_json::from_str::<AnalysisResult>(&text[start..=end]) {
                return result;
            }
        }
    }

    log::warn!("⚠️ Could not extract JSON from model reply, using unknown result");
    AnalysisResult::unknown()
}

/// Inner content of the first triple-backtick fence, minus an optional
/// `json` language tag. `None` when there is no complete fence.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let mut inner = &text[start + 3..];
    if let Some(rest) = inner.strip_prefix("json") {
        inner = rest;
    }
    let end = inner.find("```")?;
    Some(&inner[..end])
}
