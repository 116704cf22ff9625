use std::sync::Arc;

use crate::models::AnalysisResult;
use crate::services::VisionService;

/// Runs both provider adapters against the same image concurrently.
///
/// The two calls are fault-isolated: each surfaces its own `error` field and
/// neither can block or corrupt the other's result. The returned tuple is
/// always (Claude, Gemini), no matter which call finishes first.
pub struct AnalysisDispatcher {
    claude: Arc<dyn VisionService>,
    gemini: Arc<dyn VisionService>,
}

impl AnalysisDispatcher {
    pub fn new(claude: Arc<dyn VisionService>, gemini: Arc<dyn VisionService>) -> Self {
        Self { claude, gemini }
    }

    pub async fn run_both(
        &self,
        image_path: &str,
        model_variant: &str,
    ) -> (AnalysisResult, AnalysisResult) {
        log::info!("🔀 Dispatching {} to both providers", image_path);

        let claude_task = {
            let service = self.claude.clone();
            let path = image_path.to_string();
            let variant = model_variant.to_string();
            tokio::spawn(async move { service.analyze(&path, &variant).await })
        };
        let gemini_task = {
            let service = self.gemini.clone();
            let path = image_path.to_string();
            let variant = model_variant.to_string();
            tokio::spawn(async move { service.analyze(&path, &variant).await })
        };

        // Synchronous barrier: both tasks run to completion before the pair
        // is returned. Awaiting in sequence fixes the tuple order.
        let claude_result = join_task(self.claude.name(), claude_task.await);
        let gemini_result = join_task(self.gemini.name(), gemini_task.await);

        (claude_result, gemini_result)
    }
}

fn join_task(
    provider: &str,
    joined: Result<AnalysisResult, tokio::task::JoinError>,
) -> AnalysisResult {
    match joined {
        Ok(result) => result,
        Err(e) => {
            log::error!("❌ {} analysis task died: {}", provider, e);
            AnalysisResult::failure(format!("{} analysis task died: {}", provider, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FakeVision {
        name: &'static str,
        delay_ms: u64,
        result: AnalysisResult,
    }

    #[async_trait::async_trait]
    impl VisionService for FakeVision {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn analyze(&self, _image_path: &str, _model_variant: &str) -> AnalysisResult {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            self.result.clone()
        }
    }

    struct PanickingVision;

    #[async_trait::async_trait]
    impl VisionService for PanickingVision {
        fn name(&self) -> &'static str {
            "Panicking"
        }

        async fn analyze(&self, _image_path: &str, _model_variant: &str) -> AnalysisResult {
            panic!("adapter blew up");
        }
    }

    fn tagged(cuisine: &str) -> AnalysisResult {
        AnalysisResult {
            overall_cuisine_type: Some(cuisine.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn results_keep_provider_order_when_second_finishes_first() {
        let dispatcher = AnalysisDispatcher::new(
            Arc::new(FakeVision {
                name: "Claude",
                delay_ms: 80,
                result: tagged("from-claude"),
            }),
            Arc::new(FakeVision {
                name: "Gemini",
                delay_ms: 0,
                result: tagged("from-gemini"),
            }),
        );

        let (claude, gemini) = dispatcher.run_both("/tmp/meal.png", "variant").await;
        assert_eq!(claude.overall_cuisine_type.as_deref(), Some("from-claude"));
        assert_eq!(gemini.overall_cuisine_type.as_deref(), Some("from-gemini"));
    }

    #[tokio::test]
    async fn one_failed_side_leaves_the_other_untouched() {
        let dispatcher = AnalysisDispatcher::new(
            Arc::new(FakeVision {
                name: "Claude",
                delay_ms: 0,
                result: AnalysisResult::failure("Claude analysis failed: timeout"),
            }),
            Arc::new(FakeVision {
                name: "Gemini",
                delay_ms: 20,
                result: tagged("from-gemini"),
            }),
        );

        let (claude, gemini) = dispatcher.run_both("/tmp/meal.png", "variant").await;
        assert!(claude.is_error());
        assert!(!gemini.is_error());
        assert_eq!(gemini.overall_cuisine_type.as_deref(), Some("from-gemini"));
    }

    #[tokio::test]
    async fn panicking_adapter_folds_into_an_error_result() {
        let dispatcher = AnalysisDispatcher::new(
            Arc::new(PanickingVision),
            Arc::new(FakeVision {
                name: "Gemini",
                delay_ms: 0,
                result: tagged("from-gemini"),
            }),
        );

        let (claude, gemini) = dispatcher.run_both("/tmp/meal.png", "variant").await;
        assert!(claude.is_error());
        assert!(claude.error.unwrap().contains("task died"));
        assert_eq!(gemini.overall_cuisine_type.as_deref(), Some("from-gemini"));
    }
}
