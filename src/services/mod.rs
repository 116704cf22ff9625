pub mod claude; // Anthropic messages API adapter
pub mod gemini; // Google Gemini generateContent adapter
pub mod parser;
pub mod vision;

pub use claude::{ClaudeModel, ClaudeVisionService};
pub use gemini::GeminiVisionService;
pub use vision::VisionService;
