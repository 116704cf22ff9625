mod handlers;
mod models;
mod services;
#[cfg(feature = "web-server")]
mod web;

use anyhow::Result;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;

use handlers::{comparison, AnalysisDispatcher};
use services::{ClaudeModel, ClaudeVisionService, GeminiVisionService, VisionService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    log::info!("🚀 Starting AI Food Analyzer...");

    // Load configuration
    let claude_api_key = env::var("CLAUDE_API_KEY")
        .expect("CLAUDE_API_KEY must be set in .env file");
    let gemini_api_key = env::var("GEMINI_API_KEY")
        .expect("GEMINI_API_KEY must be set in .env file");

    let claude_model = env::var("CLAUDE_MODEL")
        .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string());
    ClaudeModel::from_string(&claude_model)
        .expect("CLAUDE_MODEL must be one of the allow-listed Claude variants");

    let gemini_model = env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| "gemini-2.5-flash".to_string());

    let claude = Arc::new(ClaudeVisionService::new(claude_api_key)) as Arc<dyn VisionService>;
    log::info!("✅ Claude service initialized (default model: {})", claude_model);

    let gemini =
        Arc::new(GeminiVisionService::new(gemini_api_key, gemini_model.clone())) as Arc<dyn VisionService>;
    log::info!("✅ Gemini service initialized (model: {})", gemini_model);

    let dispatcher = Arc::new(AnalysisDispatcher::new(claude, gemini));
    log::info!("✅ Analysis dispatcher initialized");

    // One-shot mode: analyze a file given on the command line, print the
    // same JSON payload the web endpoint returns, and exit.
    if let Some(image_path) = env::args().nth(1) {
        let (claude_result, gemini_result) = dispatcher.run_both(&image_path, &claude_model).await;
        let comparison_table = comparison::assemble(&claude_result, &gemini_result);
        let payload = serde_json::json!({
            "claude": claude_result,
            "gemini": gemini_result,
            "comparison": comparison_table,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    #[cfg(feature = "web-server")]
    {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let app = web::create_router(dispatcher.clone(), claude_model.clone());

        log::info!("🌐 Web server starting on {}", bind_addr);

        let server_addr = bind_addr.clone();
        tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&server_addr)
                .await
                .expect("Failed to bind web server");
            axum::serve(listener, app)
                .await
                .expect("Failed to start web server");
        });

        log::info!("✅ Web server started");

        println!("\n🍽️ AI Food Analyzer is running!");
        println!("🌐 Upload page: http://{}", bind_addr);
        println!("🤖 Claude model: {}", claude_model);
        println!("🤖 Gemini model: {}", gemini_model);
        println!("\n🛑 Press Ctrl+C to stop\n");

        // Keep running
        tokio::signal::ctrl_c().await?;

        log::info!("🛑 Shutting down...");
    }

    #[cfg(not(feature = "web-server"))]
    println!("Built without the web-server feature. Usage: food-vision-compare <image-path>");

    Ok(())
}
