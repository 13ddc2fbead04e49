//! Basic Gemini client usage example

use gemini_client::{GeminiClient, GenerateRequest, GenerationConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("GOOGLE_AI_KEY")?;
    let client = GeminiClient::new();

    // Model listing
    println!("=== Models ===");
    let models = client.list_models(&api_key).await?;
    for model in models
        .iter()
        .filter(|m| m.supports_generate_content())
        .take(5)
    {
        println!("{}", model.name);
    }

    // JSON-mode content generation
    println!("\n=== Content Generation ===");
    let response = client
        .generate_content(
            "models/gemini-2.0-flash-lite",
            &api_key,
            GenerateRequest::from_prompt(
                "Return a JSON object with keys \"city\" and \"state\" for the largest city in Minnesota.",
            )
            .with_config(GenerationConfig::json_output(256)),
        )
        .await?;

    println!("Response: {}", response.text);
    if let Some(usage) = response.usage {
        println!("Tokens billed: {}", usage.total_token_count);
    }

    Ok(())
}
