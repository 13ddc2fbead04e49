//! Run the full extraction chain over a rate confirmation text file.
//!
//! The document goes through the standard strategy order: Gemini with
//! credential rotation, then the pattern table, then the static sample
//! record. Whatever happens upstream, a canonical record prints.
//!
//! ```bash
//! GOOGLE_AI_KEYS=key1,key2 cargo run --example rate_confirmation \
//!     --features gemini -- confirmation.txt 50
//! ```

use gemini_client::GeminiClient;
use ratecon_extraction::providers::{GeminiModel, GeminiResolver};
use ratecon_extraction::{ExtractionRequest, KeyPool, Orchestrator, PipelineConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: rate_confirmation <text-file> [deadhead-miles]");
        std::process::exit(2);
    };
    let deadhead: f64 = args
        .next()
        .map(|miles| miles.parse::<f64>())
        .transpose()?
        .unwrap_or(0.0);

    let text = std::fs::read_to_string(&path)?;

    let config = PipelineConfig::from_env();
    let pool = KeyPool::new(config.api_keys.clone(), config.pool.clone());

    let client = GeminiClient::new();
    let resolver = match &config.preferred_model {
        Some(model) => GeminiResolver::new(client.clone()).with_preferred(model.clone()),
        None => GeminiResolver::new(client.clone()),
    };
    let orchestrator = Orchestrator::standard_with_config(
        GeminiModel::new(client),
        resolver,
        pool.clone(),
        &config,
    );

    let record = orchestrator
        .extract(&ExtractionRequest::new(text).with_deadhead(deadhead))
        .await?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    println!("\n=== Credential Pool ===");
    for cred in pool.snapshot() {
        println!(
            "{} {:?} requests={} tokens={} errors={}",
            cred.label, cred.status, cred.requests, cred.tokens, cred.consecutive_errors
        );
    }

    Ok(())
}
