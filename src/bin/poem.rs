use clap::Parser;
use crypto_analyst::config::load_config;
use crypto_analyst::llm::OpenAiCompatClient;
use crypto_analyst::poem::PoemWriter;
use crypto_analyst::utils::{build_http_client, init_logging};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// Writes a humorous poem about a word using the configured model.
#[derive(Debug, Parser)]
#[command(name = "poem", version)]
struct Args {
    /// Word or phrase the poem is about
    #[arg(default_value = "mahinda rajapaksha")]
    word: String,

    /// Model identifier; overrides ANALYST_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match build_http_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let provider = Arc::new(OpenAiCompatClient::new(
        client,
        config.openrouter_url,
        config.openrouter_key,
    ));
    let writer = PoemWriter::new(provider, args.model.unwrap_or(config.model));

    match writer.write_poem(&args.word).await {
        Ok(poem) => {
            println!("{poem}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Poem generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
