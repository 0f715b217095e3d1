//! Command-line entry point: ask the SlideShow AI service one question.
//!
//! ```bash
//! slideshow-ai "What is artificial intelligence?"
//! RUST_LOG=slideshow_ai=debug slideshow-ai --quiet --timeout 60 "Explain Rust"
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use slideshow_ai::options::TransportOptions;
use slideshow_ai::{SlideShowAi, API_URL};

const DEFAULT_QUERY: &str = "What is artificial intelligence?";

#[derive(Parser)]
#[command(name = "slideshow-ai")]
#[command(about = "Ask the SlideShow AI service a question and stream the answer")]
struct Cli {
    /// Query to send; words are joined with spaces
    query: Vec<String>,

    /// Service endpoint
    #[arg(long, env = "SLIDESHOW_AI_URL", default_value = API_URL)]
    endpoint: String,

    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// HTTP proxy URL
    #[arg(long)]
    proxy: Option<String>,

    /// Do not echo fragments while they stream in
    #[arg(short, long)]
    quiet: bool,

    /// Exit with a failure status when the request fails
    #[arg(long)]
    strict: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Logs go to stderr so they never mix with echoed text on stdout
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slideshow_ai=warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let query = if cli.query.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        cli.query.join(" ")
    };

    let mut transport = TransportOptions::new();
    if let Some(secs) = cli.timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }
    if let Some(proxy) = cli.proxy {
        transport = transport.with_proxy(proxy);
    }

    let slideshow = match SlideShowAi::with_transport(transport) {
        Ok(client) => client.with_endpoint(cli.endpoint),
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let echo = !cli.quiet;
    if cli.strict {
        match slideshow.try_chat(&query, echo).await {
            Ok(text) => println!("\nSlideShowAI: {}", text),
            Err(e) => {
                eprintln!("\nError: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        let text = slideshow.chat(&query, echo).await;
        println!("\nSlideShowAI: {}", text);
    }

    ExitCode::SUCCESS
}
