//! `unichat` command line front end

use std::io::Write;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use futures::StreamExt;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use unichat::prelude::*;
use unichat::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

#[derive(Parser, Debug)]
#[command(name = "unichat", version, about = "Unified LLM client")]
struct Cli {
    /// Model identifier, e.g. gpt-4o, claude-sonnet-4-20250514, ollama/llama3
    #[arg()]
    model: Option<String>,
    /// User prompt
    #[arg()]
    prompt: Option<String>,
    /// System prompt
    #[arg(long, short = 's')]
    system: Option<String>,
    #[arg(long, short = 't', default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,
    #[arg(long, short = 'm', default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,
    /// Stream output
    #[arg(long)]
    stream: bool,
    /// Compare comma-separated models
    #[arg(long, value_delimiter = ',')]
    compare: Option<Vec<String>>,
    /// Request JSON output (OpenAI only)
    #[arg(long)]
    json: bool,
    /// List Ollama models
    #[arg(long)]
    list_ollama: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, LlmError> {
    let client = LlmClient::new();

    if cli.list_ollama {
        let models = client.list_local_models().await?;
        println!("Available Ollama models:");
        for model in models {
            println!("  - {model}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(models) = &cli.compare {
        // With a single positional argument it is the prompt.
        let Some(prompt) = cli.prompt.as_ref().or(cli.model.as_ref()) else {
            eprintln!("Error: prompt required for comparison");
            return Ok(ExitCode::FAILURE);
        };
        let template = ChatRequest::new("", prompt.as_str())
            .with_optional_system(cli.system.clone())
            .with_temperature(cli.temperature)
            .with_max_tokens(cli.max_tokens);
        let models = models
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty());

        let banner = "=".repeat(60);
        client
            .compare_with(models, &template, |outcome| {
                println!("\n{banner}\nModel: {}\n{banner}", outcome.model);
                match &outcome.outcome {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            })
            .await;
        return Ok(ExitCode::SUCCESS);
    }

    let (Some(model), Some(prompt)) = (cli.model.as_deref(), cli.prompt.as_deref()) else {
        // Printing help only fails if stdout is gone.
        let _ = Cli::command().print_help();
        return Ok(ExitCode::FAILURE);
    };

    let mut request = ChatRequest::new(model, prompt)
        .with_optional_system(cli.system.clone())
        .with_temperature(cli.temperature)
        .with_max_tokens(cli.max_tokens);
    if cli.json {
        request = request.with_json_output();
    }

    if cli.stream {
        let mut stream = client.stream(&request).await?;
        let mut stdout = std::io::stdout();
        while let Some(fragment) = stream.next().await {
            print!("{}", fragment?);
            stdout
                .flush()
                .map_err(|e| LlmError::StreamError(format!("Failed to write output: {e}")))?;
        }
        println!();
    } else {
        println!("{}", client.chat(&request).await?);
    }
    Ok(ExitCode::SUCCESS)
}
