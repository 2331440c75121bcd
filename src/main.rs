use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use idea_forge::{
    IdeaGenerator,
    clients::build_idea_source,
    config::Config,
    http::{HttpState, start_http_server},
    store,
};
use tracing::{error, info};

/// Research idea generator built on extracted paper innovations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate ideas from saved innovation sets
    Generate {
        /// Research topic
        #[arg(short, long)]
        topic: String,
        /// Directory holding *_innovations.json files
        #[arg(short, long)]
        input_dir: Option<PathBuf>,
        /// Directory for the result file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Run the HTTP API
    Serve {
        /// Listen address, e.g. 127.0.0.1:8000
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Create data directories and a template .env
    Setup,
}

const ENV_TEMPLATE: &str = "# Language model provider: deepseek | openai | anthropic | none
AI_PROVIDER=deepseek
DEEPSEEK_API_KEY=your_deepseek_api_key_here

RUST_LOG=idea_forge=info
";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(config.runtime.log_level.as_str())
        .init();

    match cli.command {
        Command::Generate {
            topic,
            input_dir,
            output_dir,
        } => generate(&config, &topic, input_dir, output_dir).await,
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Setup => setup(&config),
    }
}

fn build_generator(config: &Config) -> IdeaGenerator {
    let source = build_idea_source(&config.provider);
    IdeaGenerator::new(config.generation.clone(), source)
}

async fn generate(
    config: &Config,
    topic: &str,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let input_dir = input_dir.unwrap_or_else(|| config.storage.innovations_dir.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.storage.results_dir.clone());

    info!("Generating ideas for topic: {}", topic);
    let sets = store::load_innovation_sets(&input_dir)?;
    if sets.is_empty() {
        error!("No innovation files found in {}", input_dir.display());
    }

    let generator = build_generator(config);
    let Some(result) = generator.generate(&sets, topic).await else {
        anyhow::bail!("no innovation points found, nothing to generate from");
    };

    for (rank, idea) in result.generated_ideas.iter().enumerate() {
        info!(
            "{}. {} [{}] impact={:.2}",
            rank + 1,
            idea.title,
            idea.combination_type,
            idea.impact_potential
        );
    }
    info!("{}", result.analysis_summary.trim_end());

    let path = store::save_result(&result, &output_dir)?;
    println!("{}", path.display());
    Ok(())
}

async fn serve(config: &Config, bind: Option<std::net::SocketAddr>) -> Result<()> {
    let state = HttpState {
        generator: Arc::new(build_generator(config)),
        results_dir: config.storage.results_dir.clone(),
    };
    start_http_server(state, bind.unwrap_or(config.server.bind)).await
}

fn setup(config: &Config) -> Result<()> {
    for dir in [&config.storage.innovations_dir, &config.storage.results_dir] {
        std::fs::create_dir_all(dir)?;
        info!("Created directory: {}", dir.display());
    }

    let env_file = PathBuf::from(".env");
    if !env_file.exists() {
        std::fs::write(&env_file, ENV_TEMPLATE)?;
        info!("Created config file: .env");
    }
    info!("Setup complete, set your API key in .env");
    Ok(())
}
