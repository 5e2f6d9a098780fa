mod commands;
mod env;

use clap::{Parser, Subcommand};
use insights_client::{InsightsClient, InsightsHttpClient};
use tracing_subscriber::prelude::*;

use env::env;

#[derive(Parser)]
#[command(name = "insights", about = "Meeting insights from the terminal")]
struct Cli {
    /// Overrides INSIGHTS_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trending topics for the current window
    Trends,
    /// Speaker roster with sentiment
    Speakers(commands::speakers::Args),
    /// Paged utterance search
    Utterances(commands::utterances::Args),
    /// Headline metrics
    Dashboard,
    /// Ask a question, or start an interactive session when none is given
    Chat(commands::chat::Args),
}

fn client(cli: &Cli) -> anyhow::Result<InsightsClient<InsightsHttpClient>> {
    let env = env();

    let api_base = cli
        .api_url
        .clone()
        .or_else(|| env.insights_api_url.clone())
        .ok_or_else(|| anyhow::anyhow!("INSIGHTS_API_URL is not set"))?;

    let mut builder = InsightsHttpClient::builder().api_base(api_base);
    if let Some(key) = &env.insights_function_key {
        builder = builder.access_key(key);
    }
    if let Some(token) = &env.insights_access_token {
        builder = builder.access_token(token);
    }

    Ok(InsightsClient::new(builder.build()?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = client(&cli)?;

    let result = match cli.command {
        Command::Trends => commands::trends::run(&client).await,
        Command::Speakers(args) => commands::speakers::run(&client, args).await,
        Command::Utterances(args) => commands::utterances::run(&client, args).await,
        Command::Dashboard => commands::dashboard::run(&client).await,
        Command::Chat(args) => commands::chat::run(&client, args).await,
    };

    if let Err(err) = &result {
        tracing::error!(error = %err, "command_failed");
    }
    result
}
