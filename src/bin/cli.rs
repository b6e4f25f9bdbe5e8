use anyhow::{Context, Result};
use clap::Parser;
use kicktipp_bot::kicktipp_api::KicktippClient;
use kicktipp_bot::strategy::{StrategyOptions, TipStrategy};
use kicktipp_bot::{run, RunOptions};
use std::io::IsTerminal;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "kicktipp-bot")]
#[command(about = "Fill in Kicktipp predictions from betting odds", long_about = None)]
struct Args {
    /// Kicktipp login (email or username)
    #[arg(long, env = "KICKTIPP_USERNAME")]
    username: String,

    #[arg(long, env = "KICKTIPP_PASSWORD", hide_env_values = true)]
    password: String,

    /// Name of the Kicktipp community, as in kicktipp.de/<community>
    #[arg(short, long)]
    community: String,

    /// Matchday indices to tip
    #[arg(short, long, num_args = 1.., required = true)]
    matchday: Vec<u32>,

    /// Random tips between 0 and 4 goals (takes precedence over all other strategies)
    #[arg(long)]
    random: bool,

    /// Predict a narrow win for the underdog
    #[arg(long)]
    anti: bool,

    /// Same tip for every match, e.g. 2:1
    #[arg(long = "static", value_name = "H:G")]
    static_tip: Option<String>,

    /// Calculate and print the tips without submitting them
    #[arg(long)]
    dryrun: bool,

    /// Print the tips; repeat for debug logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the tips as JSON
    #[arg(long)]
    json: bool,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 | 1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(args.verbose))
        .with_writer(std::io::stderr)
        .init();

    // Fail on a bad static tip before touching the website
    let strategy = TipStrategy::select(&StrategyOptions {
        random: args.random,
        anti: args.anti,
        static_tip: args.static_tip.clone(),
    })?;
    tracing::info!("Using {} strategy", strategy);

    let options = RunOptions {
        dryrun: args.dryrun,
        verbose: args.verbose,
        json: args.json,
        colored: std::io::stdout().is_terminal(),
    };

    let mut client = KicktippClient::new()?;
    client
        .login(&args.username, &args.password)
        .await
        .context("Login to Kicktipp failed")?;

    run(&mut client, &args.community, &args.matchday, &strategy, &options).await
}
