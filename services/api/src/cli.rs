use crate::commands::{run_ask, run_estimate, AskArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use knightsource::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "KnightSource",
    about = "Serve and explore KnightSource campus benefit tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate yearly savings for a set of benefit categories
    Estimate(EstimateArgs),
    /// Ask the assistant a question
    Ask(AskArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Ask(args) => run_ask(args).await,
    }
}
