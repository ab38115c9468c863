use crate::console::{run_check, run_watch, CheckCommand, WatchCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobby::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Jobby Forms",
    about = "Serve and exercise the Jobby login and registration form validation",
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
    /// Drive a live form pipeline from stdin lines such as `email a@b.com`
    Watch {
        #[command(subcommand)]
        form: WatchCommand,
    },
    /// Validate a single form submission and print the result as JSON
    Check {
        #[command(subcommand)]
        form: CheckCommand,
    },
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
        Command::Watch { form } => run_watch(form).await,
        Command::Check { form } => run_check(form),
    }
}
