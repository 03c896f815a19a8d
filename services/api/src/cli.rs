use crate::demo::{run_demo, run_diagnose, DemoArgs, DiagnoseArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fund_diagnosis::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Policy Fund Diagnosis",
    about = "Run the policy-fund diagnosis service and demos from the command line",
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
    /// Match a single answer set and print the recommended fund
    Diagnose(DiagnoseArgs),
    /// Run an end-to-end CLI demo covering the questionnaire and lead capture
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured analyzing dwell, in milliseconds
    #[arg(long)]
    pub(crate) dwell_ms: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Diagnose(args) => run_diagnose(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
