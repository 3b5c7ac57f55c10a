use crate::apply::{run_apply, run_init_db, ApplyArgs, InitDbArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Intake",
    about = "Run the loan application intake service or submit an application from the command line",
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
    /// Submit one application and print the decision page
    Apply(ApplyArgs),
    /// Create the application database and table if missing
    InitDb(InitDbArgs),
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
        Command::Apply(args) => run_apply(args),
        Command::InitDb(args) => run_init_db(args),
    }
}
