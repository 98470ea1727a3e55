use crate::server;
use crate::submit::{run_paper, run_registration, PaperArgs, RegistrationArgs};
use clap::{Args, Parser, Subcommand};
use ictaaa_site::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ICTAAA Site Services",
    about = "Run the ICTAAA 2026 conference site services from the command line",
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
    /// Drive a form submission workflow against a running site
    Submit {
        #[command(subcommand)]
        command: SubmitCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SubmitCommand {
    /// Submit an attendee registration
    Registration(RegistrationArgs),
    /// Submit a paper for review
    Paper(PaperArgs),
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
        Command::Submit {
            command: SubmitCommand::Registration(args),
        } => run_registration(args).await,
        Command::Submit {
            command: SubmitCommand::Paper(args),
        } => run_paper(args).await,
    }
}
