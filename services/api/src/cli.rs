use crate::commands::{
    run_catalog, run_companion_cards, run_companion_plan, run_leads_export, run_quiz_score,
    CatalogArgs, CompanionPlanArgs, ExportArgs, PreferenceArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use networking_lab::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Networking Lab",
    about = "Run the networking persona quiz and companion services from the command line",
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
    /// Score answers or inspect the question catalog
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Preview personalised companion content
    Companion {
        #[command(subcommand)]
        command: CompanionCommand,
    },
    /// Work with the captured lead files
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Score an answers file and print the result with its presentation copy
    Score(ScoreArgs),
    /// Print the active question catalog
    Catalog(CatalogArgs),
}

#[derive(Subcommand, Debug)]
enum CompanionCommand {
    /// Print the ranked prompt cards for a set of preferences
    Cards(PreferenceArgs),
    /// Print the before/during/after session plan
    Plan(CompanionPlanArgs),
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Export lead data as JSON or CSV
    Export(ExportArgs),
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
        Command::Quiz { command } => match command {
            QuizCommand::Score(args) => run_quiz_score(args),
            QuizCommand::Catalog(args) => run_catalog(args),
        },
        Command::Companion { command } => match command {
            CompanionCommand::Cards(args) => run_companion_cards(args),
            CompanionCommand::Plan(args) => run_companion_plan(args),
        },
        Command::Leads {
            command: LeadsCommand::Export(args),
        } => run_leads_export(args),
    }
}
