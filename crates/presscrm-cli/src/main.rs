mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, intake::IntakeSubcommand, lead::LeadSubcommand,
    status::StatusSubcommand, user::UserSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "presscrm",
    about = "Printing-order CRM: leads, workflow status, dashboard and customer intake",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .presscrm/)
    #[arg(long, global = true, env = "PRESSCRM_ROOT")]
    root: Option<PathBuf>,

    /// Act as this user id (default: config default_user)
    #[arg(long = "as", global = true, env = "PRESSCRM_USER", value_name = "USER_ID")]
    as_user: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .presscrm/ with a default config and the sample dataset
    Init {
        /// Company name written to the config
        #[arg(long)]
        company: Option<String>,
    },

    /// Summary metrics over the leads visible to the acting user
    Dashboard,

    /// List, inspect and advance leads
    Lead {
        #[command(subcommand)]
        subcommand: LeadSubcommand,
    },

    /// Query the status workflow directly
    Status {
        #[command(subcommand)]
        subcommand: StatusSubcommand,
    },

    /// Browse the team directory
    User {
        #[command(subcommand)]
        subcommand: UserSubcommand,
    },

    /// Record details sent back by a customer
    Intake {
        #[command(subcommand)]
        subcommand: IntakeSubcommand,
    },

    /// Inspect the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let as_user = cli.as_user.as_deref();

    let result = match cli.command {
        Commands::Init { company } => cmd::init::run(&root, company.as_deref()),
        Commands::Dashboard => cmd::dashboard::run(&root, as_user, cli.json),
        Commands::Lead { subcommand } => cmd::lead::run(&root, as_user, subcommand, cli.json),
        Commands::Status { subcommand } => cmd::status::run(subcommand, cli.json),
        Commands::User { subcommand } => cmd::user::run(&root, subcommand, cli.json),
        Commands::Intake { subcommand } => cmd::intake::run(&root, as_user, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
