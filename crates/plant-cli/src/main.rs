mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand,
    plant::{AddArgs, ListArgs, UpdateArgs},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plants",
    about = "Personal plant watering tracker: see which plants need water and log waterings",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .plants/ (default: nearest .plants/ upward, then $HOME)
    #[arg(long, global = true, env = "PLANTS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .plants/ with a default config and sample plants
    Init,

    /// List plants, optionally filtered by watering state
    List(ListArgs),

    /// Show one plant with its schedule
    Show { id: String },

    /// Add a plant
    Add(AddArgs),

    /// Change fields of a plant
    Update(UpdateArgs),

    /// Delete a plant (no error if it is already gone)
    Remove { id: String },

    /// Record a watering now
    Water { id: String },

    /// Toggle the favorite flag on a plant
    Favorite { id: String },

    /// Counts, plants needing water, upcoming waterings and favorites
    Dashboard,

    /// Markdown progress report
    Report {
        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Recent activity, newest first
    Activity,

    /// Log in with a configured local user
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PLANTS_PASSWORD")]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved root");

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::List(args) => cmd::plant::list(&root, args, cli.json),
        Commands::Show { id } => cmd::plant::show(&root, &id, cli.json),
        Commands::Add(args) => cmd::plant::add(&root, args, cli.json),
        Commands::Update(args) => cmd::plant::update(&root, args, cli.json),
        Commands::Remove { id } => cmd::plant::remove(&root, &id, cli.json),
        Commands::Water { id } => cmd::plant::water(&root, &id, cli.json),
        Commands::Favorite { id } => cmd::plant::favorite(&root, &id, cli.json),
        Commands::Dashboard => cmd::dashboard::run(&root, cli.json),
        Commands::Report { output } => cmd::report::report(&root, output, cli.json),
        Commands::Activity => cmd::report::activity(&root, cli.json),
        Commands::Login { email, password } => {
            cmd::auth::login(&root, &email, &password, cli.json)
        }
        Commands::Logout => cmd::auth::logout(&root, cli.json),
        Commands::Whoami => cmd::auth::whoami(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
