mod cmd;
mod context;
mod output;
mod prompt;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use context::GlobalArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "planview",
    about = "Mirror a ClickUp planning folder into per-customer views with everyone else's tasks anonymized",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, global = true, env = "PLANVIEW_CONFIG", default_value = "planview.yaml")]
    config: PathBuf,

    /// ClickUp API base URL (overrides the config file)
    #[arg(long, global = true, env = "CLICKUP_API_URL")]
    api_url: Option<String>,

    /// ClickUp personal API token
    #[arg(long, global = true, env = "CLICKUP_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log more (repeat for debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the spaces visible to the token
    Spaces,

    /// List the distinct customers found in the planning folder
    Customers {
        /// Space holding the planning folder (default: config, else prompt)
        #[arg(long)]
        space: Option<String>,
        /// Planning folder name (default: config `source_folder`)
        #[arg(long)]
        folder: Option<String>,
    },

    /// Rebuild one customer's view lists from the planning folder
    Sync {
        /// Space holding the planning folder (default: config, else prompt)
        #[arg(long)]
        space: Option<String>,
        /// Planning folder name (default: config `source_folder`)
        #[arg(long)]
        folder: Option<String>,
        /// Customer to build the view for (default: prompt)
        #[arg(long)]
        customer: Option<String>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let globals = GlobalArgs {
        config: cli.config,
        api_url: cli.api_url,
        token: cli.token,
    };

    let result = match cli.command {
        Commands::Spaces => cmd::spaces::run(&globals, cli.json),
        Commands::Customers { space, folder } => {
            cmd::customers::run(&globals, space, folder, cli.json)
        }
        Commands::Sync {
            space,
            folder,
            customer,
        } => cmd::sync::run(&globals, space, folder, customer, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&globals, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
