//! Stitch - add registry components, hooks, and styles to your project
//!
//! Main entry point. Both subcommands operate on the current working
//! directory as the consuming project.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use stitch_core::ItemKind;

mod add_cli;
mod init_cli;
mod prompt;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "stitch",
    about = "Add registry components, hooks, types, utilities, and styles to your project",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override the registry base URL
    #[clap(long, global = true)]
    registry: Option<String>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Initialize project setup and install the required items
    Init {
        /// Accept the default directory layout without prompting
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// Add a component, hook, type, utility, or style to your project
    Add {
        /// The items (components, hooks, types, utils, styles) to add
        #[clap(required = true)]
        items: Vec<String>,

        /// Add a component
        #[clap(short = 'C', long)]
        component: bool,

        /// Add a hook
        #[clap(short = 'H', long)]
        hook: bool,

        /// Add a type
        #[clap(short = 'T', long = "type")]
        type_: bool,

        /// Add a utility
        #[clap(short = 'U', long)]
        utility: bool,

        /// Add a style
        #[clap(short = 'S', long)]
        style: bool,
    },
}

/// Initialize tracing from the --log-level flag, writing to stderr
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Map the kind flags onto a filter; the first set flag wins
fn kind_from_flags(
    component: bool,
    hook: bool,
    type_: bool,
    utility: bool,
    style: bool,
) -> Option<ItemKind> {
    if component {
        Some(ItemKind::Component)
    } else if hook {
        Some(ItemKind::Hook)
    } else if type_ {
        Some(ItemKind::Type)
    } else if utility {
        Some(ItemKind::Utility)
    } else if style {
        Some(ItemKind::Style)
    } else {
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let project_dir = std::env::current_dir()?;

    match cli.command {
        Command::Init { yes } => init_cli::run(&project_dir, cli.registry, yes).await,
        Command::Add {
            items,
            component,
            hook,
            type_,
            utility,
            style,
        } => {
            let kind = kind_from_flags(component, hook, type_, utility, style);
            add_cli::run(&project_dir, cli.registry, items, kind).await
        }
    }
}
