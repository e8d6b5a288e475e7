//! HeliOps CLI Library
//!
//! Terminal front end for a helicopter charter operator's back office.
//!
//! # Overview
//!
//! - **Session**: sign in against the REST API and keep the token (`heliops login`)
//! - **Records**: list, show, create, update and delete any fleet entity
//!   (`heliops list pilots`, `heliops delete clients c4`)
//! - **Documents**: upload files to object storage and attach them to records
//!   (`heliops upload`)
//! - **Fleet math**: monthly pilot hours with rate-tier billing, dashboard
//!   statistics and chart series (`heliops hours`, `stats`, `chart`)
//! - **Preferences**: dark mode and effective configuration
//!   (`heliops settings`, `heliops config show`)

pub mod api;
pub mod commands;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod screen;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use context::AppContext;
pub use error::{CliError, Result};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use commands::fleet::ChartArg;
use commands::records::ListOptions;
use commands::settings::Toggle;
use commands::ResourceKind;
use config::Config;
use std::path::PathBuf;

/// HeliOps - helicopter charter fleet operations
#[derive(Parser, Debug)]
#[command(name = "heliops")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// REST API base URL
    #[arg(long, env = "HELIOPS_API_URL", global = true)]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        email: String,

        /// Prompted for when omitted
        #[arg(long, env = "HELIOPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List records, filtered by free text and category
    List {
        resource: ResourceKind,

        /// Case-insensitive text match
        #[arg(short, long)]
        search: Option<String>,

        /// Status, type, role or document category
        #[arg(short, long)]
        category: Option<String>,

        /// Only records of this pilot (flights, qualifications, medical, training)
        #[arg(long)]
        pilot: Option<String>,
    },

    /// Show one record
    Show { resource: ResourceKind, id: String },

    /// Create a record from a JSON file
    Create {
        resource: ResourceKind,

        #[arg(short, long)]
        data: PathBuf,

        /// Upload this file and store its URL on the new record
        #[arg(long)]
        attach: Option<PathBuf>,
    },

    /// Replace a record with the contents of a JSON file
    Update {
        resource: ResourceKind,
        id: String,

        #[arg(short, long)]
        data: PathBuf,
    },

    /// Delete a record after confirmation
    Delete {
        resource: ResourceKind,
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a file to object storage
    Upload {
        /// Key prefix, e.g. "library" or "helicopters"
        folder: String,
        file: PathBuf,

        /// Store the URL on an existing record
        #[arg(long, num_args = 2, value_names = ["RESOURCE", "ID"])]
        attach_to: Option<Vec<String>>,
    },

    /// Monthly flight hours and billing for a pilot
    Hours {
        pilot: String,
        year: i32,
        month: u32,

        /// Public holiday (YYYY-MM-DD), repeatable
        #[arg(long = "holiday")]
        holidays: Vec<NaiveDate>,

        /// Use the built-in dataset instead of the API
        #[arg(long)]
        offline: bool,
    },

    /// Dashboard statistics
    Stats {
        #[arg(long)]
        offline: bool,
    },

    /// Dashboard chart series
    Chart {
        kind: ChartArg,

        /// Year for the hours chart (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        offline: bool,
    },

    /// Show or change preferences
    Settings {
        #[arg(long)]
        dark_mode: Option<Toggle>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

fn parse_attach_target(values: Option<Vec<String>>) -> Result<Option<(ResourceKind, String)>> {
    let Some(values) = values else {
        return Ok(None);
    };

    match values.as_slice() {
        [resource, id] => {
            let kind = ResourceKind::from_str(resource, true)
                .map_err(|_| CliError::UnknownResource(resource.clone()))?;
            Ok(Some((kind, id.clone())))
        },
        _ => Err(CliError::config("--attach-to takes a resource and an id")),
    }
}

/// Load configuration, build the context and run `cli.command`.
///
/// Backend failures are reported in user terms before being returned; an
/// expired token clears the stored session.
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    if let Commands::Config {
        command: ConfigCommand::Show,
    } = &cli.command
    {
        return commands::config::show(&config).await;
    }

    let mut ctx = AppContext::new(config)?;
    let result = dispatch(&mut ctx, cli.command).await;

    if let Err(e) = &result {
        if e.api_kind().is_some() {
            eprintln!("{}", ctx.report(e).red());
        }
    }

    result
}

async fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => commands::auth::login(ctx, &email, password).await,
        Commands::Logout => commands::auth::logout(ctx).await,
        Commands::Whoami => commands::auth::whoami(ctx).await,

        Commands::List {
            resource,
            search,
            category,
            pilot,
        } => {
            let options = ListOptions {
                search,
                category,
                pilot,
            };
            commands::records::list(ctx, resource, options).await
        },
        Commands::Show { resource, id } => commands::records::show(ctx, resource, &id).await,
        Commands::Create {
            resource,
            data,
            attach,
        } => commands::records::create(ctx, resource, &data, attach.as_deref()).await,
        Commands::Update { resource, id, data } => {
            commands::records::update(ctx, resource, &id, &data).await
        },
        Commands::Delete { resource, id, yes } => {
            commands::records::delete(ctx, resource, &id, yes).await
        },

        Commands::Upload {
            folder,
            file,
            attach_to,
        } => {
            let target = parse_attach_target(attach_to)?;
            commands::upload::run(ctx, &folder, &file, target).await
        },

        Commands::Hours {
            pilot,
            year,
            month,
            holidays,
            offline,
        } => commands::fleet::hours(ctx, &pilot, year, month, holidays, offline).await,
        Commands::Stats { offline } => commands::fleet::stats(ctx, offline).await,
        Commands::Chart {
            kind,
            year,
            offline,
        } => commands::fleet::chart(ctx, kind, year, offline).await,

        Commands::Settings { dark_mode } => commands::settings::run(ctx, dark_mode).await,
        Commands::Config {
            command: ConfigCommand::Show,
        } => commands::config::show(&ctx.config).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hours() {
        let cli = Cli::try_parse_from([
            "heliops", "hours", "p1", "2024", "3", "--holiday", "2024-03-29", "--offline",
        ])
        .unwrap();

        match cli.command {
            Commands::Hours {
                pilot,
                month,
                holidays,
                offline,
                ..
            } => {
                assert_eq!(pilot, "p1");
                assert_eq!(month, 3);
                assert_eq!(holidays, vec![NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()]);
                assert!(offline);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_attach_target() {
        let target = parse_attach_target(Some(vec!["helicopters".into(), "h1".into()])).unwrap();
        assert_eq!(target, Some((ResourceKind::Helicopters, "h1".to_string())));

        assert!(parse_attach_target(None).unwrap().is_none());
        assert!(matches!(
            parse_attach_target(Some(vec!["hangars".into(), "x".into()])),
            Err(CliError::UnknownResource(_))
        ));
    }

    #[test]
    fn test_parse_create_with_attachment() {
        let cli = Cli::try_parse_from([
            "heliops", "create", "helicopters", "--data", "h.json", "--attach", "h125.jpg",
        ])
        .unwrap();

        match cli.command {
            Commands::Create { attach, .. } => {
                assert_eq!(attach, Some(PathBuf::from("h125.jpg")));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_resource_rejected_by_parser() {
        assert!(Cli::try_parse_from(["heliops", "list", "hangars"]).is_err());
    }
}
