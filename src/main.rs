//! Person registry CLI entry point.
//!
//! Registers people into the local database and prints the registry back.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use person_registry::application::registration::RecordService;
use person_registry::domain::RegistrationError;
use person_registry::infra::app_config::{config_path, load_config, save_config};
use person_registry::infra::cli;

#[derive(Parser, Debug)]
#[command(name = "person-registry")]
#[command(version)]
#[command(about = "Register people into a local database", long_about = None)]
struct Args {
    /// Database file (defaults to the configured or platform location)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a person
    Add {
        #[arg(short, long)]
        name: String,
        /// Age in whole years
        #[arg(short, long)]
        age: String,
        /// Male, Female or Other
        #[arg(short, long)]
        sex: String,
        /// Birth date, stored as written
        #[arg(short, long)]
        birth_date: Option<String>,
    },

    /// List everyone, sorted by name
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create the database file and table if missing
    Init,

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the settings in effect
    Show,
    /// Remember a database file for later runs
    SetDb { path: PathBuf },
    /// Turn the listing after `add` on or off
    Refresh {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let code = match args.command {
        Commands::Config { action } => match run_config(action) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("error: {err:#}");
                1
            }
        },
        command => match run(args.db, command) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}", cli::render_error(&err));
                cli::exit_code(&err)
            }
        },
    };
    ExitCode::from(code)
}

fn run(db: Option<PathBuf>, command: Commands) -> Result<(), RegistrationError> {
    let config = load_config();
    let service = RecordService::open(&config, db)?;

    match command {
        Commands::Add {
            name,
            age,
            sex,
            birth_date,
        } => {
            let mut form = cli::prepare_form(name, age, sex, birth_date)?;
            let outcome = service.submit(&mut form)?;
            println!("{}", outcome.message);
            match outcome.refresh {
                Some(Ok(records)) => println!("{}", cli::render_table(&records)),
                Some(Err(err)) => eprintln!("{}", cli::render_error(&err)),
                None => {}
            }
        }
        Commands::List { json } => {
            let records = service.list_all()?;
            if json {
                let text = serde_json::to_string_pretty(&records)
                    .map_err(|e| RegistrationError::ReadFailed(e.into()))?;
                println!("{text}");
            } else {
                println!("{}", cli::render_table(&records));
            }
        }
        Commands::Init => {
            service.ensure_schema()?;
            let count = service.count()?;
            match service.database().path() {
                Some(path) => println!("Registry ready at {} ({count} records)", path.display()),
                None => println!("Registry ready ({count} records)"),
            }
        }
        Commands::Config { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

fn run_config(action: ConfigAction) -> anyhow::Result<()> {
    let mut config = load_config();
    match action {
        ConfigAction::Show => {
            println!("config file: {}", config_path().display());
            print!("{}", toml::to_string_pretty(&config).context("serializing config")?);
            return Ok(());
        }
        ConfigAction::SetDb { path } => config.db_path = Some(path),
        ConfigAction::Refresh { enabled } => config.refresh_after_submit = enabled,
    }
    let path = save_config(&config)?;
    println!("Saved {}", path.display());
    Ok(())
}
