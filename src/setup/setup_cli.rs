use clap::{Parser, Subcommand};
use mahanadu_portal::config::PortalConfig;
use mahanadu_portal::setup::db_setup;
use redb::Database;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "setup_cli", author, version, about = "A CLI for initial data layer setup.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand, Debug)]
enum DbAction {
    /// Create the submission ledger database.
    Setup,
    /// Print where the ledger database lives and whether it exists.
    Status,
}

fn main() {
    let cli = Cli::parse();

    let config = PortalConfig::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    match &cli.command {
        Commands::Db { action } => match action {
            DbAction::Setup => setup_ledger_database(&config),
            DbAction::Status => print_ledger_status(&config),
        },
    }
}

fn setup_ledger_database(config: &PortalConfig) {
    let db_path = config.ledger_db_path();
    println!("\nSetting up submission ledger at '{}'...", db_path.display());

    if let Some(parent_dir) = db_path.parent() {
        fs::create_dir_all(parent_dir).expect("Could not create database directory.");
    }

    let db = Database::create(&db_path).expect("Failed to create ledger database file.");
    match db_setup::setup_ledger_db(&db) {
        Ok(seeded) if seeded.is_empty() => println!("ℹ️ Ledger already set up. Nothing to do."),
        Ok(seeded) => println!("✅ Ledger setup completed ({} collections created).", seeded.len()),
        Err(e) => eprintln!("❌ Error setting up ledger database: {}", e),
    }
}

fn print_ledger_status(config: &PortalConfig) {
    let db_path = config.ledger_db_path();
    if db_path.exists() {
        println!("✅ Ledger database found at '{}'.", db_path.display());
    } else {
        println!("❌ No ledger database at '{}'. Run `setup_cli db setup` first.", db_path.display());
    }
}
