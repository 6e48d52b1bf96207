use clap::{ArgGroup, Parser, Subcommand};
use mahanadu_portal::api::public::DEFAULT_PAGE_SIZE;
use mahanadu_portal::config::PortalConfig;
use mahanadu_portal::helper::form_helpers;
use mahanadu_portal::helper::latency_helpers::NoLatency;
use mahanadu_portal::{Envelope, PortalApi, RecordType};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "portal", author, version, about = "Calls the portal data layer and prints each JSON response.")]
struct Cli {
    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,

    /// Skip the simulated network latency.
    #[arg(long)]
    no_delay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Settings,
    Posts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        per: u32,
    },
    #[command(group(ArgGroup::new("lookup").required(true).args(["id", "slug"])))]
    Post {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        slug: Option<String>,
    },
    Profiles,
    Profile {
        #[arg(long)]
        id: i64,
    },
    Districts,
    Gallery,
    /// Record a form submission: contacts, complaints, donations or memberships.
    Submit {
        record_type: RecordType,
        /// A form field as key=value; repeat for more fields.
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// List every stored submission of a type.
    List {
        record_type: String,
    },
    DonationSummary,
}

fn print<T: Serialize>(envelope: &Envelope<T>) -> ExitCode {
    match serde_json::to_string_pretty(envelope) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("❌ Failed to render response: {}", e);
            return ExitCode::FAILURE;
        }
    }
    if envelope.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = PortalConfig::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let mut api = PortalApi::from_config(&config)
        .expect("FATAL: Failed to initialise the portal data layer.");
    if cli.no_delay {
        api = api.with_latency(NoLatency);
    }

    match cli.command {
        Commands::Settings => print(&api.fetch_settings().await),
        Commands::Posts { page, per } => print(&api.fetch_posts(page, per).await),
        Commands::Post { id: Some(id), .. } => print(&api.fetch_post_by_id(id).await),
        Commands::Post { slug, .. } => print(&api.fetch_post_by_slug(slug.as_deref().unwrap_or_default()).await),
        Commands::Profiles => print(&api.fetch_profiles().await),
        Commands::Profile { id } => print(&api.fetch_profile_by_id(id).await),
        Commands::Districts => print(&api.fetch_districts().await),
        Commands::Gallery => print(&api.fetch_gallery().await),
        Commands::Submit { record_type, fields } => match form_helpers::parse_field_pairs(&fields) {
            Ok(fields) => print(&api.submit(record_type, fields).await),
            Err(e) => {
                eprintln!("❌ {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::List { record_type } => print(&api.list_submissions(&record_type).await),
        Commands::DonationSummary => print(&api.donation_summary().await),
    }
}
