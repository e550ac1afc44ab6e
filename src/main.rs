use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use kinship::config::{
    get_config_path, resolve_config, update_config_file, ConfigUpdate, KinshipConfig, LoadedConfig,
};
use kinship::format::{
    format_connections, format_relation, format_relation_as_json, format_terms,
};
use kinship::kinship::Kinship;
use kinship::terms::TermTable;

/// Names the kinship between two people in a family.
#[derive(Parser)]
#[command(name = "kinship", about = "Names the kinship between two people in a family")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Config file (default: .kinship/config.json in the current directory).
    /// Relative paths inside it resolve against its own directory
    #[arg(short, long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how NAME1 is related to NAME2
    Relation {
        /// Family description (JSON)
        file: String,
        /// First person
        name1: String,
        /// Second person
        name2: String,
        /// Term table (JSON), overriding the configured one
        #[arg(short, long)]
        terms: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List every relative reachable from NAME with its path code
    Connections {
        /// Family description (JSON)
        file: String,
        /// Person to start from
        name: String,
    },
    /// Print the term table in use
    Terms {
        /// Term table (JSON), overriding the configured one
        #[arg(short, long)]
        terms: Option<String>,
    },
    /// Show or change the stored configuration
    Config {
        /// Term table path to store, resolved against the config's base directory
        #[arg(long, conflicts_with = "builtin_terms")]
        terms: Option<String>,
        /// Go back to the built-in term table
        #[arg(long)]
        builtin_terms: bool,
        /// Term for codes missing from the table
        #[arg(long)]
        fallback: Option<String>,
        /// Term for a person queried against themselves
        #[arg(long)]
        self_term: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> kinship::errors::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let explicit = cli.config.as_deref().map(Path::new);

    match cli.command {
        Commands::Relation {
            file,
            name1,
            name2,
            terms,
            json,
        } => {
            let loaded = resolve_config(explicit, &cwd)?;
            let table = term_table(&loaded, terms, &cwd)?;
            let kinship = Kinship::open(Path::new(&file), table)?;
            let relation = kinship.relation(&name1, &name2)?;
            if json {
                println!("{}", format_relation_as_json(&name1, &name2, &relation)?);
            } else {
                println!("{}", format_relation(&name1, &name2, &relation));
            }
        }
        Commands::Connections { file, name } => {
            let loaded = resolve_config(explicit, &cwd)?;
            let kinship = Kinship::open(Path::new(&file), loaded.term_table()?)?;
            let connections = kinship.connections(&name)?;
            print!("{}", format_connections(&name, kinship.family(), &connections));
        }
        Commands::Terms { terms } => {
            let loaded = resolve_config(explicit, &cwd)?;
            let table = term_table(&loaded, terms, &cwd)?;
            print!("{}", format_terms(&table));
        }
        Commands::Config {
            terms,
            builtin_terms,
            fallback,
            self_term,
        } => {
            let path = match explicit {
                Some(p) => p.to_path_buf(),
                None => get_config_path(&cwd),
            };
            let update = ConfigUpdate {
                terms_path: terms,
                builtin_terms,
                fallback_term: fallback,
                self_term,
            };
            let config = if update.is_empty() {
                resolve_config(explicit, &cwd)?.config
            } else {
                let config = update_config_file(&path, &update)?;
                println!("Updated {}", path.display());
                config
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Builds the term table from the config. A `--terms` path overrides it and
/// is taken relative to the working directory.
fn term_table(
    loaded: &LoadedConfig,
    terms_override: Option<String>,
    cwd: &Path,
) -> kinship::errors::Result<TermTable> {
    match terms_override {
        Some(path) => {
            let config = KinshipConfig {
                terms_path: Some(path),
                ..loaded.config.clone()
            };
            config.term_table(cwd)
        }
        None => loaded.term_table(),
    }
}

/// Logs to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kinship={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
