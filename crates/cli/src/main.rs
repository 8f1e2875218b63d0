// Qserviços CLI - address reconciliation for the registration wizard
// Commands mirror what the location picker does: parse, reconcile, persist.

mod exit_codes;
mod local;
mod reconcile;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use qservicos_address::parse::parse_address;
use qservicos_address::{FederativeUnit, HeuristicConfig, ParsedAddress};
use qservicos_config::{load_heuristic, ConfigError, LocalStore, Settings};

use exit_codes::{
    config_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_NO_LOCATION, EXIT_PARSE,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "qsv")]
#[command(about = "Reconcile reverse-geocoded addresses into the registration draft")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Local store file (default: <config dir>/qservicos/store.json)
    #[arg(long, global = true, env = "QSV_STORE", value_name = "FILE")]
    store: Option<PathBuf>,

    /// Settings file (default: <config dir>/qservicos/settings.json)
    #[arg(long, global = true, env = "QSV_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the address heuristic only and print what it derives
    #[command(after_help = "\
Examples:
  qsv parse 'Av. Paulista, Bela Vista, São Paulo, São Paulo, Brasil'
  qsv parse 'Rua 10, Setor Oeste, Goiânia, Goiás, 74000000' --json
  qsv parse 'Rua A, Centro, Cidade, Paraná' --config rules.toml")]
    Parse {
        /// Free-text address (comma separated)
        address: String,

        /// Heuristic rules TOML (overrides settings)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge a picked location into the registration draft
    #[command(after_help = "\
The location comes from ADDRESS, else --location, else the stored location.
The draft comes from --draft, else the stored draft, else an empty one.
The merged draft is printed on stdout; the confirmation on stderr.

Examples:
  qsv reconcile 'Rua X, Bairro Y, Goiânia, Goiás, Brasil'
  qsv reconcile --location picked.json --draft draft.json --json
  qsv reconcile 'Av. Paulista, Bela Vista, São Paulo, São Paulo' --keep-street --save
  qsv location set 'Rua 1, Centro, Curitiba, Paraná' && qsv reconcile --save")]
    Reconcile {
        /// Free-text address (omit to use --location or the stored location)
        address: Option<String>,

        /// Location JSON file ({\"address\": ..., \"parsedCity\": ...})
        #[arg(long, value_name = "FILE", conflicts_with = "address")]
        location: Option<PathBuf>,

        /// Draft JSON file (omit to use the stored draft)
        #[arg(long, value_name = "FILE")]
        draft: Option<PathBuf>,

        /// Copy the derived street into the address field
        #[arg(long, conflicts_with = "keep_street")]
        sync_street: bool,

        /// Never touch the address field
        #[arg(long)]
        keep_street: bool,

        /// Heuristic rules TOML (overrides settings)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the merged draft (and the given location) back to the store
        #[arg(long)]
        save: bool,

        /// Print the whole outcome as one JSON value
        #[arg(long)]
        json: bool,
    },

    /// Manage the stored location
    #[command(subcommand)]
    Location(LocationCommands),

    /// Manage the stored registration draft
    #[command(subcommand)]
    Draft(DraftCommands),

    /// List the federative units
    States {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Heuristic config commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub(crate) enum LocationCommands {
    /// Store a picked address
    Set {
        address: String,

        /// Mark the location as detected from the device position
        #[arg(long)]
        detected: bool,
    },
    /// Print the stored location as JSON
    Show,
    /// Forget the stored location
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum DraftCommands {
    /// Print the stored draft as JSON
    Show,
    /// Set one draft field (VALUE is read as a JSON scalar, else as text)
    #[command(after_help = "\
Examples:
  qsv draft set name 'Ana'
  qsv draft set acceptTerms true
  qsv draft set cpf '123.456.789-00'")]
    Set { key: String, value: String },
    /// Discard the stored draft
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Check a heuristic rules TOML file
    Validate {
        file: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging() {
    // RUST_LOG=debug shows each heuristic decision
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ctx = Context::new(cli.settings, cli.store);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: qsv <command> [options]");
            eprintln!("       qsv --help for more information");
            Ok(())
        }
        Some(Commands::Parse { address, config, json }) => cmd_parse(&ctx, &address, config, json),
        Some(Commands::Reconcile {
            address,
            location,
            draft,
            sync_street,
            keep_street,
            config,
            save,
            json,
        }) => {
            let sync = match (sync_street, keep_street) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            reconcile::cmd_reconcile(
                &ctx,
                reconcile::ReconcileArgs { address, location, draft, sync, config, save, json },
            )
        }
        Some(Commands::Location(cmd)) => local::cmd_location(&ctx, cmd),
        Some(Commands::Draft(cmd)) => local::cmd_draft(&ctx, cmd),
        Some(Commands::States { json }) => cmd_states(json),
        Some(Commands::Config(ConfigCommands::Validate { file })) => cmd_config_validate(&file),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn no_location() -> Self {
        Self {
            code: EXIT_NO_LOCATION,
            message: "no location to reconcile".to_string(),
            hint: Some("pass an ADDRESS, use --location FILE, or run: qsv location set '<address>'".to_string()),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let code = config_exit_code(&err);
        let hint = match &err {
            ConfigError::Heuristic(_) => Some("check it with: qsv config validate <FILE>".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

// ============================================================================
// Shared context
// ============================================================================

/// Settings plus the resolved store path, built once per invocation.
pub(crate) struct Context {
    pub settings: Settings,
    pub store_path: PathBuf,
}

impl Context {
    fn new(settings_path: Option<PathBuf>, store_flag: Option<PathBuf>) -> Self {
        let settings = match settings_path {
            Some(path) => Settings::load_from(&path),
            None => Settings::load(),
        };
        let store_path = store_flag
            .or_else(|| settings.store_path.clone())
            .unwrap_or_else(LocalStore::default_path);
        tracing::debug!(store = %store_path.display(), "resolved store");
        Self { settings, store_path }
    }

    pub fn open_store(&self) -> LocalStore {
        LocalStore::open(&self.store_path)
    }

    /// Rules from --config if given, else from settings, else built in.
    pub fn heuristic(&self, flag: Option<&Path>) -> Result<HeuristicConfig, CliError> {
        match flag {
            Some(path) => Ok(load_heuristic(path)?),
            None => Ok(self.settings.heuristic()?),
        }
    }
}

/// Print one JSON value on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::other(format!("cannot encode JSON: {e}")))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// parse
// ============================================================================

fn cmd_parse(ctx: &Context, address: &str, config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let rules = ctx.heuristic(config.as_deref())?;
    let parsed = parse_address(address, &rules);
    if json {
        return print_json(&parsed);
    }
    print_parsed(&parsed);
    Ok(())
}

fn print_parsed(parsed: &ParsedAddress) {
    let dash = || "-".to_string();
    println!("street:       {}", parsed.street.clone().unwrap_or_else(dash));
    println!("city:         {}", parsed.city.clone().unwrap_or_else(dash));
    println!(
        "state:        {}",
        parsed
            .state
            .map(|uf| format!("{} ({})", uf.code(), uf.name()))
            .unwrap_or_else(dash)
    );
    println!(
        "postal code:  {}",
        parsed.postal_code.as_ref().map(|c| c.to_string()).unwrap_or_else(dash)
    );
}

// ============================================================================
// states
// ============================================================================

fn cmd_states(json: bool) -> Result<(), CliError> {
    if json {
        let list: Vec<serde_json::Value> = FederativeUnit::ALL
            .iter()
            .map(|uf| serde_json::json!({ "code": uf.code(), "name": uf.name() }))
            .collect();
        return print_json(&list);
    }
    for uf in FederativeUnit::ALL {
        println!("{}  {}", uf.code(), uf.name());
    }
    Ok(())
}

// ============================================================================
// config validate
// ============================================================================

fn cmd_config_validate(file: &Path) -> Result<(), CliError> {
    let rules = load_heuristic(file).map_err(|e| match e {
        ConfigError::Heuristic(inner) => CliError::config(format!("{}: {}", file.display(), inner)),
        other => CliError::from(other),
    })?;
    println!(
        "ok: {} ({} city keywords, {} country names, state matching: {:?})",
        file.display(),
        rules.city.reject_keywords.len(),
        rules.country.names.len(),
        rules.state.matching,
    );
    Ok(())
}
