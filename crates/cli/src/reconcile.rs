// qsv reconcile - merge a picked location into the registration draft

use std::fs;
use std::path::{Path, PathBuf};

use qservicos_address::{reconcile_with, RawLocation, ReconcileOptions, RegistrationDraft};

use crate::{print_json, CliError, Context};

pub(crate) struct ReconcileArgs {
    pub address: Option<String>,
    pub location: Option<PathBuf>,
    pub draft: Option<PathBuf>,
    /// None = follow settings
    pub sync: Option<bool>,
    pub config: Option<PathBuf>,
    pub save: bool,
    pub json: bool,
}

pub(crate) fn cmd_reconcile(ctx: &Context, args: ReconcileArgs) -> Result<(), CliError> {
    let rules = ctx.heuristic(args.config.as_deref())?;
    let mut store = ctx.open_store();

    // Location given on the command line is also what --save persists.
    let (location, given) = match (args.address, args.location) {
        (Some(address), _) => (RawLocation::from_address(address), true),
        (None, Some(path)) => (read_location(&path)?, true),
        (None, None) => match store.user_location() {
            Some(stored) => (stored.location, false),
            None => return Err(CliError::no_location()),
        },
    };

    let draft = match args.draft {
        Some(path) => read_draft(&path)?,
        None => store.registration_draft()?,
    };

    let options = ReconcileOptions {
        sync_street: args.sync.unwrap_or(ctx.settings.sync_street),
    };
    tracing::debug!(address = %location.address, sync_street = options.sync_street, "reconciling");

    let outcome = reconcile_with(&location, &draft, options, &rules);

    if args.save {
        if given {
            store.save_user_location(&location)?;
        }
        store.save_registration_draft(&outcome.draft)?;
        tracing::info!(path = %store.path().display(), "draft saved");
    }

    if args.json {
        return print_json(&outcome);
    }
    print_json(&outcome.draft)?;
    eprintln!("{}", outcome.message);
    Ok(())
}

fn read_location(path: &Path) -> Result<RawLocation, CliError> {
    let text = read_input(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::parse(format!("{}: invalid location: {e}", path.display()))
            .with_hint("expected an object like {\"address\": \"Rua X, Bairro Y, Goiânia, Goiás\"}"))
}

fn read_draft(path: &Path) -> Result<RegistrationDraft, CliError> {
    let text = read_input(path)?;
    RegistrationDraft::from_json_str(&text)
        .map_err(|e| CliError::parse(format!("{}: {e}", path.display())))
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(format!("{}: {e}", path.display())))
}
