// qsv location / qsv draft - stored picker state

use serde_json::Value;

use qservicos_address::RawLocation;

use crate::{print_json, CliError, Context, DraftCommands, LocationCommands};

pub(crate) fn cmd_location(ctx: &Context, cmd: LocationCommands) -> Result<(), CliError> {
    let mut store = ctx.open_store();
    match cmd {
        LocationCommands::Set { address, detected } => {
            if address.trim().is_empty() {
                return Err(CliError::usage("address must not be empty"));
            }
            let location = RawLocation {
                is_detected: Some(detected),
                ..RawLocation::from_address(address)
            };
            let stored = store.save_user_location(&location)?;
            print_json(&stored)
        }
        LocationCommands::Show => match store.user_location() {
            Some(stored) => print_json(&stored),
            None => Err(CliError::no_location()),
        },
        LocationCommands::Clear => {
            if store.clear_user_location()? {
                eprintln!("location cleared");
            } else {
                eprintln!("no stored location");
            }
            Ok(())
        }
    }
}

pub(crate) fn cmd_draft(ctx: &Context, cmd: DraftCommands) -> Result<(), CliError> {
    let mut store = ctx.open_store();
    match cmd {
        DraftCommands::Show => print_json(&store.registration_draft()?),
        DraftCommands::Set { key, value } => {
            if key.trim().is_empty() {
                return Err(CliError::usage("draft key must not be empty"));
            }
            let mut draft = store.registration_draft()?;
            draft.set(key, scalar(&value));
            store.save_registration_draft(&draft)?;
            print_json(&draft)
        }
        DraftCommands::Clear => {
            if store.clear_registration_draft()? {
                eprintln!("draft cleared");
            } else {
                eprintln!("no stored draft");
            }
            Ok(())
        }
    }
}

/// JSON scalars (`true`, `42`, `null`, `"quoted"`) keep their type;
/// anything else is stored as text.
fn scalar(input: &str) -> Value {
    match serde_json::from_str::<Value>(input) {
        Ok(v @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => v,
        _ => Value::String(input.to_string()),
    }
}
