use log::{debug, warn};

use crate::config::HeuristicConfig;
use crate::draft::RegistrationDraft;
use crate::model::{
    AddressField, ParsedAddress, RawLocation, ReconcileOptions, ReconcileOutcome, ReconciledAddress,
};
use crate::parse::parse_address;
use crate::states::FederativeUnit;

/// Reconcile a picked location into the draft using the default rules.
pub fn reconcile(
    location: &RawLocation,
    draft: &RegistrationDraft,
    options: ReconcileOptions,
) -> ReconcileOutcome {
    reconcile_with(location, draft, options, &HeuristicConfig::default())
}

/// Reconcile a picked location into the draft. The input draft is not
/// modified; the merged copy is returned in the outcome.
pub fn reconcile_with(
    location: &RawLocation,
    draft: &RegistrationDraft,
    options: ReconcileOptions,
    config: &HeuristicConfig,
) -> ReconcileOutcome {
    let parsed = apply_upstream(parse_address(&location.address, config), location);
    let keys = &config.fields;

    let mut updates: Vec<(&str, String, AddressField)> = Vec::new();
    if options.sync_street {
        if let Some(ref street) = parsed.street {
            updates.push((keys.street.as_str(), street.clone(), AddressField::Street));
        }
    }
    if let Some(ref city) = parsed.city {
        updates.push((keys.city.as_str(), city.clone(), AddressField::City));
    }
    if let Some(uf) = parsed.state {
        updates.push((keys.state.as_str(), uf.code().to_string(), AddressField::State));
    }
    if let Some(ref cep) = parsed.postal_code {
        updates.push((keys.postal_code.as_str(), cep.to_string(), AddressField::PostalCode));
    }
    updates.retain(|(_, value, _)| !value.trim().is_empty());

    let next = draft.merged(updates.iter().map(|(key, value, _)| (*key, value.as_str())));
    let updated: Vec<AddressField> = updates.iter().map(|(_, _, field)| *field).collect();
    debug!("reconciled fields: {updated:?}");

    let address = ReconciledAddress {
        street: next.text(&keys.street),
        city: next.text(&keys.city),
        state: next.text(&keys.state),
        postal_code: next.text(&keys.postal_code),
    };

    ReconcileOutcome {
        message: confirmation_message(&updated),
        draft: next,
        parsed,
        address,
        updated,
    }
}

/// Fold the geocoder's own fields into the heuristic result: `parsed_*`
/// override, plain `city` / `state` only fill gaps.
fn apply_upstream(mut parsed: ParsedAddress, location: &RawLocation) -> ParsedAddress {
    if let Some(street) = present(&location.parsed_street) {
        parsed.street = Some(street.to_string());
    }

    if let Some(city) = present(&location.parsed_city) {
        parsed.city = Some(city.to_string());
    } else if parsed.city.is_none() {
        parsed.city = present(&location.city).map(str::to_string);
    }

    if let Some(state) = present(&location.parsed_state) {
        match FederativeUnit::resolve(state) {
            Some(uf) => parsed.state = Some(uf),
            None => warn!("ignoring unrecognized upstream state {state:?}"),
        }
    }
    if parsed.state.is_none() {
        parsed.state = present(&location.state).and_then(FederativeUnit::resolve);
    }

    parsed
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// User-facing confirmation, in the wizard's language.
pub fn confirmation_message(updated: &[AddressField]) -> String {
    let labels: Vec<&str> = updated.iter().map(AddressField::label).collect();
    match labels.as_slice() {
        [] => "Localização recebida, mas nenhum campo de endereço foi atualizado.".to_string(),
        [one] => format!("Localização aplicada: {one} atualizado."),
        [init @ .., last] => format!("Localização aplicada: {} e {last} atualizados.", init.join(", ")),
    }
}
