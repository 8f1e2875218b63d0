use qservicos_address::engine::{reconcile, reconcile_with};
use qservicos_address::model::{AddressField, RawLocation, ReconcileOptions};
use qservicos_address::parse::{parse_address, parse_parts};
use qservicos_address::{AddressParts, FederativeUnit, HeuristicConfig, RegistrationDraft};
use serde_json::json;

fn draft(value: serde_json::Value) -> RegistrationDraft {
    RegistrationDraft::from_value(value).unwrap()
}

fn sync() -> ReconcileOptions {
    ReconcileOptions { sync_street: true }
}

fn keep() -> ReconcileOptions {
    ReconcileOptions { sync_street: false }
}

// -------------------------------------------------------------------------
// End-to-end
// -------------------------------------------------------------------------

#[test]
fn paulista_end_to_end() {
    let current = draft(json!({ "name": "Ana", "cpf": "123.456.789-00" }));
    let location = RawLocation::from_address("Av. Paulista, Bela Vista, São Paulo, São Paulo, Brasil");

    let out = reconcile(&location, &current, sync());

    assert_eq!(
        out.draft.clone().into_value(),
        json!({
            "name": "Ana",
            "cpf": "123.456.789-00",
            "address": "Av. Paulista",
            "city": "São Paulo",
            "state": "SP",
        })
    );
    assert!(out.draft.get("postalCode").is_none());
    assert_eq!(out.address.postal_code, "");
    assert_eq!(
        out.updated,
        vec![AddressField::Street, AddressField::City, AddressField::State]
    );
    assert_eq!(out.message, "Localização aplicada: endereço, cidade e estado atualizados.");
}

#[test]
fn input_draft_is_not_mutated() {
    let current = draft(json!({ "name": "Ana" }));
    let before = current.clone();
    let _ = reconcile(&RawLocation::from_address("Rua 1, Centro, Goiânia, Goiás"), &current, sync());
    assert_eq!(current, before);
}

// -------------------------------------------------------------------------
// Merge policy
// -------------------------------------------------------------------------

#[test]
fn idempotent() {
    let current = draft(json!({ "name": "Bia", "city": "Anápolis" }));
    let location = RawLocation::from_address("Rua 10, Setor Oeste, Goiânia, Goiás, 74000000, Brasil");
    let a = reconcile(&location, &current, sync());
    let b = reconcile(&location, &current, sync());
    assert_eq!(a.draft, b.draft);
    assert_eq!(a.message, b.message);

    // Feeding the result back in changes nothing either.
    let c = reconcile(&location, &a.draft, sync());
    assert_eq!(c.draft, a.draft);
}

#[test]
fn underivable_fields_keep_prior_values() {
    let current = draft(json!({
        "name": "Caio",
        "cnpj": "12.345.678/0001-90",
        "city": "Anápolis",
        "state": "GO",
        "postalCode": "75000-000",
        "phone": "(62) 99999-0000",
        "acceptTerms": true,
    }));
    // Single segment: no city, no state, no CEP.
    let out = reconcile(&RawLocation::from_address("Fazenda Santa Rita"), &current, keep());
    assert_eq!(out.draft, current);
    assert!(out.updated.is_empty());
    assert_eq!(out.address.city, "Anápolis");
    assert_eq!(out.address.postal_code, "75000-000");
}

#[test]
fn new_values_override_old_ones() {
    let current = draft(json!({ "city": "Anápolis", "state": "GO", "postalCode": "75000-000" }));
    let location = RawLocation::from_address("Rua XV de Novembro, Centro, Curitiba, Paraná, 80020-310");
    let out = reconcile(&location, &current, keep());
    assert_eq!(out.draft.text("city"), "Curitiba");
    assert_eq!(out.draft.text("state"), "PR");
    assert_eq!(out.draft.text("postalCode"), "80020-310");
}

#[test]
fn keep_street_never_touches_address() {
    let current = draft(json!({ "address": "Rua que eu digitei, 42" }));
    for addr in [
        "Av. Paulista, Bela Vista, São Paulo, São Paulo, Brasil",
        "Campinas",
        "",
        "Rua X, Bairro Y, Goiânia, Goiás, Brasil",
    ] {
        let out = reconcile(&RawLocation::from_address(addr), &current, keep());
        assert_eq!(out.draft.text("address"), "Rua que eu digitei, 42", "{addr}");
    }

    // Also when the draft had no address at all.
    let out = reconcile(
        &RawLocation::from_address("Rua X, Bairro Y, Goiânia, Goiás, Brasil"),
        &RegistrationDraft::new(),
        keep(),
    );
    assert!(out.draft.get("address").is_none());
}

#[test]
fn empty_address_is_a_no_op() {
    let current = draft(json!({ "name": "Ana", "city": "Goiânia" }));
    let out = reconcile(&RawLocation::from_address(""), &current, sync());
    assert_eq!(out.draft, current);
    assert_eq!(
        out.message,
        "Localização recebida, mas nenhum campo de endereço foi atualizado."
    );
}

// -------------------------------------------------------------------------
// State table
// -------------------------------------------------------------------------

#[test]
fn every_state_name_resolves_with_and_without_diacritics() {
    let config = HeuristicConfig::default();
    for uf in FederativeUnit::ALL {
        let ascii = qservicos_address::normalize::fold(uf.name());
        for name in [uf.name().to_string(), ascii] {
            let address = format!("Rua X, Bairro Y, Cidade Z, {name}, Brasil");
            let parsed = parse_address(&address, &config);
            assert_eq!(parsed.state, Some(uf), "{address}");
        }
        // As the very last segment too.
        let parsed = parse_address(&format!("Rua X, Bairro Y, {}", uf.name()), &config);
        assert_eq!(parsed.state, Some(uf), "{}", uf.name());
    }
}

#[test]
fn goiania_example() {
    let parsed = parse_address("Rua X, Bairro Y, Goiânia, Goiás, Brasil", &HeuristicConfig::default());
    assert_eq!(parsed.state, Some(FederativeUnit::Goias));
    assert_eq!(parsed.city.as_deref(), Some("Goiânia"));
}

#[test]
fn first_state_in_segment_order_wins() {
    let parsed = parse_address(
        "Rua A, Centro, Petrolina, Pernambuco, Bahia, Brasil",
        &HeuristicConfig::default(),
    );
    assert_eq!(parsed.state, Some(FederativeUnit::Pernambuco));
}

#[test]
fn substring_mode_matches_embedded_names() {
    let config = HeuristicConfig::from_toml("[state]\nmatching = \"substring\"\n").unwrap();
    let parsed = parse_address("Rua A, Centro, Cidade, Estado do Paraná-PR", &config);
    assert_eq!(parsed.state, Some(FederativeUnit::Parana));

    let word = parse_address("Rua A, Centro, Cidade, EstadodoParaná", &HeuristicConfig::default());
    assert_eq!(word.state, None);
}

#[test]
fn word_mode_ignores_state_names_inside_city_names() {
    // "Aparecida" contains "para"; plain containment reads it as Pará.
    let address = "Rua 5, Centro, Aparecida de Goiânia, Goiás, Brasil";

    let word = parse_address(address, &HeuristicConfig::default());
    assert_eq!(word.state, Some(FederativeUnit::Goias));
    assert_eq!(word.city.as_deref(), Some("Aparecida de Goiânia"));

    let config = HeuristicConfig::from_toml("[state]\nmatching = \"substring\"\n").unwrap();
    let substring = parse_address(address, &config);
    assert_eq!(substring.state, Some(FederativeUnit::Para));
}

// -------------------------------------------------------------------------
// Postal code
// -------------------------------------------------------------------------

#[test]
fn postal_code_normalized() {
    let out = reconcile(
        &RawLocation::from_address("Rua 1, Centro, Goiânia, Goiás, 74000000"),
        &RegistrationDraft::new(),
        sync(),
    );
    assert_eq!(out.draft.text("postalCode"), "74000-000");

    let out = reconcile(
        &RawLocation::from_address("Rua 1, Centro, Goiânia, Goiás, 74000-000"),
        &RegistrationDraft::new(),
        sync(),
    );
    assert_eq!(out.draft.text("postalCode"), "74000-000");
}

#[test]
fn malformed_postal_code_leaves_prior_value() {
    let current = draft(json!({ "postalCode": "74000-000" }));
    let out = reconcile(
        &RawLocation::from_address("Rua 1, Centro, Goiânia, Goiás, 7400-00"),
        &current,
        sync(),
    );
    assert_eq!(out.draft.text("postalCode"), "74000-000");
    assert!(!out.updated.contains(&AddressField::PostalCode));
}

// -------------------------------------------------------------------------
// City rules
// -------------------------------------------------------------------------

#[test]
fn metropolitan_region_is_never_the_city() {
    let config = HeuristicConfig::default();
    for address in [
        "Rua 5, Centro, Região Metropolitana de Goiânia, Aparecida de Goiânia, Goiás, Brasil",
        "Rua 5, Região Metropolitana de Goiânia, Senador Canedo, Goiás",
        "Rua 5, Jardim América, Região Imediata de Goiânia, Região Geográfica Intermediária de Goiânia, Trindade, Goiás",
    ] {
        let parsed = parse_address(address, &config);
        let city = parsed.city.unwrap();
        assert!(!city.contains("Região"), "{address} -> {city}");
    }
}

#[test]
fn setor_segment_is_not_a_city() {
    let parsed = parse_address(
        "Av. T-63, Setor Bueno, Setor Sul, Goiânia, Goiás",
        &HeuristicConfig::default(),
    );
    assert_eq!(parsed.city.as_deref(), Some("Goiânia"));
}

#[test]
fn extra_reject_keyword_from_config() {
    let config = HeuristicConfig::from_toml(
        r#"
[city]
reject_keywords = ["região", "imediata", "intermediária", "metropolitana", "setor", "distrito"]
"#,
    )
    .unwrap();
    let address = "Rua 1, Centro, Distrito de Souzas, Campinas, São Paulo";
    assert_eq!(
        parse_address(address, &HeuristicConfig::default()).city.as_deref(),
        Some("Distrito de Souzas")
    );
    assert_eq!(parse_address(address, &config).city.as_deref(), Some("Campinas"));
}

// -------------------------------------------------------------------------
// Positional fallback
// -------------------------------------------------------------------------

#[test]
fn two_segment_fallback() {
    let parts = AddressParts::from_segments(["Rua das Flores, 123", "Campinas"]);
    let parsed = parse_parts(&parts, &HeuristicConfig::default());
    assert_eq!(parsed.state, None);
    assert_eq!(parsed.street.as_deref(), Some("Rua das Flores, 123"));
    assert_eq!(parsed.city.as_deref(), Some("Campinas"));
}

#[test]
fn three_segment_fallback_takes_second() {
    let parsed = parse_address("Rua A, Vila Nova, Hortolândia", &HeuristicConfig::default());
    assert_eq!(parsed.city.as_deref(), Some("Vila Nova"));
}

#[test]
fn four_segment_fallback_takes_third() {
    let parsed = parse_address("Rua A, Vila Nova, Hortolândia, Região Sudeste", &HeuristicConfig::default());
    assert_eq!(parsed.city.as_deref(), Some("Hortolândia"));
}

#[test]
fn single_segment_leaves_city_unset() {
    let current = draft(json!({ "city": "" }));
    let out = reconcile(&RawLocation::from_address("Sítio Boa Vista"), &current, sync());
    assert_eq!(out.draft.text("address"), "Sítio Boa Vista");
    assert_eq!(out.draft.text("city"), "");
}

// -------------------------------------------------------------------------
// Upstream fields + config keys
// -------------------------------------------------------------------------

#[test]
fn location_json_payload() {
    let location: RawLocation = serde_json::from_value(json!({
        "address": "Rua 1, Centro, Goiânia, Goiás",
        "isDetected": true,
        "parsedCity": "Aparecida de Goiânia",
    }))
    .unwrap();
    assert_eq!(location.is_detected, Some(true));

    let out = reconcile(&location, &RegistrationDraft::new(), sync());
    assert_eq!(out.address.city, "Aparecida de Goiânia");
    assert_eq!(out.address.state, "GO");
}

#[test]
fn renamed_fields_still_preserve_other_keys() {
    let config = HeuristicConfig::from_toml("[fields]\nstate = \"uf\"\n").unwrap();
    let current = draft(json!({ "state": "unrelated", "name": "Ana" }));
    let out = reconcile_with(
        &RawLocation::from_address("Rua 1, Centro, Goiânia, Goiás"),
        &current,
        sync(),
        &config,
    );
    assert_eq!(out.draft.text("uf"), "GO");
    assert_eq!(out.draft.text("state"), "unrelated");
    assert_eq!(out.address.state, "GO");
}
