//! The address heuristic: segments in, street/city/state/CEP out.
//!
//! Geocoder output is unconstrained natural language, so every rule here is
//! best-effort. Nothing in this module fails; anything that cannot be derived
//! is left unset for the merge step to fall back on.

use log::debug;

use crate::config::HeuristicConfig;
use crate::model::ParsedAddress;
use crate::normalize::{fold, has_letters};
use crate::postal::PostalCode;
use crate::segments::AddressParts;
use crate::states;

/// Parse a raw geocoder string.
pub fn parse_address(address: &str, config: &HeuristicConfig) -> ParsedAddress {
    parse_parts(&AddressParts::split(address), config)
}

/// Parse already-split segments.
pub fn parse_parts(parts: &AddressParts, config: &HeuristicConfig) -> ParsedAddress {
    let countries = config.folded_countries();
    let postal_code = PostalCode::find(parts.raw());
    let state = states::find_in_segments(parts, &countries, config.state.matching);

    if let Some((uf, idx)) = state {
        debug!("state {uf} found in segment {idx}");
    }

    // City scan only runs once a state anchors the address.
    let mut city = match state {
        Some(_) => scan_city(parts, config, &countries),
        None => None,
    };
    if city.is_none() {
        city = positional_city(parts);
        if let Some(ref c) = city {
            debug!("city {c:?} taken by position ({} segments)", parts.len());
        }
    }

    let street = match parts.len() {
        0 => None,
        1 => non_empty(parts.raw()),
        _ => parts.get(0).map(str::to_string),
    };

    ParsedAddress {
        street,
        city,
        state: state.map(|(uf, _)| uf),
        postal_code,
    }
}

/// First segment after the street that looks like a city name. Addresses of
/// five or more segments also skip the neighborhood at index 1.
fn scan_city(parts: &AddressParts, config: &HeuristicConfig, countries: &[String]) -> Option<String> {
    let keywords = config.folded_reject_keywords();
    let start = if parts.len() >= 5 { 2 } else { 1 };

    parts.iter().skip(start).find_map(|segment| {
        let folded = fold(segment);
        if let Some(reason) = rejection(&folded, &keywords, countries, config) {
            debug!("segment {segment:?} rejected as city: {reason}");
            return None;
        }
        if segment.chars().count() < config.city.min_length {
            debug!("segment {segment:?} rejected as city: too short");
            return None;
        }
        Some(segment.to_string())
    })
}

fn rejection(
    folded: &str,
    keywords: &[String],
    countries: &[String],
    config: &HeuristicConfig,
) -> Option<&'static str> {
    if !has_letters(folded) {
        return Some("no letters");
    }
    if keywords.iter().any(|k| folded.contains(k.as_str())) {
        return Some("administrative region keyword");
    }
    if countries.iter().any(|c| folded.contains(c.as_str())) {
        return Some("country name");
    }
    if states::find_in_text(folded, config.state.matching).is_some() {
        return Some("state name");
    }
    if states::mentions_code(folded) {
        return Some("state code");
    }
    None
}

/// Positional guess: 0 = street, 1 = neighborhood, 2 = city for long
/// addresses; the second segment otherwise.
fn positional_city(parts: &AddressParts) -> Option<String> {
    let idx = match parts.len() {
        0 | 1 => return None,
        2 | 3 => 1,
        _ => 2,
    };
    parts.get(idx).map(str::to_string)
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim_matches(|c: char| c == ',' || c.is_whitespace());
    (!t.is_empty()).then(|| t.to_string())
}
