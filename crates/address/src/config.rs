use serde::Deserialize;

use crate::error::AddressError;
use crate::normalize::fold;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tunables for the reconciliation heuristic.
///
/// The defaults are the rules the registration wizard ships with; a TOML file
/// only needs the sections it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub city: CityRules,
    pub country: CountryRules,
    pub state: StateRules,
    pub fields: DraftFields,
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// Segments containing any of these words are never taken as the city.
/// State names, state codes and country names are rejected on top of these.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CityRules {
    pub reject_keywords: Vec<String>,
    /// Minimum length (in characters) of an accepted city candidate.
    pub min_length: usize,
}

impl Default for CityRules {
    fn default() -> Self {
        Self {
            reject_keywords: vec![
                "região".into(),
                "imediata".into(),
                "intermediária".into(),
                "metropolitana".into(),
                "setor".into(),
            ],
            min_length: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Country
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CountryRules {
    /// Country names stripped from segment tails and rejected as cities.
    pub names: Vec<String>,
}

impl Default for CountryRules {
    fn default() -> Self {
        Self {
            names: vec!["brasil".into(), "brazil".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StateRules {
    pub matching: StateMatching,
}

/// How a state name is searched for inside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateMatching {
    /// Name must sit on word boundaries ("rua para" matches, "paranagua" does not).
    #[default]
    Word,
    /// Plain substring containment.
    Substring,
}

// ---------------------------------------------------------------------------
// Draft field names
// ---------------------------------------------------------------------------

/// Keys under which reconciled values are written into the draft.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DraftFields {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Default for DraftFields {
    fn default() -> Self {
        Self {
            street: "address".into(),
            city: "city".into(),
            state: "state".into(),
            postal_code: "postalCode".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl HeuristicConfig {
    pub fn from_toml(input: &str) -> Result<Self, AddressError> {
        let config: HeuristicConfig =
            toml::from_str(input).map_err(|e| AddressError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AddressError> {
        if self.city.min_length == 0 {
            return Err(AddressError::ConfigValidation(
                "city.min_length must be at least 1".into(),
            ));
        }

        if let Some(k) = self.city.reject_keywords.iter().find(|k| k.trim().is_empty()) {
            return Err(AddressError::ConfigValidation(format!(
                "city.reject_keywords contains an empty keyword: {k:?}"
            )));
        }

        if self.country.names.iter().any(|n| n.trim().is_empty()) {
            return Err(AddressError::ConfigValidation(
                "country.names contains an empty name".into(),
            ));
        }

        let keys = [
            ("street", &self.fields.street),
            ("city", &self.fields.city),
            ("state", &self.fields.state),
            ("postal_code", &self.fields.postal_code),
        ];
        for (label, key) in &keys {
            if key.trim().is_empty() {
                return Err(AddressError::ConfigValidation(format!(
                    "fields.{label} must not be empty"
                )));
            }
        }
        for (i, (label_a, a)) in keys.iter().enumerate() {
            for (label_b, b) in &keys[i + 1..] {
                if a == b {
                    return Err(AddressError::ConfigValidation(format!(
                        "fields.{label_a} and fields.{label_b} both map to \"{a}\""
                    )));
                }
            }
        }

        Ok(())
    }

    /// Reject keywords, folded for comparison.
    pub fn folded_reject_keywords(&self) -> Vec<String> {
        self.city.reject_keywords.iter().map(|k| fold(k.trim())).collect()
    }

    /// Country names, folded for comparison.
    pub fn folded_countries(&self) -> Vec<String> {
        self.country.names.iter().map(|n| fold(n.trim())).collect()
    }
}
