use serde::{Deserialize, Serialize};

use crate::draft::RegistrationDraft;
use crate::postal::PostalCode;
use crate::states::FederativeUnit;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Location payload handed over by the map picker after reverse geocoding.
///
/// `parsed_*` carry a richer upstream parse when the geocoder integration
/// produced one; they win over the heuristic for their field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_detected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_state: Option<String>,
}

impl RawLocation {
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Write the derived street into the draft's address field. When off,
    /// the address the user typed is left alone; city, state and postal
    /// code are still updated.
    pub sync_street: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self { sync_street: true }
    }
}

// ---------------------------------------------------------------------------
// Heuristic output
// ---------------------------------------------------------------------------

/// What the heuristic could derive from one address string. Unset fields
/// were not derivable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FederativeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<PostalCode>,
}

impl ParsedAddress {
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
    }
}

// ---------------------------------------------------------------------------
// Merge result
// ---------------------------------------------------------------------------

/// Field of the draft touched by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Street,
    City,
    State,
    PostalCode,
}

impl AddressField {
    /// Label shown to the user in the confirmation message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Street => "endereço",
            Self::City => "cidade",
            Self::State => "estado",
            Self::PostalCode => "CEP",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Street => write!(f, "street"),
            Self::City => write!(f, "city"),
            Self::State => write!(f, "state"),
            Self::PostalCode => write!(f, "postal_code"),
        }
    }
}

/// Address values present in the draft after the merge (empty = still unset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub draft: RegistrationDraft,
    pub parsed: ParsedAddress,
    pub address: ReconciledAddress,
    /// Fields whose value was written (even if unchanged), in display order.
    pub updated: Vec<AddressField>,
    pub message: String,
}
