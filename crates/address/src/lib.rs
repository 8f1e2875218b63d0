//! `qservicos-address`: address reconciliation engine.
//!
//! Pure engine crate: receives a reverse-geocoded address string and the
//! current registration draft, returns the merged draft. No CLI or IO
//! dependencies.

pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod postal;
pub mod segments;
pub mod states;

pub use config::HeuristicConfig;
pub use draft::RegistrationDraft;
pub use engine::{reconcile, reconcile_with};
pub use error::AddressError;
pub use model::{ParsedAddress, RawLocation, ReconcileOptions, ReconcileOutcome, ReconciledAddress};
pub use postal::PostalCode;
pub use segments::AddressParts;
pub use states::FederativeUnit;
