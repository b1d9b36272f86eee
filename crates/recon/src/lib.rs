//! `addrcheck-recon` — registry vs. terminal address reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns one discrepancy
//! record per device found in both sources. No file or CLI dependencies.

pub mod building;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod loader;
pub mod model;
pub mod stopwords;
pub mod summary;

pub use config::ReconConfig;
pub use engine::{reconcile, reconcile_all, run};
pub use error::ReconError;
pub use model::{
    DeviceAddressRecord, DiscrepancyRecord, MismatchFlag, OperationalAddressRecord, ReconInput,
    ReconResult,
};
