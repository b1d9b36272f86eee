use indexmap::IndexMap;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Registry-side address, split into positional segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAddressRecord {
    pub device_id: String,
    pub segments: Vec<String>,
}

impl DeviceAddressRecord {
    pub fn new(device_id: impl Into<String>, segments: Vec<String>) -> Self {
        Self {
            device_id: device_id.into(),
            segments,
        }
    }

    /// Segments rejoined for display.
    pub fn full_address(&self) -> String {
        self.segments.join(",")
    }
}

/// Terminal-side address, kept as one searchable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationalAddressRecord {
    pub device_id: String,
    pub address: String,
}

impl OperationalAddressRecord {
    pub fn new(device_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            address: address.into(),
        }
    }
}

/// Registry records keyed by device id, in file order.
pub type RegistryRecords = IndexMap<String, DeviceAddressRecord>;

/// Terminal records keyed by device id, in file order.
pub type OperationalRecords = IndexMap<String, OperationalAddressRecord>;

/// Both loaded sources.
#[derive(Debug, Default)]
pub struct ReconInput {
    pub registry: RegistryRecords,
    pub operational: OperationalRecords,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchFlag {
    Present,
    Absent,
}

impl MismatchFlag {
    pub fn is_present(self) -> bool {
        self == Self::Present
    }
}

impl std::fmt::Display for MismatchFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// Per-device comparison outcome. One per device id found in both sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscrepancyRecord {
    pub device_id: String,
    pub registry_address: String,
    pub operational_address: String,
    pub mismatch: MismatchFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_error: Option<String>,
    pub address_errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub devices_compared: usize,
    pub devices_with_mismatch: usize,
    pub index_errors: usize,
    pub address_errors: usize,
    pub registry_only: usize,
    pub operational_only: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub records: Vec<DiscrepancyRecord>,
}
