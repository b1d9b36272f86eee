//! CSV exports → record collections.
//!
//! Addresses are lowercased on load. Duplicate device ids keep their first
//! position and take the last row's address.

use log::{debug, warn};

use crate::config::{RegistrySourceConfig, SourceConfig};
use crate::error::ReconError;
use crate::model::{
    DeviceAddressRecord, OperationalAddressRecord, OperationalRecords, RegistryRecords,
};

const UTF8_BOM: char = '\u{feff}';

/// Parse the registry export, splitting each address into segments.
pub fn load_registry_csv(
    csv_data: &str,
    config: &RegistrySourceConfig,
) -> Result<RegistryRecords, ReconError> {
    let mut records = RegistryRecords::new();
    for_each_row("registry", csv_data, &config.source, |device_id, address| {
        let segments = address
            .split(config.segment_delimiter.as_str())
            .map(str::to_string)
            .collect();
        let record = DeviceAddressRecord::new(device_id, segments);
        if records.insert(device_id.to_string(), record).is_some() {
            warn!("registry: duplicate device id '{device_id}', last row wins");
        }
    })?;
    debug!("registry: loaded {} device(s)", records.len());
    Ok(records)
}

/// Parse the terminal export. Addresses stay unsegmented.
pub fn load_operational_csv(
    csv_data: &str,
    config: &SourceConfig,
) -> Result<OperationalRecords, ReconError> {
    let mut records = OperationalRecords::new();
    for_each_row("operational", csv_data, config, |device_id, address| {
        let record = OperationalAddressRecord::new(device_id, address);
        if records.insert(device_id.to_string(), record).is_some() {
            warn!("operational: duplicate device id '{device_id}', last row wins");
        }
    })?;
    debug!("operational: loaded {} device(s)", records.len());
    Ok(records)
}

/// Walk data rows, handing `(device_id, lowercased address)` to `row_fn`.
fn for_each_row(
    source: &str,
    csv_data: &str,
    config: &SourceConfig,
    mut row_fn: impl FnMut(&str, String),
) -> Result<(), ReconError> {
    let csv_err = |e: csv::Error| ReconError::Csv {
        source: source.into(),
        message: e.to_string(),
    };

    let data = csv_data.strip_prefix(UTF8_BOM).unwrap_or(csv_data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                source: source.into(),
                column: name.into(),
            })
    };

    let id_idx = idx(&config.id_column)?;
    let address_idx = idx(&config.address_column)?;

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let device_id = record.get(id_idx).unwrap_or("");
        if device_id.is_empty() {
            // header is line 1
            warn!("{source}: row {} has no device id, skipped", line + 2);
            continue;
        }
        let address = record.get(address_idx).unwrap_or("").to_lowercase();
        row_fn(device_id, address);
    }

    Ok(())
}
