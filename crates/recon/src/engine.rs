use log::{debug, info};

use crate::building::buildings_equivalent;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::field::{
    classify, is_building_field, must_check, FieldPosition, MismatchKind, PRIORITY_ORDER,
};
use crate::model::{
    DeviceAddressRecord, DiscrepancyRecord, MismatchFlag, OperationalAddressRecord,
    OperationalRecords, ReconInput, ReconMeta, ReconResult, RegistryRecords,
};
use crate::stopwords::remove_stop_words;
use crate::summary::compute_summary;

/// Run reconciliation over both loaded sources. Returns records + summary.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let records = reconcile_all(&input.registry, &input.operational)?;

    let registry_only = input
        .registry
        .keys()
        .filter(|id| !input.operational.contains_key(*id))
        .count();
    let operational_only = input
        .operational
        .keys()
        .filter(|id| !input.registry.contains_key(*id))
        .count();

    let summary = compute_summary(&records, registry_only, operational_only);
    info!(
        "compared {} device(s): {} with mismatches, {} registry-only, {} operational-only",
        summary.devices_compared,
        summary.devices_with_mismatch,
        summary.registry_only,
        summary.operational_only,
    );

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        records,
    })
}

/// Reconcile every registry device that also has a terminal record, in
/// registry order. Devices present on one side only are left out.
pub fn reconcile_all(
    registry: &RegistryRecords,
    operational: &OperationalRecords,
) -> Result<Vec<DiscrepancyRecord>, ReconError> {
    let mut records = Vec::new();
    for (device_id, registry_record) in registry {
        let Some(operational_record) = operational.get(device_id) else {
            debug!("device '{device_id}': no terminal record, skipped");
            continue;
        };
        records.push(reconcile(registry_record, operational_record)?);
    }
    Ok(records)
}

/// Compare one device's registry segments against its terminal address.
pub fn reconcile(
    registry: &DeviceAddressRecord,
    operational: &OperationalAddressRecord,
) -> Result<DiscrepancyRecord, ReconError> {
    let required = FieldPosition::required_len();
    if registry.segments.len() < required {
        return Err(ReconError::MalformedRecord {
            device_id: registry.device_id.clone(),
            segments: registry.segments.len(),
            required,
        });
    }

    let operational_address = operational.address.as_str();
    let mut mismatches: Vec<&str> = Vec::new();

    for position in PRIORITY_ORDER {
        if !must_check(position) {
            continue;
        }
        let segment = registry.segments[position.raw_index()].as_str();
        if segment.is_empty() {
            continue;
        }
        if is_building_field(position) && buildings_equivalent(segment, operational_address) {
            continue;
        }
        if !operational_address.contains(remove_stop_words(segment).as_str()) {
            debug!(
                "device '{}': {position} '{segment}' not found in terminal address",
                registry.device_id
            );
            mismatches.push(segment);
        }
    }

    let mut record = DiscrepancyRecord {
        device_id: registry.device_id.clone(),
        registry_address: registry.full_address(),
        operational_address: operational.address.clone(),
        mismatch: MismatchFlag::Absent,
        index_error: None,
        address_errors: Vec::new(),
    };

    if !mismatches.is_empty() {
        record.mismatch = MismatchFlag::Present;
        for mismatch in mismatches {
            match classify(mismatch) {
                // single slot: a later index-shaped mismatch replaces an earlier one
                MismatchKind::Index => record.index_error = Some(mismatch.to_string()),
                MismatchKind::Address => record.address_errors.push(mismatch.to_string()),
            }
        }
    }

    Ok(record)
}
