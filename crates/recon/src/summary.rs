use crate::model::{DiscrepancyRecord, ReconSummary};

/// Compute summary statistics from discrepancy records.
///
/// `registry_only` / `operational_only` count device ids without a
/// counterpart; they never appear in `records`.
pub fn compute_summary(
    records: &[DiscrepancyRecord],
    registry_only: usize,
    operational_only: usize,
) -> ReconSummary {
    let mut devices_with_mismatch = 0;
    let mut index_errors = 0;
    let mut address_errors = 0;

    for r in records {
        if r.mismatch.is_present() {
            devices_with_mismatch += 1;
        }
        if r.index_error.is_some() {
            index_errors += 1;
        }
        address_errors += r.address_errors.len();
    }

    ReconSummary {
        devices_compared: records.len(),
        devices_with_mismatch,
        index_errors,
        address_errors,
        registry_only,
        operational_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MismatchFlag;

    fn record(index_error: Option<&str>, address_errors: &[&str]) -> DiscrepancyRecord {
        let mismatch = if index_error.is_some() || !address_errors.is_empty() {
            MismatchFlag::Present
        } else {
            MismatchFlag::Absent
        };
        DiscrepancyRecord {
            device_id: "k".into(),
            registry_address: String::new(),
            operational_address: String::new(),
            mismatch,
            index_error: index_error.map(str::to_string),
            address_errors: address_errors.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn summary_counts() {
        let records = vec![
            record(None, &[]),
            record(Some("123456"), &[]),
            record(Some("654321"), &["ленина", "12б"]),
            record(None, &["мира"]),
        ];
        let summary = compute_summary(&records, 3, 1);
        assert_eq!(summary.devices_compared, 4);
        assert_eq!(summary.devices_with_mismatch, 3);
        assert_eq!(summary.index_errors, 2);
        assert_eq!(summary.address_errors, 3);
        assert_eq!(summary.registry_only, 3);
        assert_eq!(summary.operational_only, 1);
    }
}
