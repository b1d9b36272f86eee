use std::path::PathBuf;

use addrcheck_recon::config::ReconConfig;
use addrcheck_recon::loader::{load_operational_csv, load_registry_csv};
use addrcheck_recon::model::{MismatchFlag, ReconInput, ReconResult};
use addrcheck_recon::{reconcile_all, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_input(config: &ReconConfig) -> ReconInput {
    let dir = fixtures_dir();
    let read = |file: &str| {
        let path = dir.join(file);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
    };

    ReconInput {
        registry: load_registry_csv(&read(&config.registry.source.file), &config.registry).unwrap(),
        operational: load_operational_csv(&read(&config.operational.file), &config.operational)
            .unwrap(),
    }
}

fn load_and_run() -> ReconResult {
    let toml = std::fs::read_to_string(fixtures_dir().join("addrcheck.toml")).unwrap();
    let config = ReconConfig::from_toml(&toml).unwrap();
    run(&config, &load_input(&config)).unwrap()
}

#[test]
fn fixture_summary() {
    let result = load_and_run();
    assert_eq!(result.meta.config_name, "ФНС vs ОФД");
    assert_eq!(result.summary.devices_compared, 4);
    assert_eq!(result.summary.devices_with_mismatch, 3);
    assert_eq!(result.summary.index_errors, 1);
    assert_eq!(result.summary.address_errors, 3);
    assert_eq!(result.summary.registry_only, 1);
    assert_eq!(result.summary.operational_only, 1);
}

#[test]
fn fixture_records_in_registry_order() {
    let result = load_and_run();
    let ids: Vec<&str> = result.records.iter().map(|r| r.device_id.as_str()).collect();
    assert_eq!(ids, vec!["0001", "0002", "0003", "0006"]);
}

#[test]
fn fixture_record_details() {
    let result = load_and_run();
    let by_id = |id: &str| result.records.iter().find(|r| r.device_id == id).unwrap();

    let clean = by_id("0001");
    assert_eq!(clean.mismatch, MismatchFlag::Absent);
    assert_eq!(clean.registry_address, "101000,643,77,москва,,,москва,,ул. ленина,,12а,");
    assert_eq!(clean.operational_address, "101000, москва, ленина 12 а");

    let street = by_id("0002");
    assert_eq!(street.mismatch, MismatchFlag::Present);
    assert_eq!(street.address_errors, vec!["пр-кт мира"]);
    assert!(street.index_error.is_none());

    let index = by_id("0003");
    assert_eq!(index.index_error.as_deref(), Some("420000"));
    assert!(index.address_errors.is_empty());

    let building = by_id("0006");
    assert_eq!(building.address_errors, vec!["стр. 2", "10б"]);
}

#[test]
fn reconcile_all_is_idempotent() {
    let toml = std::fs::read_to_string(fixtures_dir().join("addrcheck.toml")).unwrap();
    let config = ReconConfig::from_toml(&toml).unwrap();
    let input = load_input(&config);

    let first = reconcile_all(&input.registry, &input.operational).unwrap();
    let second = reconcile_all(&input.registry, &input.operational).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn malformed_registry_row_fails_the_run() {
    let config = ReconConfig::with_files("fns.csv", "ofd.csv");
    let registry_csv = "Регистрационный номер;Адрес места установки\n0001;101000,643,77\n";
    let operational_csv = "Регистрационный номер ККТ;Адрес расчетов\n0001;москва\n";
    let input = ReconInput {
        registry: load_registry_csv(registry_csv, &config.registry).unwrap(),
        operational: load_operational_csv(operational_csv, &config.operational).unwrap(),
    };

    let err = run(&config, &input).unwrap_err();
    assert!(err.to_string().contains("malformed registry record '0001'"), "{err}");
}
