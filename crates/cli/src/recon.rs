//! `addrcheck run` / `addrcheck validate` — registry vs. terminal address reconciliation.

use std::path::{Path, PathBuf};

use clap::Args;
use log::info;

use addrcheck_io::{read_file_as_utf8, write_csv, write_xlsx};
use addrcheck_recon::loader::{load_operational_csv, load_registry_csv};
use addrcheck_recon::{ReconConfig, ReconInput, ReconResult};

use crate::exit_codes::{
    recon_exit_code, EXIT_INPUT, EXIT_INVALID_CONFIG, EXIT_MISMATCH, EXIT_OUTPUT,
};
use crate::CliError;

/// Report written when neither the config nor the flags name an output.
const DEFAULT_XLSX: &str = "errors.xlsx";

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to an addrcheck.toml config file
    pub config: Option<PathBuf>,

    /// Registry (ФНС) CSV export; overrides the config
    #[arg(long, env = "ADDRCHECK_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Terminal (ОФД) CSV export; overrides the config
    #[arg(long, env = "ADDRCHECK_OPERATIONAL")]
    pub operational: Option<PathBuf>,

    /// Write the report as XLSX
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Write the report as `;`-delimited CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the full JSON result to file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output JSON to stdout instead of human summary
    #[arg(long)]
    pub json: bool,
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Resolved input and output locations for one run.
struct RunPlan {
    config: ReconConfig,
    registry: PathBuf,
    operational: PathBuf,
    xlsx: Option<PathBuf>,
    csv: Option<PathBuf>,
    json_file: Option<PathBuf>,
}

fn plan(args: &RunArgs) -> Result<RunPlan, CliError> {
    let (config, base_dir) = match &args.config {
        Some(path) => {
            let config_str = std::fs::read_to_string(path).map_err(|e| {
                recon_err(EXIT_INVALID_CONFIG, format!("cannot read config {}: {e}", path.display()))
            })?;
            let config = ReconConfig::from_toml(&config_str)
                .map_err(|e| recon_err(EXIT_INVALID_CONFIG, e.to_string()))?;
            // Resolve file paths relative to config file's directory
            let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (config, base_dir)
        }
        None => {
            let (Some(registry), Some(operational)) = (&args.registry, &args.operational) else {
                return Err(CliError::usage("provide a config file or both --registry and --operational")
                    .with_hint("addrcheck run --registry fns.csv --operational ofd.csv"));
            };
            let config = ReconConfig::with_files(
                registry.to_string_lossy(),
                operational.to_string_lossy(),
            );
            (config, PathBuf::from("."))
        }
    };

    let from_config = |file: &Option<String>| file.as_ref().map(|f| base_dir.join(f));

    let registry = args
        .registry
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.registry.source.file));
    let operational = args
        .operational
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.operational.file));
    let mut xlsx = args.xlsx.clone().or_else(|| from_config(&config.output.xlsx));
    let csv = args.csv.clone().or_else(|| from_config(&config.output.csv));
    let json_file = args.output.clone().or_else(|| from_config(&config.output.json));

    if xlsx.is_none() && csv.is_none() && json_file.is_none() && !args.json {
        xlsx = Some(PathBuf::from(DEFAULT_XLSX));
    }

    Ok(RunPlan { config, registry, operational, xlsx, csv, json_file })
}

fn read_input(path: &Path) -> Result<String, CliError> {
    read_file_as_utf8(path).map_err(|e| recon_err(EXIT_INPUT, e))
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let plan = plan(&args)?;
    let config = &plan.config;

    info!("registry: {}", plan.registry.display());
    let registry_csv = read_input(&plan.registry)?;
    let registry = load_registry_csv(&registry_csv, &config.registry)
        .map_err(|e| recon_err(recon_exit_code(&e), e.to_string()))?;

    info!("operational: {}", plan.operational.display());
    let operational_csv = read_input(&plan.operational)?;
    let operational = load_operational_csv(&operational_csv, &config.operational)
        .map_err(|e| recon_err(recon_exit_code(&e), e.to_string()))?;

    let input = ReconInput { registry, operational };

    // Run engine
    let result = addrcheck_recon::run(config, &input)
        .map_err(|e| recon_err(recon_exit_code(&e), e.to_string()))?;

    write_outputs(&plan, &result, args.json)?;
    print_summary(&result);

    // exit 1 without an error line
    if result.summary.devices_with_mismatch > 0 {
        return Err(recon_err(EXIT_MISMATCH, ""));
    }

    Ok(())
}

fn write_outputs(plan: &RunPlan, result: &ReconResult, json_stdout: bool) -> Result<(), CliError> {
    let labels = &plan.config.report;

    if let Some(ref path) = plan.xlsx {
        let rows = write_xlsx(&result.records, labels, path)
            .map_err(|e| recon_err(EXIT_OUTPUT, e))?;
        eprintln!("wrote {} ({rows} row(s))", path.display());
    }

    if let Some(ref path) = plan.csv {
        let rows = write_csv(&result.records, labels, path)
            .map_err(|e| recon_err(EXIT_OUTPUT, e))?;
        eprintln!("wrote {} ({rows} row(s))", path.display());
    }

    if plan.json_file.is_none() && !json_stdout {
        return Ok(());
    }

    let json_str = serde_json::to_string_pretty(result)
        .map_err(|e| recon_err(EXIT_OUTPUT, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = plan.json_file {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(EXIT_OUTPUT, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_stdout {
        println!("{json_str}");
    }

    Ok(())
}

fn print_summary(result: &ReconResult) {
    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} device(s) compared: {} with mismatches ({} index, {} address); {} registry-only, {} terminal-only (not reported)",
        s.devices_compared,
        s.devices_with_mismatch,
        s.index_errors,
        s.address_errors,
        s.registry_only,
        s.operational_only,
    );
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| recon_err(EXIT_INVALID_CONFIG, format!("cannot read config: {e}")))?;

    match ReconConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' (registry: {}, terminal: {})",
                config.name, config.registry.source.file, config.operational.file,
            );
            Ok(())
        }
        Err(e) => Err(recon_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_without_config_requires_both_sources() {
        let args = RunArgs {
            registry: Some("fns.csv".into()),
            ..RunArgs::default()
        };
        let err = plan(&args).err().unwrap();
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
    }

    #[test]
    fn plan_defaults_to_xlsx_report() {
        let args = RunArgs {
            registry: Some("fns.csv".into()),
            operational: Some("ofd.csv".into()),
            ..RunArgs::default()
        };
        let plan = plan(&args).unwrap();
        assert_eq!(plan.registry, PathBuf::from("fns.csv"));
        assert_eq!(plan.xlsx, Some(PathBuf::from(DEFAULT_XLSX)));
        assert!(plan.csv.is_none());
    }

    #[test]
    fn plan_json_stdout_skips_default_report() {
        let args = RunArgs {
            registry: Some("fns.csv".into()),
            operational: Some("ofd.csv".into()),
            json: true,
            ..RunArgs::default()
        };
        assert!(plan(&args).unwrap().xlsx.is_none());
    }
}
