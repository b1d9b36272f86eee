// Discrepancy report export (XLSX / CSV)

use std::path::Path;

use addrcheck_recon::config::ReportLabels;
use addrcheck_recon::model::{DiscrepancyRecord, MismatchFlag};
use rust_xlsxwriter::{Format, Workbook};

/// Report header row, one entry per exported column.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Регистрационный номер",
    "Адрес из ФНС",
    "Адрес из ОФД",
    "Ошибка",
    "Ошибка в Индексе",
    "Ошибка в адресе",
];

const SHEET_NAME: &str = "Ошибки";

/// Column widths in characters, matched to REPORT_COLUMNS.
const COLUMN_WIDTHS: [f64; 6] = [20.0, 60.0, 60.0, 12.0, 18.0, 40.0];

/// Render records as string rows (header not included).
///
/// The address-error list is rendered as a JSON array so an empty list and a
/// list with one empty-looking entry stay distinguishable.
pub fn report_rows(records: &[DiscrepancyRecord], labels: &ReportLabels) -> Vec<[String; 6]> {
    records
        .iter()
        .map(|r| {
            let flag = match r.mismatch {
                MismatchFlag::Present => labels.flag_present.clone(),
                MismatchFlag::Absent => labels.flag_absent.clone(),
            };
            let address_errors =
                serde_json::to_string(&r.address_errors).unwrap_or_else(|_| "[]".into());
            [
                r.device_id.clone(),
                r.registry_address.clone(),
                r.operational_address.clone(),
                flag,
                r.index_error.clone().unwrap_or_default(),
                address_errors,
            ]
        })
        .collect()
}

/// Write the report as a single-sheet XLSX workbook.
pub fn write_xlsx(
    records: &[DiscrepancyRecord],
    labels: &ReportLabels,
    path: &Path,
) -> Result<usize, String> {
    let rows = report_rows(records, labels);

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet '{SHEET_NAME}': {e}"))?;

    let header_format = Format::new().set_bold();
    for (col, title) in REPORT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| format!("Failed to write header: {e}"))?;
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTHS[col])
            .map_err(|e| format!("Failed to set column width: {e}"))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Failed to freeze header: {e}"))?;

    for (i, row) in rows.iter().enumerate() {
        // rust_xlsxwriter uses 0-based row/col as u32/u16; row 0 is the header
        let row32 = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row32, col as u16, value)
                .map_err(|e| format!("Failed to write row {}: {e}", i + 1))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;

    Ok(rows.len())
}

/// Write the report as `;`-delimited CSV with a UTF-8 BOM, the form
/// spreadsheet tools open without an import dialog.
pub fn write_csv(
    records: &[DiscrepancyRecord],
    labels: &ReportLabels,
    path: &Path,
) -> Result<usize, String> {
    let rows = report_rows(records, labels);

    let mut buf: Vec<u8> = "\u{feff}".as_bytes().to_vec();
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(&mut buf);
        writer.write_record(REPORT_COLUMNS).map_err(|e| e.to_string())?;
        for row in &rows {
            writer.write_record(row).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
    }

    std::fs::write(path, &buf).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(rows.len())
}
