// File I/O operations

pub mod decode;
pub mod report;

pub use decode::read_file_as_utf8;
pub use report::{report_rows, write_csv, write_xlsx, REPORT_COLUMNS};
