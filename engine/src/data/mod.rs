// Text preparation for HTML, CSV and CutList Plus output
pub mod csv_export;
pub mod sanitizer;

pub use csv_export::{write_rows, CsvDialect};
