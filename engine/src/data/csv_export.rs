use super::sanitizer::{to_dialect_safe_csv, to_generic_csv, to_locale_decimal};
use crate::config::CutlistSettings;
use crate::error::CutlistError;
use csv::{QuoteStyle, WriterBuilder};
use cutlist_shared::models::{PartRow, Separator};
use std::io::Write;

const HEADER: [&str; 6] = ["Part", "Quantity", "Length", "Width", "Thickness", "Material"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvDialect {
    /// Spreadsheet CSV (Excel, LibreOffice).
    Generic,
    /// CutList Plus import file: every field quoted, inch marks doubled.
    CutListPlus,
}

/// Writes `rows` as a cut list with a header line.
///
/// For `Generic`, only the dimension columns are localized to `separator`;
/// names and materials are written as given.
pub fn write_rows<W: Write>(
    writer: W,
    rows: &[PartRow],
    dialect: CsvDialect,
    separator: Separator,
    settings: &CutlistSettings,
) -> Result<(), CutlistError> {
    let quote_style = match dialect {
        CsvDialect::Generic => QuoteStyle::Necessary,
        // Fields arrive already quoted and escaped.
        CsvDialect::CutListPlus => QuoteStyle::Never,
    };
    let mut wtr = WriterBuilder::new()
        .delimiter(settings.delimiter_byte()?)
        .quote_style(quote_style)
        .from_writer(writer);

    wtr.write_record(HEADER.iter().map(|h| encode_field(h, dialect)))?;

    for row in rows {
        let quantity = row.quantity.to_string();
        let record = match dialect {
            CsvDialect::Generic => [
                encode_field(&row.name, dialect),
                quantity,
                encode_field(&to_locale_decimal(&row.length, separator), dialect),
                encode_field(&to_locale_decimal(&row.width, separator), dialect),
                encode_field(&to_locale_decimal(&row.thickness, separator), dialect),
                encode_field(&row.material, dialect),
            ],
            CsvDialect::CutListPlus => [
                encode_field(&row.name, dialect),
                encode_field(&quantity, dialect),
                encode_field(&row.length, dialect),
                encode_field(&row.width, dialect),
                encode_field(&row.thickness, dialect),
                encode_field(&row.material, dialect),
            ],
        };
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    tracing::debug!("Wrote {} cut list rows ({:?})", rows.len(), dialect);
    Ok(())
}

fn encode_field(value: &str, dialect: CsvDialect) -> String {
    match dialect {
        CsvDialect::Generic => to_generic_csv(value),
        CsvDialect::CutListPlus => format!("\"{}\"", to_generic_csv(&to_dialect_safe_csv(value))),
    }
}
