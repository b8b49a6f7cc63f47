//! JSON and CSV export of status tables

use super::error::ExportError;
use super::table::StatusTable;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["Region", "Product", "Language", "Status", "Error"];

/// Pretty-printed JSON array of cell records
pub fn to_json(table: &StatusTable) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Write the table as CSV with a header row. Failed cells have an empty
/// status and a filled error column.
pub fn write_csv<W: Write>(table: &StatusTable, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in table.records() {
        csv_writer.write_record([
            record.region.as_str(),
            record.product.as_str(),
            record.language.as_str(),
            record.status.as_deref().unwrap_or(""),
            record.error.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv(table: &StatusTable) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
