use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};
use crate::record::Record;

/// Write records as CSV: header row, then one row per record.
///
/// The header is written even when there are no records.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> ScrapeResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(Record::COLUMNS)?;
    for record in records {
        writer.write_record(record.cells())?;
    }

    writer
        .flush()
        .map_err(|e| ScrapeError::export(format!("CSV flush failed: {}", e)))?;
    Ok(())
}

/// Export records to CSV bytes
pub fn to_csv_bytes(records: &[Record]) -> ScrapeResult<Vec<u8>> {
    debug!("Exporting {} records to CSV", records.len());

    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

/// Read records back from CSV with a `Name,Price,Image URL` header
pub fn read_csv<R: Read>(reader: R) -> ScrapeResult<Vec<Record>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<Record>() {
        records.push(row?);
    }
    Ok(records)
}
