use std::io::Write;
use tracing::debug;

use crate::error::ScrapeResult;
use crate::record::Record;

/// Write records as a JSON array of objects, UTF-8
pub fn write_json<W: Write>(records: &[Record], writer: W, pretty: bool) -> ScrapeResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, records)?;
    } else {
        serde_json::to_writer(writer, records)?;
    }
    Ok(())
}

/// Export records to JSON bytes; compact unless `pretty`
pub fn to_json_bytes(records: &[Record], pretty: bool) -> ScrapeResult<Vec<u8>> {
    debug!("Exporting {} records to JSON (pretty: {})", records.len(), pretty);

    let mut buffer = Vec::new();
    write_json(records, &mut buffer, pretty)?;
    Ok(buffer)
}

/// Read records back from a JSON array
pub fn read_json(bytes: &[u8]) -> ScrapeResult<Vec<Record>> {
    Ok(serde_json::from_slice(bytes)?)
}
