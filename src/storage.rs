use crate::models::SpendRecord;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save spending rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[SpendRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("items", "quantity", "actual_cost", "date", "row_id", "row_name"))?;
    for r in records {
        wtr.serialize((
            r.items(),
            r.quantity(),
            r.actual_cost(),
            r.date(),
            r.row_id(),
            r.row_name(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save spending rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[SpendRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
