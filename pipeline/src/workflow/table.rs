use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn read_rows<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<T>> {
    let path_ref = path.as_ref();
    let mut reader = csv::Reader::from_path(path_ref)
        .with_context(|| format!("opening {}", path_ref.display()))?;
    let mut rows = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let row: T = row.with_context(|| format!("{} row {}", path_ref.display(), line + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write rows with a header line, creating parent directories as needed.
pub fn write_rows<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path_ref)
        .with_context(|| format!("creating {}", path_ref.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
