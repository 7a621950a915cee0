//! CSV side-export of sheet data

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::row::{Row, SheetData};

/// Writes one `<title>.csv` per non-empty sheet in `data` into `dir`, returning
/// the paths written. Sheets without rows produce no file.
pub fn write_csv<P: AsRef<Path>>(dir: P, data: &SheetData) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (title, rows) in data {
        if rows.is_empty() {
            continue;
        }
        let path = dir.as_ref().join(csv_file_name(title));
        write_rows(File::create(&path)?, rows)?;
        written.push(path);
    }
    for path in &written {
        info!("Wrote output to {}", path.display());
    }
    Ok(written)
}

/// Writes `rows` as CSV records of their cell texts. Rows may differ in length.
pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for row in rows {
        csv_writer.write_record(row.to_cells())?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_file_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if std::path::is_separator(c) { '_' } else { c })
        .collect();
    format!("{}.csv", name)
}
