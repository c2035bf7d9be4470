use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::PipelineError;
use crate::import::Statement;

/// Writes the header and records as CSV with every field quoted.
pub fn write_csv(writer: impl Write, statement: &Statement) -> Result<(), PipelineError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_writer(writer);
    writer.write_record(&statement.header)?;
    for record in &statement.records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the statement as UTF-8 CSV to `path`, replacing any existing file.
pub fn write_statement(path: &Path, statement: &Statement) -> Result<(), PipelineError> {
    log::info!("Writing {}...", path.display());

    let mut content = Vec::new();
    write_csv(&mut content, statement)?;

    // Write to a sibling temp file first so a failed write doesn't leave a truncated output
    let filename = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path {} has no file name", path.display()),
        )
    })?;
    let mut tmp_filename = filename.to_os_string();
    tmp_filename.push(".tmp");
    let tmppath = path.with_file_name(tmp_filename);
    if let Err(err) =
        std::fs::write(&tmppath, content).and_then(|()| std::fs::rename(&tmppath, path))
    {
        if let Err(remove_err) = std::fs::remove_file(&tmppath) {
            log::debug!(
                "Could not remove {}: {}",
                tmppath.display(),
                remove_err
            );
        }
        return Err(err.into());
    }

    log::info!("Writing {}...done", path.display());
    Ok(())
}
