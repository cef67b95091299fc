use std::{fs, io::{BufWriter, Write}, path::Path};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

pub(crate) fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Write a file through a temporary sibling and rename it into place.
/// Refuses to replace an existing file unless `force` is set.
pub(crate) fn write_atomic<F>(target: &Path, force: bool, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    assert_not_stdout(target)?;

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }

    let mut tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().context("flush temp file")?;
    }
    tmp.as_file().sync_all().ok(); // best-effort fsync
    tmp.persist(target)
        .with_context(|| format!("rename to {}", target.display()))?;
    Ok(())
}
