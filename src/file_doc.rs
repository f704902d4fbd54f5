//! Loading and saving the JSON documents behind the file-backed adapters.

use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const LOG_TARGET: &str = "  file_doc";

/// Load a document from a file, returning the default value when the file does not exist yet.
pub fn load_or_default<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(target: LOG_TARGET, "'{}' does not exist yet, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(e).into_app_err_with(|| format!("unable to open file '{}'", path.display())),
    };

    serde_json::from_reader(BufReader::new(file)).into_app_err_with(|| format!("unable to parse file '{}'", path.display()))
}

/// Save a document by writing a sibling temporary file and renaming it into place,
/// so readers never observe a half-written document.
pub fn save<T>(data: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let mut tmp_name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let file = create_private(&tmp_path).into_app_err_with(|| format!("unable to create file '{}'", tmp_path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).into_app_err_with(|| format!("unable to write file '{}'", tmp_path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush file '{}'", tmp_path.display()))?;
    drop(writer);

    fs::rename(&tmp_path, path).into_app_err_with(|| format!("unable to replace file '{}'", path.display()))?;
    Ok(())
}

/// Documents may hold secrets, so they are only readable by the owner where the platform allows it.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    File::create(path)
}
