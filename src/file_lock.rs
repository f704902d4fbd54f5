use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Log target for `file_lock`
const LOG_TARGET: &str = "      lock";

/// Guard that releases the lock when dropped
#[derive(Debug)]
pub struct FileLockGuard(File);

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.0) {
            log::warn!(target: LOG_TARGET, "Could not release file lock: {e:#}");
        }
    }
}

/// Path of the lock file that guards `data_path`
#[must_use]
pub fn lock_path_for(data_path: &Path) -> PathBuf {
    let mut name = data_path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".lock");
    data_path.with_file_name(name)
}

/// Acquire an exclusive advisory lock guarding `data_path`, waiting until it is available.
pub async fn acquire_file_lock(data_path: &Path) -> Result<FileLockGuard> {
    let lock_path = lock_path_for(data_path);

    if let Some(parent) = lock_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{}'", parent.display()))?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening lock file at '{}'", lock_path.display()))?;

    // Waiting on the lock may take a while, so keep it off the runtime thread
    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()
            .into_app_err_with(|| format!("acquiring exclusive lock at '{}'", lock_path.display()))?;
        log::debug!(target: LOG_TARGET, "Acquired lock at '{}'", lock_path.display());
        Ok::<_, ohno::AppError>(file)
    })
    .await
    .into_app_err("lock task panicked")??;

    Ok(FileLockGuard(file))
}
