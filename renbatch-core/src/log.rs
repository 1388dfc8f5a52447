use crate::error::{RenameError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append-only, timestamped log of one run.
///
/// Without a log file every call is a no-op.
#[derive(Debug, Default)]
pub struct RunLog {
    file: Option<File>,
}

impl RunLog {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let file = if let Some(path) = path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(RenameError::Log)?;
                }
            }
            Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(RenameError::Log)?,
            )
        } else {
            None
        };

        Ok(Self { file })
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: &str) -> Result<()> {
        if let Some(ref mut file) = self.file {
            writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            )
            .and_then(|()| file.flush())
            .map_err(RenameError::Log)?;
        }
        Ok(())
    }
}
