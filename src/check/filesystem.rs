// src/check/filesystem.rs

//! Direct-assertion checks over local paths.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{Check, CheckContext, CheckError, CheckFuture, Verdict};

/// A path exists. `what` names it in the failure message.
#[derive(Debug, Clone)]
pub struct PathExists {
    pub path: PathBuf,
    pub what: String,
}

impl Check for PathExists {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let path = ctx.resolve(&this.path);
            if !path.exists() {
                return Err(CheckError::assertion(format!(
                    "{} not found at {}",
                    this.what,
                    path.display()
                )));
            }
            Ok(Verdict::Pass)
        })
    }
}

/// A file carries at least one execute permission bit.
///
/// On platforms without Unix permission bits only existence is checked.
#[derive(Debug, Clone)]
pub struct ScriptExecutable {
    pub path: PathBuf,
}

impl Check for ScriptExecutable {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let path = ctx.resolve(&this.path);
            let metadata = fs::metadata(&path)
                .map_err(|e| CheckError::io(format!("reading metadata of {}", path.display()), e))?;

            if !is_executable(&metadata) {
                return Err(CheckError::assertion(format!(
                    "{} is not executable",
                    this.path.display()
                )));
            }
            Ok(Verdict::Pass)
        })
    }
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(metadata: &fs::Metadata) -> bool {
    metadata.is_file()
}

/// Create a scratch directory, verify it, remove it.
#[derive(Debug, Clone)]
pub struct ScratchDirectory {
    pub dir: PathBuf,
}

impl Check for ScratchDirectory {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let dir = ctx.resolve(&this.dir);

            if !dir.exists() {
                fs::create_dir(&dir)
                    .map_err(|e| CheckError::io(format!("creating {}", dir.display()), e))?;
            }

            if !dir.is_dir() {
                return Err(CheckError::assertion("Failed to create test directory"));
            }

            fs::remove_dir_all(&dir)
                .map_err(|e| CheckError::io(format!("removing {}", dir.display()), e))?;
            Ok(Verdict::Pass)
        })
    }
}

/// Write a file, read it back, compare, remove it.
#[derive(Debug, Clone)]
pub struct FileRoundTrip {
    pub file: PathBuf,
    pub content: String,
}

impl Check for FileRoundTrip {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let path = ctx.resolve(&this.file);

            fs::write(&path, this.content.as_bytes())
                .map_err(|e| CheckError::io(format!("writing {}", path.display()), e))?;
            let read_back = fs::read_to_string(&path);
            let cleanup = fs::remove_file(&path);

            let read_back =
                read_back.map_err(|e| CheckError::io(format!("reading {}", path.display()), e))?;
            if read_back != this.content {
                return Err(CheckError::assertion("File content mismatch"));
            }
            cleanup.map_err(|e| CheckError::io(format!("removing {}", path.display()), e))?;
            Ok(Verdict::Pass)
        })
    }
}

/// A directory exists and can be listed; its entries are logged.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub dir: PathBuf,
    pub what: String,
}

impl Check for DirectoryListing {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let dir = ctx.resolve(&this.dir);
            if !dir.is_dir() {
                return Err(CheckError::assertion(format!(
                    "{} directory not found",
                    this.what
                )));
            }

            let mut entries = Vec::new();
            for entry in fs::read_dir(&dir)
                .map_err(|e| CheckError::io(format!("reading dir {}", dir.display()), e))?
            {
                let entry =
                    entry.map_err(|e| CheckError::io(format!("reading dir {}", dir.display()), e))?;
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
            entries.sort();

            info!(dir = %dir.display(), entries = %entries.join(", "), "{} directory contents", this.what);
            Ok(Verdict::Pass)
        })
    }
}
