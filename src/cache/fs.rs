// Filesystem primitives used by the cache.
// Kept behind a trait so directory creation and reads can be observed in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Create a single directory. Parents must already exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `contents`, truncating any existing file.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// `std::fs` backed filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Ensure `dir` exists, creating each missing segment from the root down.
///
/// Every segment is probed before it is created, and a segment that appears
/// between the probe and the create counts as created. The first segment that
/// cannot be created stops the walk; the error is logged and returned.
pub fn make_cache_path(fs: &dyn Filesystem, dir: &Path) -> io::Result<()> {
    if fs.exists(dir) {
        return Ok(());
    }

    let mut segments: Vec<PathBuf> = dir
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    segments.reverse();

    for segment in segments {
        if fs.is_dir(&segment) {
            continue;
        }
        match fs.create_dir(&segment) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && fs.is_dir(&segment) => {}
            Err(e) => {
                debug!("failed to create cache directory {}: {}", segment.display(), e);
                return Err(e);
            }
        }
    }

    Ok(())
}
