//! Filesystem utilities

use std::fs::File;
use std::path::Path;

use log::{debug, error};

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check that a path is a regular file that can be opened for reading
///
/// Logs the reason when the file is missing or unreadable.
pub fn is_readable_file(path: &str) -> bool {
    let path = Path::new(path);

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return false;
    }

    match File::open(path) {
        Ok(_) => {
            debug!("Dataset file is readable: {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to open {}: {}", path.display(), e);
            false
        }
    }
}
