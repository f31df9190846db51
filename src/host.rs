// Generalizes the original foreign-function boundary (bytes copied across an
// interpreter edge, plus an error channel and a resolve/reject pair for the
// promise-returning call shape) into a capability the core takes instead of
// being coupled to a specific embedding environment.

use std::fs;
use std::path::{Path, PathBuf};

use log::error;

/// What the quantizer core needs from whatever is hosting it: a place to
/// report a failure, and (for callers using the promise-style contract) a
/// way to resolve or reject the call.
pub trait HostBridge {
    fn report_error(&self, message: &str);
    fn resolve(&self, buffer: &[u8]);
    fn reject(&self, message: &str);
}

/// Default bridge: every call is routed through the `log` facade. Used by
/// the library's own tests and by any embedder that only cares about the
/// return value, not about resolve/reject semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBridge;

impl HostBridge for LoggingBridge {
    fn report_error(&self, message: &str) {
        error!("{message}");
    }

    fn resolve(&self, buffer: &[u8]) {
        log::debug!("resolved with {} bytes", buffer.len());
    }

    fn reject(&self, message: &str) {
        error!("rejected: {message}");
    }
}

/// Bridge used by the native CLI: in addition to logging, persists the
/// resolved or rejected payload to a file so a file-backed caller has
/// somewhere to look for the result.
pub struct FileBridge {
    out_path: PathBuf,
}

impl FileBridge {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) {
        if let Err(e) = fs::write(path, bytes) {
            error!("failed to write {}: {e}", path.display());
        }
    }
}

impl HostBridge for FileBridge {
    fn report_error(&self, message: &str) {
        error!("{message}");
    }

    fn resolve(&self, buffer: &[u8]) {
        self.write(&self.out_path, buffer);
    }

    fn reject(&self, message: &str) {
        error!("rejected: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingBridge {
        errors: RefCell<Vec<String>>,
    }

    impl HostBridge for RecordingBridge {
        fn report_error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
        fn resolve(&self, _buffer: &[u8]) {}
        fn reject(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn report_error_is_recorded() {
        let bridge = RecordingBridge::default();
        bridge.report_error("boom");
        assert_eq!(bridge.errors.borrow().as_slice(), &["boom".to_string()]);
    }

    #[test]
    fn file_bridge_persists_resolved_bytes() {
        let dir = std::env::temp_dir().join(format!("pbn_quantizer_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.bin");
        let bridge = FileBridge::new(&path);
        bridge.resolve(&[1, 2, 3]);
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        let _ = fs::remove_dir_all(&dir);
    }
}
