//! Throwaway mirror roots

use std::path::Path;

use mirror_fs::MirrorLayout;
use tempfile::TempDir;

/// A mirror root in a temporary directory, removed on drop.
pub struct TempMirror {
    _dir: TempDir,
    layout: MirrorLayout,
}

impl TempMirror {
    /// Create a fresh mirror root with the schemas directory in place.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let layout = MirrorLayout::new(dir.path());
        layout.ensure().expect("create mirror layout");
        Self { _dir: dir, layout }
    }

    pub fn layout(&self) -> &MirrorLayout {
        &self.layout
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }
}

impl Default for TempMirror {
    fn default() -> Self {
        Self::new()
    }
}
