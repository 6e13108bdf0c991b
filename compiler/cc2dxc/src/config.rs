//! Conversion settings.

use cc2dx_catalog::TargetVersion;

/// Settings for one conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Descend into subdirectories.
    pub subfolders: bool,
    /// Copy each input to `<name>.bak` before overwriting it.
    pub backup: bool,
    /// Engine version to emit code for.
    pub target: TargetVersion,
    /// Convert files on a thread pool.
    pub parallel: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            subfolders: false,
            backup: false,
            target: TargetVersion::V2,
            parallel: true,
        }
    }
}
