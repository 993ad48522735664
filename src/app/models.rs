use std::path::PathBuf;

/// Vendor tool defaults for the two generated inputs.
pub const DEFAULT_PROJECT_FILE: &str = ".mxproject";
pub const DEFAULT_BUILD_RULE_FILE: &str = "Debug/Core/Src/subdir.mk";

/// Inputs larger than this are rejected instead of truncated.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Name of the generated file, written into the project root.
pub const OUTPUT_FILE: &str = ".clangd";

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub wall: bool,
    pub project_file: PathBuf,
    pub build_rule_file: PathBuf,
    pub max_file_size: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            wall: false,
            project_file: PathBuf::from(DEFAULT_PROJECT_FILE),
            build_rule_file: PathBuf::from(DEFAULT_BUILD_RULE_FILE),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Everything pulled out of the project files during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFlags {
    /// Macro names in occurrence order, without the `-D` prefix. May be empty.
    pub defines: Vec<String>,
    /// Include path fragments relative to the project root. Never empty.
    pub header_paths: Vec<String>,
}
