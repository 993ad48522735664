use crate::app::extract::{define_flags, header_paths};
use crate::app::models::{ExtractedFlags, RuntimeConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{path} is {size} bytes, above the {limit} byte limit")]
    TooLarge { path: String, size: u64, limit: u64 },
}

/// Reads the generated project files below `root` and extracts their flags.
pub struct Scanner {
    root: PathBuf,
    project_file: PathBuf,
    build_rule_file: PathBuf,
    max_file_size: u64,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &RuntimeConfig) -> Self {
        Self {
            project_file: root.join(&config.project_file),
            build_rule_file: root.join(&config.build_rule_file),
            max_file_size: config.max_file_size,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build rules first, then the project metadata. The first failure aborts the scan.
    pub fn scan(&self) -> Result<ExtractedFlags> {
        let rules = self
            .read_blob(&self.build_rule_file)
            .with_context(|| format!("Failed to read build rules at {:?}", self.build_rule_file))?;
        let defines = define_flags(&String::from_utf8_lossy(&rules)).with_context(|| {
            format!("Failed to extract define flags from {:?}", self.build_rule_file)
        })?;

        if defines.is_empty() {
            log::warn!("⚠️ No -D flags found in {:?}", self.build_rule_file);
        } else {
            log::debug!("Found {} define(s): {}", defines.len(), defines.join(" "));
        }

        let metadata = self
            .read_blob(&self.project_file)
            .with_context(|| format!("Failed to read project file at {:?}", self.project_file))?;
        let header_paths = header_paths(&String::from_utf8_lossy(&metadata)).with_context(|| {
            format!("Failed to extract header paths from {:?}", self.project_file)
        })?;
        log::debug!("Found {} header path(s)", header_paths.len());

        Ok(ExtractedFlags {
            defines,
            header_paths,
        })
    }

    /// Reads the whole file, refusing anything above the configured limit.
    fn read_blob(&self, path: &Path) -> Result<Vec<u8>> {
        let size = fs::metadata(path)?.len();
        if size > self.max_file_size {
            return Err(ScanError::TooLarge {
                path: path.display().to_string(),
                size,
                limit: self.max_file_size,
            }
            .into());
        }
        Ok(fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::extract::ExtractError;
    use tempfile::tempdir;

    fn write_project(root: &Path, mxproject: &str, subdir_mk: &str) {
        let config = RuntimeConfig::default();
        fs::write(root.join(&config.project_file), mxproject).unwrap();
        let rules = root.join(&config.build_rule_file);
        fs::create_dir_all(rules.parent().unwrap()).unwrap();
        fs::write(rules, subdir_mk).unwrap();
    }

    #[test]
    fn test_scan_reads_both_files() {
        let temp = tempdir().unwrap();
        write_project(
            temp.path(),
            "HeaderPath=Inc;Drivers/Inc\n",
            "arm-none-eabi-gcc -DSTM32 -DUSE_HAL\n",
        );

        let scanner = Scanner::new(temp.path().to_path_buf(), &RuntimeConfig::default());
        let flags = scanner.scan().unwrap();

        assert_eq!(flags.defines, vec!["STM32", "USE_HAL"]);
        assert_eq!(flags.header_paths, vec!["Inc", "Drivers/Inc"]);
    }

    #[test]
    fn test_scan_missing_build_rules() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".mxproject"), "HeaderPath=Inc\n").unwrap();

        let scanner = Scanner::new(temp.path().to_path_buf(), &RuntimeConfig::default());
        let err = scanner.scan().unwrap_err();

        assert!(err.to_string().contains("Failed to read build rules"));
        assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_scan_reports_extraction_error() {
        let temp = tempdir().unwrap();
        write_project(temp.path(), "HeaderPath=\n", "arm-none-eabi-gcc -DX\n");

        let scanner = Scanner::new(temp.path().to_path_buf(), &RuntimeConfig::default());
        let err = scanner.scan().unwrap_err();

        assert!(err.to_string().contains("Failed to extract header paths"));
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_scan_rejects_oversized_input() {
        let temp = tempdir().unwrap();
        let padding = "x".repeat(64);
        write_project(
            temp.path(),
            &format!("{padding}\nHeaderPath=Inc\n"),
            "arm-none-eabi-gcc -DX\n",
        );

        let config = RuntimeConfig {
            max_file_size: 32,
            ..RuntimeConfig::default()
        };
        let scanner = Scanner::new(temp.path().to_path_buf(), &config);
        let err = scanner.scan().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::TooLarge { limit: 32, .. })
        ));
    }

    #[test]
    fn test_scan_tolerates_invalid_utf8() {
        let temp = tempdir().unwrap();
        write_project(temp.path(), "HeaderPath=Inc\n", "");
        let rules = temp.path().join(RuntimeConfig::default().build_rule_file);
        fs::write(&rules, b"\xff\xfe arm-none-eabi-gcc -DOK\n").unwrap();

        let scanner = Scanner::new(temp.path().to_path_buf(), &RuntimeConfig::default());
        assert_eq!(scanner.scan().unwrap().defines, vec!["OK"]);
    }
}
