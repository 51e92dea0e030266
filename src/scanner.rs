use anyhow::{bail, Result};
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Scanner for API model dump directories.
///
/// The extraction step writes one YAML or JSON file per class (or per
/// package). `ModelScanner` walks the dump directory recursively and collects
/// every such file, skipping hidden directories.
///
/// # Example
///
/// ```no_run
/// use reactive_api_transformer::scanner::ModelScanner;
/// use std::path::PathBuf;
///
/// let scanner = ModelScanner::new(PathBuf::from("./api-dump"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} model files", result.model_files.len());
/// ```
pub struct ModelScanner {
    root_path: PathBuf,
}

/// Result of a directory scan.
pub struct ScanResult {
    /// Model files, in a stable (sorted) order
    pub model_files: Vec<PathBuf>,
    /// Warning messages for entries that could not be read
    pub warnings: Vec<String>,
}

const MODEL_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

impl ModelScanner {
    /// Creates a new `ModelScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all model files.
    ///
    /// Inaccessible entries are logged and reported as warnings; scanning
    /// continues past them.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.is_dir() {
            bail!("Model path is not a directory: {}", self.root_path.display());
        }

        let mut model_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }
                !e.file_name().to_string_lossy().starts_with('.')
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let is_model = path
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| MODEL_EXTENSIONS.contains(&ext));
                    if path.is_file() && is_model {
                        model_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            model_files,
            warnings,
        })
    }
}
