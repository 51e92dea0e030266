use crate::model::{ApiModel, ClassDescriptor};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Parser for API model dump files.
///
/// A model file holds either a single class descriptor or a list of them,
/// written as YAML or JSON.
///
/// # Example
///
/// ```no_run
/// use reactive_api_transformer::parser::ModelParser;
/// use std::path::Path;
///
/// let parsed = ModelParser::parse_file(Path::new("dump/MongoCollection.yaml")).unwrap();
/// println!("Parsed {} classes", parsed.classes.len());
/// ```
pub struct ModelParser;

/// A successfully parsed model file.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the model file
    pub path: PathBuf,
    /// Class descriptors found in the file
    pub classes: Vec<ClassDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDocument {
    Many(Vec<ClassDescriptor>),
    One(Box<ClassDescriptor>),
}

impl ModelDocument {
    fn into_classes(self) -> Vec<ClassDescriptor> {
        match self {
            ModelDocument::Many(classes) => classes,
            ModelDocument::One(class) => vec![*class],
        }
    }
}

impl ModelParser {
    /// Parses a single model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML/JSON,
    /// or contains a malformed class descriptor or type expression.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing model file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let document: ModelDocument = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse model file: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse model file: {}", path.display()))?
        };

        let classes = document.into_classes();
        debug!("Parsed {} classes from {}", classes.len(), path.display());

        Ok(ParsedFile {
            path: path.to_path_buf(),
            classes,
        })
    }

    /// Parses multiple model files, returning one result per path.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} model files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| match Self::parse_file(path) {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {:#}", path.display(), e);
                    Err(e)
                }
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }

    /// Parses every file and assembles the model.
    ///
    /// Unlike [`parse_files`](Self::parse_files) this stops at the first
    /// unreadable file: a model with a hole in it would surface later as a
    /// misleading "class not found".
    pub fn load_model(paths: &[PathBuf]) -> Result<ApiModel> {
        let mut classes = Vec::new();
        for parsed in Self::parse_files(paths) {
            classes.extend(parsed?.classes);
        }
        Ok(ApiModel::from_classes(classes)?)
    }
}
