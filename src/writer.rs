//! Output writer.
//!
//! Puts generated Java sources below the output root following their
//! package, exports the dependency graph in DOT and serializes the
//! classification report to YAML or JSON.

use crate::emitter::JavaFile;
use crate::graph::DependencyGraph;
use crate::report::ClassificationReport;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the full graph export
pub const GRAPH_FILE: &str = "dependency-graph.dot";
/// File name of the graph export without the settings subgraph
pub const GRAPH_NO_SETTINGS_FILE: &str = "dependency-graph-no-settings.dot";

/// Writes everything a run produces below one root directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a generated source file and return its path
    pub fn write_java(&self, file: &JavaFile) -> Result<PathBuf> {
        let path = self.root.join(file.relative_path());
        write_to_file(&file.source, &path)
            .with_context(|| format!("Failed to write {}", file.qualified_name))?;
        Ok(path)
    }

    /// Export the full graph and the graph minus everything reachable from
    /// `settings_root`.
    ///
    /// Without a settings root, or when it was never visited, both files
    /// hold the full graph.
    ///
    /// # Returns
    ///
    /// The paths of the full and the reduced export.
    pub fn write_graphs(
        &self,
        graph: &DependencyGraph,
        settings_root: Option<&str>,
    ) -> Result<(PathBuf, PathBuf)> {
        let full = self.root.join(GRAPH_FILE);
        write_to_file(&graph.to_dot(), &full)?;

        let reduced = match settings_root {
            Some(root) if graph.contains(root) => graph.without_subgraph(root),
            Some(root) => {
                warn!("Settings root {} is not part of the graph", root);
                graph.clone()
            }
            None => graph.clone(),
        };
        let no_settings = self.root.join(GRAPH_NO_SETTINGS_FILE);
        write_to_file(&reduced.to_dot(), &no_settings)?;

        info!(
            "Wrote dependency graphs ({} and {} classes)",
            graph.vertex_count(),
            reduced.vertex_count()
        );
        Ok((full, no_settings))
    }
}

/// Serializes the classification report to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(report: &ClassificationReport) -> Result<String> {
    debug!("Serializing classification report to YAML");
    serde_yaml::to_string(report).context("Failed to serialize classification report to YAML")
}

/// Serializes the classification report to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(report: &ClassificationReport) -> Result<String> {
    debug!("Serializing classification report to JSON");
    serde_json::to_string_pretty(report)
        .context("Failed to serialize classification report to JSON")
}

/// Writes string content to a file.
///
/// Creates the file and its parent directories if they don't exist, or
/// overwrites the file if it does.
///
/// # Arguments
///
/// * `content` - The string content to write
/// * `path` - The file path to write to
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Classification, Reach};
    use crate::emitter::OutputCategory;
    use crate::graph::EdgeLabel;
    use crate::report::{ClassEntry, Reference};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn report() -> ClassificationReport {
        ClassificationReport {
            classes: vec![
                ClassEntry {
                    name: "com.example.Svc".to_string(),
                    label: Classification::ReactiveApi,
                    reach: None,
                    references: vec![Reference {
                        target: "com.example.FindOptions".to_string(),
                        labels: [EdgeLabel::Param("find".to_string())].into_iter().collect(),
                    }],
                },
                ClassEntry {
                    name: "com.example.FindOptions".to_string(),
                    label: Classification::OptionsConfig,
                    reach: Some(Reach::Isolated),
                    references: Vec::new(),
                },
            ],
        }
    }

    fn graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for name in ["a.Client", "a.Settings", "a.Pool", "a.Db"] {
            graph.add_vertex(name);
        }
        graph.add_edge("a.Client", "a.Settings", EdgeLabel::Param("create".to_string()));
        graph.add_edge("a.Settings", "a.Pool", EdgeLabel::Field);
        graph.add_edge("a.Client", "a.Db", EdgeLabel::Return("getDatabase".to_string()));
        graph
    }

    #[test]
    fn test_write_java_follows_package() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().to_path_buf());
        let file = JavaFile {
            qualified_name: "io.vertx.mongo.client.MongoDatabase".to_string(),
            category: OutputCategory::ReactiveApi,
            source: "package io.vertx.mongo.client;\n".to_string(),
        };

        let path = writer.write_java(&file).unwrap();

        assert_eq!(path, dir.path().join("io/vertx/mongo/client/MongoDatabase.java"));
        assert_eq!(fs::read_to_string(path).unwrap(), file.source);
    }

    #[test]
    fn test_write_graphs_drops_settings_subgraph() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().to_path_buf());

        let (full, reduced) = writer.write_graphs(&graph(), Some("a.Settings")).unwrap();

        let full = fs::read_to_string(full).unwrap();
        assert!(full.starts_with("digraph"));
        assert!(full.contains("a.Settings"));
        assert!(full.contains("return:getDatabase"));

        let reduced = fs::read_to_string(reduced).unwrap();
        assert!(reduced.contains("a.Client"));
        assert!(reduced.contains("a.Db"));
        assert!(!reduced.contains("a.Settings"));
        assert!(!reduced.contains("a.Pool"));
    }

    #[test]
    fn test_write_graphs_without_settings_root_writes_full_graph_twice() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().to_path_buf());

        let (full, reduced) = writer.write_graphs(&graph(), None).unwrap();

        assert_eq!(
            fs::read_to_string(full).unwrap(),
            fs::read_to_string(reduced).unwrap()
        );
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&report()).unwrap();

        assert!(yaml.contains("classes:"));
        assert!(yaml.contains("label: reactiveApi"));
        assert!(yaml.contains("reach: isolated"));
        assert!(yaml.contains("param:find"));
    }

    #[test]
    fn test_serialize_json_pretty_format() {
        let json = serialize_json(&report()).unwrap();

        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["classes"][0]["label"], "reactiveApi");
        assert_eq!(value["classes"][0]["references"][0]["labels"][0], "param:find");
        assert_eq!(value["classes"][1]["reach"], "isolated");
        assert!(value["classes"][1].get("references").is_none());
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("report.yaml");

        write_to_file("classes: []\n", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "classes: []\n");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.yaml");

        write_to_file("first", &path).unwrap();
        write_to_file("second", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
