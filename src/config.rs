//! Generator configuration.
//!
//! Everything that is specific to one source API (package lists, marker
//! names, substitution table, namespace rules, exception lists) lives here,
//! so the graph, mapping and emission stages stay API-agnostic.

use crate::error::GenError;
use crate::model::MethodDescriptor;
use crate::type_expr::TypeExpr;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Result arity forced for a method the `@return` heuristic cannot judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityOverride {
    Single,
    Multi,
}

/// One package-prefix rewrite from the source namespace to the target namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRule {
    pub from: String,
    pub to: String,
}

/// Configuration of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Entry points of the graph traversal
    pub seeds: Vec<String>,
    /// Packages whose classes form the API surface
    pub api_packages: Vec<String>,
    /// Dependency packages: opaque leaves, never traversed
    pub excluded_packages: Vec<String>,
    /// Individual classes never traversed
    pub stop_classes: BTreeSet<String>,
    /// References never followed, written `from -> to`
    pub excluded_edges: Vec<String>,

    /// Substring of a return type's simple name marking the reactive sequence type
    pub publisher_marker: String,
    /// Superclass of every enum
    pub enum_base: String,
    /// Packages of the binary document library
    pub bson_packages: Vec<String>,
    /// Publisher payload meaning "no value"
    pub void_sentinel: String,
    /// Second parameter type of two-argument duration setters
    pub time_unit_type: String,
    /// Unit constant passed back when a duration option is applied
    pub implied_time_unit: String,
    /// Simple-name suffixes of config-like classes
    pub options_suffixes: Vec<String>,

    /// Source type to target type; `null` keeps the source name
    pub substitutions: BTreeMap<String, Option<String>>,
    /// Package rewrites, longest `from` prefix wins
    pub namespace_rewrites: Vec<NamespaceRule>,

    /// Type returned by single-result methods; the type variable `T` stands for the payload
    pub single_result_type: String,
    /// Callback type of the single-result overload, `T` being the payload
    pub callback_type: String,
    /// Lazy result abstraction returned by multi-result methods, `T` being the element
    pub multi_result_type: String,
    /// JSON object type used by the data-object hooks
    pub json_type: String,
    /// Qualified name of the generated conversion utility interface
    pub conversion_class: String,
    /// Expression yielding an implementation of the conversion interface
    pub conversion_instance: String,
    /// Method of the single-result type that registers a completion callback
    pub completion_method: String,
    /// Annotation placed on generated data object classes
    pub data_object_annotation: String,

    /// `Class#method(paramTypes)` to a forced arity
    pub arity_overrides: BTreeMap<String, ArityOverride>,
    /// `Class#option` setters allowed to have no getter
    pub unmatched_setters: BTreeSet<String>,
    /// `Class#member` entries skipped by analyzers and emitters
    pub ignored_members: BTreeSet<String>,
    /// Option names never emitted
    pub excluded_option_fields: BTreeSet<String>,
    /// Root of the subgraph dropped from the second graph export
    pub settings_root: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            api_packages: Vec::new(),
            excluded_packages: vec![
                "java.lang".to_string(),
                "java.util".to_string(),
                "java.util.concurrent".to_string(),
                "java.util.function".to_string(),
                "org.bson.*".to_string(),
                "org.bson".to_string(),
                "org.reactivestreams".to_string(),
            ],
            stop_classes: BTreeSet::new(),
            excluded_edges: Vec::new(),
            publisher_marker: "Publisher".to_string(),
            enum_base: "java.lang.Enum".to_string(),
            bson_packages: vec!["org.bson".to_string(), "org.bson.*".to_string()],
            void_sentinel: "java.lang.Void".to_string(),
            time_unit_type: "java.util.concurrent.TimeUnit".to_string(),
            implied_time_unit: "MILLISECONDS".to_string(),
            options_suffixes: vec![
                "Options".to_string(),
                "Settings".to_string(),
                "Result".to_string(),
            ],
            substitutions: BTreeMap::new(),
            namespace_rewrites: Vec::new(),
            single_result_type: "io.vertx.core.Future<T>".to_string(),
            callback_type: "io.vertx.core.Handler<io.vertx.core.AsyncResult<T>>".to_string(),
            multi_result_type: "io.vertx.mongo.MongoResult<T>".to_string(),
            json_type: "io.vertx.core.json.JsonObject".to_string(),
            conversion_class: "io.vertx.mongo.impl.ConversionUtils".to_string(),
            conversion_instance: "io.vertx.mongo.impl.ConversionUtilsImpl.INSTANCE".to_string(),
            completion_method: "onComplete".to_string(),
            data_object_annotation: "io.vertx.codegen.annotations.DataObject".to_string(),
            arity_overrides: BTreeMap::new(),
            unmatched_setters: BTreeSet::new(),
            ignored_members: BTreeSet::new(),
            excluded_option_fields: ["codecRegistry".to_string()].into_iter().collect(),
            settings_root: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file, YAML or JSON by extension
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration: {}", path.display()))?;

        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let config: GeneratorConfig = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON configuration: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML configuration: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every run relies on
    pub fn validate(&self) -> std::result::Result<(), GenError> {
        if self.seeds.is_empty() {
            return Err(GenError::InvalidConfig("no seed classes".to_string()));
        }
        if self.api_packages.is_empty() {
            return Err(GenError::InvalidConfig("no API packages".to_string()));
        }
        if self.namespace_rewrites.iter().any(|rule| rule.from.is_empty()) {
            return Err(GenError::InvalidConfig(
                "namespace rewrite with an empty `from` package".to_string(),
            ));
        }
        if self.publisher_marker.is_empty() {
            return Err(GenError::InvalidConfig("empty publisher marker".to_string()));
        }
        for edge in &self.excluded_edges {
            if parse_edge(edge).is_none() {
                return Err(GenError::InvalidConfig(format!(
                    "excluded edge \"{}\" is not of the form `from -> to`",
                    edge
                )));
            }
        }
        for (source, target) in &self.substitutions {
            TypeExpr::parse(source)?;
            if let Some(target) = target {
                TypeExpr::parse(target)?;
            }
        }
        for ty in [
            &self.single_result_type,
            &self.callback_type,
            &self.multi_result_type,
            &self.json_type,
            &self.conversion_class,
        ] {
            TypeExpr::parse(ty)?;
        }
        Ok(())
    }

    pub fn is_excluded_package(&self, package: &str) -> bool {
        package_listed(&self.excluded_packages, package)
    }

    pub fn is_api_package(&self, package: &str) -> bool {
        package_listed(&self.api_packages, package)
    }

    pub fn is_bson_package(&self, package: &str) -> bool {
        package_listed(&self.bson_packages, package)
    }

    pub fn is_stop_class(&self, name: &str) -> bool {
        self.stop_classes.contains(name)
    }

    pub fn is_excluded_edge(&self, from: &str, to: &str) -> bool {
        self.excluded_edges
            .iter()
            .filter_map(|edge| parse_edge(edge))
            .any(|(f, t)| f == from && t == to)
    }

    pub fn is_ignored(&self, class: &str, member: &str) -> bool {
        self.ignored_members.contains(&member_key(class, member))
    }

    /// A method is ignored when listed either by name or by full signature
    pub fn is_ignored_method(&self, class: &str, method: &MethodDescriptor) -> bool {
        self.is_ignored(class, &method.name) || self.is_ignored(class, &method.signature())
    }

    pub fn allows_unmatched_setter(&self, class: &str, option: &str) -> bool {
        self.unmatched_setters.contains(&member_key(class, option))
    }

    pub fn arity_override(&self, class: &str, signature: &str) -> Option<ArityOverride> {
        self.arity_overrides
            .get(&member_key(class, signature))
            .copied()
    }

    /// Whether a simple class name follows a config-like naming convention
    pub fn looks_like_options(&self, simple_name: &str) -> bool {
        self.options_suffixes
            .iter()
            .any(|suffix| simple_name.ends_with(suffix.as_str()) && simple_name != suffix)
    }
}

/// Key of the per-member tables: `Class#member`
pub fn member_key(class: &str, member: &str) -> String {
    format!("{}#{}", class, member)
}

fn parse_edge(edge: &str) -> Option<(&str, &str)> {
    let (from, to) = edge.split_once("->")?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// `a.b` matches `a.b`; `a.b.*` matches `a.b` and every sub-package
fn package_listed(list: &[String], package: &str) -> bool {
    list.iter().any(|entry| match entry.strip_suffix(".*") {
        Some(prefix) => {
            package == prefix
                || package
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
        }
        None => entry == package,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "gen.yaml",
            "seeds: [com.example.Root]\napi_packages: [com.example]\n",
        );
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.seeds, vec!["com.example.Root"]);
        assert_eq!(config.publisher_marker, "Publisher");
        assert!(config.excluded_option_fields.contains("codecRegistry"));
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "gen.json",
            r#"{"seeds": ["com.example.Root"], "api_packages": ["com.example"], "publisher_marker": "Flux"}"#,
        );
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.publisher_marker, "Flux");
    }

    #[test]
    fn test_load_rejects_missing_seeds() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "gen.yaml", "api_packages: [com.example]\n");
        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("no seed classes"));
    }

    #[test]
    fn test_validate_rejects_malformed_edge() {
        let config = GeneratorConfig {
            seeds: vec!["com.example.Root".to_string()],
            api_packages: vec!["com.example".to_string()],
            excluded_edges: vec!["com.example.A com.example.B".to_string()],
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));
    }

    #[test]
    fn test_package_matching() {
        let config = GeneratorConfig {
            api_packages: vec!["com.example".to_string(), "com.other.*".to_string()],
            ..GeneratorConfig::default()
        };
        assert!(config.is_api_package("com.example"));
        assert!(!config.is_api_package("com.example.sub"));
        assert!(config.is_api_package("com.other"));
        assert!(config.is_api_package("com.other.deep.pkg"));
        assert!(!config.is_api_package("com.otherwise"));
    }

    #[test]
    fn test_excluded_edges() {
        let config = GeneratorConfig {
            excluded_edges: vec!["com.example.A -> com.example.B".to_string()],
            ..GeneratorConfig::default()
        };
        assert!(config.is_excluded_edge("com.example.A", "com.example.B"));
        assert!(!config.is_excluded_edge("com.example.B", "com.example.A"));
    }

    #[test]
    fn test_options_naming_heuristic() {
        let config = GeneratorConfig::default();
        assert!(config.looks_like_options("FindOptions"));
        assert!(config.looks_like_options("ClientSettings"));
        assert!(config.looks_like_options("UpdateResult"));
        assert!(!config.looks_like_options("Options"));
        assert!(!config.looks_like_options("Collection"));
    }
}
