//! Fixtures shared by the unit tests of the mapping and emission stages.

use crate::config::{GeneratorConfig, NamespaceRule};
use crate::context::ApiSurface;
use crate::inspector::Inspector;
use crate::model::{ApiModel, ClassDescriptor};

pub fn model(yaml: &str) -> ApiModel {
    let classes: Vec<ClassDescriptor> = serde_yaml::from_str(yaml).unwrap();
    ApiModel::from_classes(classes).unwrap()
}

/// Config over the `com.example` API, rewritten to `io.vertx.example`
pub fn config(seeds: &[&str]) -> GeneratorConfig {
    let mut config = GeneratorConfig {
        seeds: seeds.iter().map(|s| s.to_string()).collect(),
        api_packages: vec!["com.example.*".to_string()],
        namespace_rewrites: vec![NamespaceRule {
            from: "com.example".to_string(),
            to: "io.vertx.example".to_string(),
        }],
        ..GeneratorConfig::default()
    };
    config.substitutions.insert(
        "org.bson.conversions.Bson".to_string(),
        Some("io.vertx.core.json.JsonObject".to_string()),
    );
    config.substitutions.insert(
        "org.bson.Document".to_string(),
        Some("io.vertx.core.json.JsonObject".to_string()),
    );
    config
}

pub fn surface(model: &ApiModel, config: &GeneratorConfig) -> ApiSurface {
    let mut inspector = Inspector::new(model, config);
    inspector.inspect_seeds().unwrap();
    inspector.finalize()
}
