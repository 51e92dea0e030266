//! Generation pipeline.
//!
//! Drives the emitters over a finalized [`ApiSurface`]: every classified
//! class is turned into a [`JavaFile`] and written before the next one is
//! generated, then the conversion utilities collected along the way are
//! emitted last.

use crate::config::GeneratorConfig;
use crate::context::{ApiSurface, Classification};
use crate::conversions::ConversionRegistry;
use crate::emitter::{
    emit_conversions, emit_enum, emit_options, emit_reactive_api, JavaFile, OutputCategory,
};
use crate::error::{GenError, Result};
use crate::model::ApiModel;
use crate::shape::ShapeAnalyzer;
use crate::type_mapper::TypeMapper;
use crate::writer::OutputWriter;
use anyhow::Context;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What one run produced
#[derive(Debug, Default, Serialize)]
pub struct GenerationSummary {
    /// Number of files per output category
    pub counts: BTreeMap<OutputCategory, usize>,
    /// Every written file, in generation order
    pub files: Vec<PathBuf>,
    /// Number of distinct converters declared
    pub conversions: usize,
}

impl GenerationSummary {
    fn record(&mut self, file: &JavaFile, path: PathBuf) {
        *self.counts.entry(file.category).or_insert(0) += 1;
        self.files.push(path);
    }

    pub fn count(&self, category: OutputCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

/// Owns the conversion registry for one generation run
pub struct Generator<'a> {
    model: &'a ApiModel,
    config: &'a GeneratorConfig,
    mapper: TypeMapper<'a>,
    registry: ConversionRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(
        model: &'a ApiModel,
        config: &'a GeneratorConfig,
        surface: &'a ApiSurface,
    ) -> Result<Self> {
        Ok(Self {
            model,
            config,
            mapper: TypeMapper::new(model, config, surface)?,
            registry: ConversionRegistry::new(),
        })
    }

    /// Generate the target class of one source class.
    ///
    /// Returns `None` for classes that have no target counterpart of their
    /// own: publisher types, builders, document-library types and
    /// unclassified classes.
    pub fn emit_class(&mut self, name: &str) -> Result<Option<JavaFile>> {
        let class = self
            .model
            .get(name)
            .ok_or_else(|| GenError::ClassNotFound(name.to_string()))?;

        let file = match self.mapper.surface().classification(name) {
            Some(Classification::ReactiveApi) => Some(emit_reactive_api(
                class,
                &self.mapper,
                self.config,
                &mut self.registry,
            )?),
            Some(Classification::OptionsConfig) => {
                let analyzer = ShapeAnalyzer::new(self.model, self.config, &self.mapper);
                let shape = analyzer.analyze(class, &mut self.registry)?;
                Some(emit_options(class, &shape, &self.mapper, self.config)?)
            }
            Some(Classification::Enum) => Some(emit_enum(class, &self.mapper)?),
            _ => None,
        };

        if let Some(file) = &file {
            debug!("Generated {} from {}", file.qualified_name, name);
        }
        Ok(file)
    }

    /// Emit the conversion utility interface for everything registered so far
    pub fn emit_conversions(&self) -> JavaFile {
        emit_conversions(&self.registry, self.config)
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Generate and write every class, then the conversion utilities.
    ///
    /// Files are written as soon as their class is generated; an error
    /// stops the run and leaves the files already written in place.
    ///
    /// # Errors
    ///
    /// Returns the first generation or IO error encountered.
    pub fn run(&mut self, writer: &OutputWriter) -> anyhow::Result<GenerationSummary> {
        let names: Vec<String> = self
            .mapper
            .surface()
            .visited_classes()
            .map(str::to_string)
            .collect();

        let mut summary = GenerationSummary::default();
        for name in &names {
            let file = self
                .emit_class(name)
                .with_context(|| format!("Failed to generate target class for {}", name))?;
            if let Some(file) = file {
                let path = writer.write_java(&file)?;
                summary.record(&file, path);
            }
        }

        let conversions = self.emit_conversions();
        let path = writer.write_java(&conversions)?;
        summary.record(&conversions, path);
        summary.conversions = self.registry.len();

        info!(
            "Generated {} reactive API, {} options, {} enum files and {} converters",
            summary.count(OutputCategory::ReactiveApi),
            summary.count(OutputCategory::Options),
            summary.count(OutputCategory::Enum),
            summary.conversions
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use tempfile::TempDir;

    const MODEL: &str = r#"
- name: com.example.Svc
  kind: interface
  methods:
    - name: find
      parameters:
        - name: filter
          type: org.bson.conversions.Bson
      return_type: org.reactivestreams.Publisher<org.bson.Document>
      doc: "Finds.\n@return a publisher of documents"
    - name: drop
      parameters:
        - name: options
          type: com.example.DropOptions
      return_type: org.reactivestreams.Publisher<java.lang.Void>
      doc: "Drops.\n@return an empty publisher indicating completion"
- name: com.example.DropOptions
  kind: class
  constructors:
    - parameters: []
  methods:
    - name: level
      parameters:
        - name: level
          type: com.example.Level
      return_type: com.example.DropOptions
    - name: getLevel
      return_type: com.example.Level
- name: com.example.Level
  kind: enum
  superclass: java.lang.Enum<com.example.Level>
  enum_constants: [LOW, HIGH]
"#;

    #[test]
    fn test_emit_class_dispatches_on_classification() {
        let model = test_support::model(MODEL);
        let config = test_support::config(&["com.example.Svc"]);
        let surface = test_support::surface(&model, &config);
        let mut generator = Generator::new(&model, &config, &surface).unwrap();

        let svc = generator.emit_class("com.example.Svc").unwrap().unwrap();
        assert_eq!(svc.category, OutputCategory::ReactiveApi);
        let options = generator.emit_class("com.example.DropOptions").unwrap().unwrap();
        assert_eq!(options.category, OutputCategory::Options);
        let level = generator.emit_class("com.example.Level").unwrap().unwrap();
        assert_eq!(level.category, OutputCategory::Enum);

        assert!(matches!(
            generator.emit_class("com.example.Missing"),
            Err(GenError::ClassNotFound(_))
        ));
    }

    #[test]
    fn test_run_writes_every_file_and_the_conversions() {
        let model = test_support::model(MODEL);
        let config = test_support::config(&["com.example.Svc"]);
        let surface = test_support::surface(&model, &config);
        let mut generator = Generator::new(&model, &config, &surface).unwrap();
        let out = TempDir::new().unwrap();
        let writer = OutputWriter::new(out.path().to_path_buf());

        let summary = generator.run(&writer).unwrap();

        assert_eq!(summary.count(OutputCategory::ReactiveApi), 1);
        assert_eq!(summary.count(OutputCategory::Options), 1);
        assert_eq!(summary.count(OutputCategory::Enum), 1);
        assert_eq!(summary.count(OutputCategory::Conversion), 1);
        assert_eq!(summary.files.len(), 4);
        assert!(summary.files.iter().all(|path| path.is_file()));
        assert!(out.path().join("io/vertx/example/Svc.java").is_file());
        assert!(out
            .path()
            .join("io/vertx/mongo/impl/ConversionUtils.java")
            .is_file());
        // Bson parameter and Document element
        assert_eq!(summary.conversions, generator.registry().len());
        assert!(summary.conversions >= 2);
    }
}
