//! Reactive API Transformer - a future/callback client API generated from a reactive-streams one.
//!
//! This library reads a reflected description of a client API whose
//! asynchronous methods return a reactive sequence type, discovers every
//! type that API exposes, and generates an equivalent API in which
//! single-result operations return a future (plus a callback overload) and
//! multi-result operations return a lazy result abstraction. Configuration
//! classes become data objects with conversions back to the driver types.
//!
//! # Architecture
//!
//! The modules form a pipeline:
//!
//! 1. [`scanner`] - Recursively scans the model dump directory
//! 2. [`parser`] - Deserializes class descriptors into an [`model::ApiModel`]
//! 3. [`inspector`] - Walks the model from the seed classes into a [`graph::DependencyGraph`]
//! 4. [`classifier`] - Tags every class as isolated or linked to the reactive API
//! 5. [`type_mapper`] - Maps source types to target types, unwrapping publishers
//! 6. [`shape`] - Extracts options from setter, getter, constructor and builder shapes
//! 7. [`emitter`] - Generates the Java sources, collecting converters in [`conversions`]
//! 8. [`generator`] - Drives the emitters over the whole surface
//! 9. [`writer`] - Writes sources, graph exports and the [`report`]
//!
//! # Example Usage
//!
//! ```no_run
//! use reactive_api_transformer::{
//!     config::GeneratorConfig,
//!     generator::Generator,
//!     inspector::Inspector,
//!     parser::ModelParser,
//!     scanner::ModelScanner,
//!     writer::OutputWriter,
//! };
//! use std::path::{Path, PathBuf};
//!
//! let config = GeneratorConfig::load(Path::new("generator.yaml")).unwrap();
//!
//! // Load the reflected API
//! let scan_result = ModelScanner::new(PathBuf::from("./api-dump")).scan().unwrap();
//! let model = ModelParser::load_model(&scan_result.model_files).unwrap();
//!
//! // Discover and classify
//! let mut inspector = Inspector::new(&model, &config);
//! inspector.inspect_seeds().unwrap();
//! let surface = inspector.finalize();
//!
//! // Generate and write
//! let writer = OutputWriter::new(PathBuf::from("./generated"));
//! let mut generator = Generator::new(&model, &config, &surface).unwrap();
//! let summary = generator.run(&writer).unwrap();
//! println!("{} files written", summary.files.len());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod arity;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod context;
pub mod conversions;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod graph;
pub mod inspector;
pub mod javadoc;
pub mod model;
pub mod namespace;
pub mod naming;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod shape;
pub mod type_expr;
pub mod type_mapper;
pub mod writer;

#[cfg(test)]
mod test_support;
