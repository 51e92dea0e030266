//! Dependency graph builder.
//!
//! Starting from the seed classes, every type reachable through fields,
//! supertypes, method signatures and constructor parameters is visited,
//! classified once and linked into the [`DependencyGraph`].

use crate::classifier::classify_reachability;
use crate::config::GeneratorConfig;
use crate::context::{ApiSurface, BaseKind, InspectionContext};
use crate::error::{GenError, Result};
use crate::graph::{DependencyGraph, EdgeLabel};
use crate::model::{ApiModel, ClassDescriptor, ClassKind};
use crate::type_expr::{simple_name, TypeExpr};
use log::{debug, info, trace};

/// Walks the API model and records what it finds
pub struct Inspector<'a> {
    model: &'a ApiModel,
    config: &'a GeneratorConfig,
    context: InspectionContext,
    graph: DependencyGraph,
}

impl<'a> Inspector<'a> {
    pub fn new(model: &'a ApiModel, config: &'a GeneratorConfig) -> Self {
        Self {
            model,
            config,
            context: InspectionContext::new(),
            graph: DependencyGraph::new(),
        }
    }

    /// Inspect every configured seed class
    pub fn inspect_seeds(&mut self) -> Result<()> {
        for seed in &self.config.seeds {
            if !self.inspect(seed)? {
                debug!("Seed {} was filtered out", seed);
            }
        }
        info!(
            "Inspection found {} classes and {} references",
            self.graph.vertex_count(),
            self.graph.edge_count()
        );
        Ok(())
    }

    /// Visit a class.
    ///
    /// Returns true if the class is (now) part of the graph, false if it was
    /// filtered out as an excluded dependency or a stop class. A class in a
    /// package that is neither allowed nor excluded aborts the run.
    pub fn inspect(&mut self, name: &str) -> Result<bool> {
        let package = self.model.package_of(name);

        if self.config.is_excluded_package(&package) {
            trace!("Skipping dependency class {}", name);
            return Ok(false);
        }
        if self.config.is_stop_class(name) {
            trace!("Skipping stop class {}", name);
            return Ok(false);
        }
        if !self.config.is_api_package(&package) {
            return Err(GenError::UnauthorizedPackage {
                class: name.to_string(),
                package,
            });
        }
        if self.context.is_visited(name) {
            return Ok(true);
        }

        let model = self.model;
        let class = model
            .get(name)
            .ok_or_else(|| GenError::ClassNotFound(name.to_string()))?;

        // Classify before recursing so reference cycles end here on the way back.
        self.graph.add_vertex(name);
        let kind = self.base_kind(class);
        self.context.record_visit(name, kind);
        debug!("Visiting {} as {:?}", name, kind);

        for field in &class.fields {
            self.follow(class, &field.ty, EdgeLabel::Field)?;
        }
        for interface in &class.interfaces {
            self.follow(class, interface, EdgeLabel::Implements)?;
        }
        if let Some(superclass) = &class.superclass {
            self.follow(class, superclass, EdgeLabel::Extends)?;
        }
        for method in &class.methods {
            self.check_publisher_return(class, &method.return_type);
            self.follow(class, &method.return_type, EdgeLabel::Return(method.name.clone()))?;
            for param in &method.parameters {
                self.follow(class, &param.ty, EdgeLabel::Param(method.name.clone()))?;
            }
        }
        for ctor in &class.constructors {
            for param in &ctor.parameters {
                self.follow(class, &param.ty, EdgeLabel::CtorParam)?;
            }
        }

        Ok(true)
    }

    /// Freeze the inspection results and tag reachability
    pub fn finalize(self) -> ApiSurface {
        let reach = classify_reachability(&self.graph, &self.context);
        ApiSurface::new(self.context, self.graph, reach)
    }

    pub fn context(&self) -> &InspectionContext {
        &self.context
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    fn base_kind(&self, class: &ClassDescriptor) -> BaseKind {
        let extends_enum_base = class
            .superclass
            .as_ref()
            .and_then(TypeExpr::raw_name)
            .is_some_and(|raw| raw == self.config.enum_base);
        if class.kind == ClassKind::Enum || extends_enum_base {
            BaseKind::Enum
        } else if class.name.ends_with(".Builder") {
            BaseKind::Builder
        } else if self.config.looks_like_options(simple_name(&class.name)) {
            BaseKind::OptionsConfig
        } else {
            BaseKind::Other
        }
    }

    /// A method returning the reactive sequence type makes its class a
    /// reactive API and the returned type a publisher.
    fn check_publisher_return(&mut self, class: &ClassDescriptor, return_type: &TypeExpr) {
        let Some(raw) = return_type.raw_name() else {
            return;
        };
        let marker = self.config.publisher_marker.as_str();
        if simple_name(raw).contains(marker) && !simple_name(&class.name).contains(marker) {
            self.context.mark_reactive(&class.name);
            self.context.mark_publisher(raw);
        }
    }

    /// Visit every class a type mentions and link the ones that were accepted
    fn follow(&mut self, class: &ClassDescriptor, ty: &TypeExpr, label: EdgeLabel) -> Result<()> {
        for target in ty.class_references() {
            if self
                .config
                .is_bson_package(&self.model.package_of(target))
            {
                self.context.mark_bson_linked(&class.name);
            }
            if target == class.name {
                continue;
            }
            if self.config.is_excluded_edge(&class.name, target) {
                trace!("Not following excluded edge {} -> {}", class.name, target);
                continue;
            }
            if self.inspect(target)? {
                self.graph.add_edge(&class.name, target, label.clone());
            }
        }
        Ok(())
    }
}
