//! Classification state shared by every analysis and emission step.
//!
//! [`InspectionContext`] is filled while the dependency graph is built; each
//! class receives its base classification exactly once, on first visit.
//! Finalizing the inspection freezes the context into an [`ApiSurface`],
//! the read-only value every later stage receives by reference.

use crate::graph::DependencyGraph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Classification assigned when a class is first visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseKind {
    Enum,
    Builder,
    OptionsConfig,
    Other,
}

/// Effective label of a class, the highest-precedence applicable one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    ReactiveApi,
    PublisherApi,
    Enum,
    Builder,
    OptionsConfig,
    BsonLinked,
    Other,
}

/// Whether a class can reach a reactive API class in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reach {
    /// No path to any reactive API class: reusable unchanged
    Isolated,
    /// Transitively touches the reactive idiom: must be regenerated
    Linked,
}

/// Mutable classification sets, owned by the graph builder
#[derive(Debug, Default)]
pub struct InspectionContext {
    visited: BTreeMap<String, BaseKind>,
    reactive: BTreeSet<String>,
    publishers: BTreeSet<String>,
    bson_linked: BTreeSet<String>,
}

impl InspectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first visit of a class. Returns false, leaving the
    /// existing classification untouched, if the class was already seen.
    pub fn record_visit(&mut self, name: &str, kind: BaseKind) -> bool {
        if self.visited.contains_key(name) {
            return false;
        }
        self.visited.insert(name.to_string(), kind);
        true
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.visited.contains_key(name)
    }

    pub fn base_kind(&self, name: &str) -> Option<BaseKind> {
        self.visited.get(name).copied()
    }

    pub fn mark_reactive(&mut self, name: &str) {
        self.reactive.insert(name.to_string());
    }

    pub fn mark_publisher(&mut self, name: &str) {
        self.publishers.insert(name.to_string());
    }

    pub fn mark_bson_linked(&mut self, name: &str) {
        self.bson_linked.insert(name.to_string());
    }

    pub fn is_reactive(&self, name: &str) -> bool {
        self.reactive.contains(name)
    }

    pub fn is_publisher(&self, name: &str) -> bool {
        self.publishers.contains(name)
    }

    /// Effective label by precedence:
    /// reactiveApi, publisherApi, enum, builder, optionsConfig, bsonLinked, other.
    ///
    /// Publisher types outside the API packages are never visited but still
    /// carry their mark.
    pub fn classification(&self, name: &str) -> Option<Classification> {
        if self.reactive.contains(name) {
            return Some(Classification::ReactiveApi);
        }
        if self.publishers.contains(name) {
            return Some(Classification::PublisherApi);
        }
        let base = self.visited.get(name)?;
        Some(match base {
            BaseKind::Enum => Classification::Enum,
            BaseKind::Builder => Classification::Builder,
            BaseKind::OptionsConfig => Classification::OptionsConfig,
            BaseKind::Other if self.bson_linked.contains(name) => Classification::BsonLinked,
            BaseKind::Other => Classification::Other,
        })
    }

    pub fn reactive_classes(&self) -> impl Iterator<Item = &str> {
        self.reactive.iter().map(String::as_str)
    }

    /// Visited classes in name order
    pub fn visited_classes(&self) -> impl Iterator<Item = &str> {
        self.visited.keys().map(String::as_str)
    }

    pub fn is_bson_linked(&self, name: &str) -> bool {
        self.bson_linked.contains(name)
    }
}

/// The finalized, read-only result of inspection
#[derive(Debug)]
pub struct ApiSurface {
    context: InspectionContext,
    graph: DependencyGraph,
    reach: BTreeMap<String, Reach>,
}

impl ApiSurface {
    pub fn new(
        context: InspectionContext,
        graph: DependencyGraph,
        reach: BTreeMap<String, Reach>,
    ) -> Self {
        Self {
            context,
            graph,
            reach,
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn classification(&self, name: &str) -> Option<Classification> {
        self.context.classification(name)
    }

    pub fn is_publisher(&self, name: &str) -> bool {
        self.context.is_publisher(name)
    }

    pub fn is_bson_linked(&self, name: &str) -> bool {
        self.context.is_bson_linked(name)
    }

    /// Reach tag; reactive API classes have none
    pub fn reach(&self, name: &str) -> Option<Reach> {
        self.reach.get(name).copied()
    }

    pub fn is_isolated(&self, name: &str) -> bool {
        self.reach(name) == Some(Reach::Isolated)
    }

    /// Classes with no path to any reactive API class
    pub fn isolated(&self) -> impl Iterator<Item = &str> {
        self.reach
            .iter()
            .filter(|(_, reach)| **reach == Reach::Isolated)
            .map(|(name, _)| name.as_str())
    }

    /// Visited classes carrying the given label, in name order
    pub fn classes_labeled(&self, label: Classification) -> Vec<&str> {
        self.context
            .visited_classes()
            .filter(|name| self.context.classification(name) == Some(label))
            .collect()
    }

    pub fn visited_classes(&self) -> impl Iterator<Item = &str> {
        self.context.visited_classes()
    }
}
