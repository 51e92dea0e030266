//! Classification report.
//!
//! A serializable snapshot of the inspected API surface: every vertex of
//! the dependency graph with its label, reach tag and outgoing references.

use crate::context::{ApiSurface, Classification, Reach};
use crate::graph::EdgeLabel;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassEntry {
    pub name: String,
    pub label: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach: Option<Reach>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

/// One outgoing edge with every site that induced it
#[derive(Debug, Clone, Serialize)]
pub struct Reference {
    pub target: String,
    pub labels: BTreeSet<EdgeLabel>,
}

impl ClassificationReport {
    pub fn entry(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|entry| entry.name == name)
    }
}

/// Build the report, classes in name order
pub fn build_report(surface: &ApiSurface) -> ClassificationReport {
    let classes = surface
        .visited_classes()
        .map(|name| {
            let references = surface
                .graph()
                .outgoing(name)
                .into_iter()
                .map(|(target, labels)| Reference {
                    target: target.to_string(),
                    labels: labels.clone(),
                })
                .collect();

            ClassEntry {
                name: name.to_string(),
                label: surface
                    .classification(name)
                    .unwrap_or(Classification::Other),
                reach: surface.reach(name),
                references,
            }
        })
        .collect();
    ClassificationReport { classes }
}
