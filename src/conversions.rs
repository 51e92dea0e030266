//! Registry of generated type converters.
//!
//! Every (source type, target type) pair that needs converting gets exactly
//! one converter method, named after the target type. Asking again for the
//! same pair returns the same name and registers nothing new.

use crate::naming::capitalize;
use crate::type_expr::{simple_name, TypeExpr, WildcardBound};
use crate::type_mapper::MappedType;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// One converter declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub name: String,
    pub from: TypeExpr,
    pub to: TypeExpr,
}

/// Which way a value crosses the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Driver value handed back to the target API
    ToTarget,
    /// Target API value handed down to the driver
    ToSource,
}

#[derive(Debug, Default)]
pub struct ConversionRegistry {
    by_pair: BTreeMap<(String, String), usize>,
    conversions: Vec<Conversion>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the converter for `from -> to`, registering it on first use.
    /// Identical types need no converter.
    pub fn register(&mut self, from: &TypeExpr, to: &TypeExpr) -> Option<String> {
        if from == to {
            return None;
        }
        let key = (from.to_string(), to.to_string());
        if let Some(&index) = self.by_pair.get(&key) {
            return Some(self.conversions[index].name.clone());
        }

        let name = self.unique_name(from, to);
        debug!("Registering converter {}: {} -> {}", name, key.0, key.1);
        self.by_pair.insert(key, self.conversions.len());
        self.conversions.push(Conversion {
            name: name.clone(),
            from: from.clone(),
            to: to.clone(),
        });
        Some(name)
    }

    /// Register the converter a mapped type needs in the given direction
    pub fn register_mapped(&mut self, mapped: &MappedType, direction: Direction) -> Option<String> {
        if !mapped.needs_converter() {
            return None;
        }
        match direction {
            Direction::ToTarget => self.register(&mapped.source, &mapped.target),
            Direction::ToSource => self.register(&mapped.target, &mapped.source),
        }
    }

    pub fn lookup(&self, from: &TypeExpr, to: &TypeExpr) -> Option<&str> {
        self.by_pair
            .get(&(from.to_string(), to.to_string()))
            .map(|&index| self.conversions[index].name.as_str())
    }

    /// Registered converters in registration order
    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Converters are overloads of one another; two of them clash when both
    /// name and parameter erasure coincide.
    fn unique_name(&self, from: &TypeExpr, to: &TypeExpr) -> String {
        let base = converter_name(to);
        let erasure = from.erasure();
        let clashes = |name: &str| {
            self.conversions
                .iter()
                .any(|c| c.name == name && c.from.erasure() == erasure)
        };
        if !clashes(&base) {
            return base;
        }
        let qualified = format!("{}From{}", base, type_stem(from));
        if !clashes(&qualified) {
            return qualified;
        }
        let mut n = 2;
        loop {
            let numbered = format!("{}{}", qualified, n);
            if !clashes(&numbered) {
                return numbered;
            }
            n += 1;
        }
    }
}

/// Deterministic converter name for a target type:
/// `toJsonObject`, `toJsonObjectList`, `toByteArray`
pub fn converter_name(target: &TypeExpr) -> String {
    format!("to{}", type_stem(target))
}

fn type_stem(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Primitive(p) => capitalize(p.keyword()),
        TypeExpr::Named(name) => simple_name(name).to_string(),
        TypeExpr::Parameterized { raw, args } => match args.as_slice() {
            [element] if simple_name(raw) == "List" => format!("{}List", type_stem(element)),
            _ => simple_name(raw).to_string(),
        },
        TypeExpr::Wildcard(WildcardBound::Extends(bound)) => type_stem(bound),
        TypeExpr::Wildcard(_) => "Object".to_string(),
        TypeExpr::Array(element) => format!("{}Array", type_stem(element)),
    }
}
