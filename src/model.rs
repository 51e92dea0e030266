//! Language-neutral description of the reflected source API.
//!
//! An extraction step dumps every class of the source API as a
//! [`ClassDescriptor`]; the rest of the generator only ever looks at these
//! descriptors, never at the source language's own reflection facilities.

use crate::error::{GenError, Result};
use crate::type_expr::TypeExpr;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a reflected class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

/// A reflected class, interface or enum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully qualified name, nested classes joined with `.`
    pub name: String,
    /// Explicit package, when the qualified name alone is ambiguous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub kind: ClassKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeExpr>,
    #[serde(default)]
    pub interfaces: Vec<TypeExpr>,
    #[serde(default)]
    pub enum_constants: Vec<String>,
    #[serde(default)]
    pub doc: String,
}

/// A reflected field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub doc: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// A method or constructor parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// A reflected method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeExpr,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub doc: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// A reflected constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub doc: String,
}

impl ClassDescriptor {
    /// Package of the class.
    ///
    /// Without an explicit `package`, the package is the run of leading
    /// lowercase segments, so `a.b.Outer.Builder` lives in `a.b`.
    pub fn package(&self) -> String {
        match &self.package {
            Some(package) => package.clone(),
            None => package_of(&self.name),
        }
    }

    /// Name relative to the package (`Outer.Builder` for a nested class)
    pub fn relative_name(&self) -> &str {
        let package = self.package();
        if package.is_empty() {
            return &self.name;
        }
        self.name
            .strip_prefix(package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Concrete classes are instantiable: not an interface, enum or abstract class
    pub fn is_concrete(&self) -> bool {
        self.kind == ClassKind::Class && !self.is_abstract
    }

    /// This class as a type, with its own type parameters as arguments
    pub fn self_type(&self) -> TypeExpr {
        if self.type_parameters.is_empty() {
            TypeExpr::named(self.name.clone())
        } else {
            TypeExpr::parameterized(
                self.name.clone(),
                self.type_parameters
                    .iter()
                    .map(|p| TypeExpr::named(p.clone()))
                    .collect(),
            )
        }
    }

    pub fn instance_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| !m.is_static)
    }

    pub fn static_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.is_static)
    }
}

impl MethodDescriptor {
    /// Signature key used by override and ignore tables: `name(type, type)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Package of a qualified name, by the lowercase-segment convention
pub fn package_of(qualified: &str) -> String {
    let segments: Vec<&str> = qualified
        .split('.')
        .take_while(|segment| segment.chars().next().is_some_and(|c| c.is_lowercase()))
        .collect();
    segments.join(".")
}

/// The whole reflected API, indexed by qualified name
#[derive(Debug, Default)]
pub struct ApiModel {
    classes: BTreeMap<String, ClassDescriptor>,
}

impl ApiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from descriptors, rejecting duplicate names
    pub fn from_classes(classes: impl IntoIterator<Item = ClassDescriptor>) -> Result<Self> {
        let mut model = Self::new();
        for class in classes {
            model.insert(class)?;
        }
        debug!("API model holds {} classes", model.len());
        Ok(model)
    }

    pub fn insert(&mut self, class: ClassDescriptor) -> Result<()> {
        if self.classes.contains_key(&class.name) {
            return Err(GenError::DuplicateClass(class.name));
        }
        self.classes.insert(class.name.clone(), class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.values()
    }

    /// Package of a name, preferring the descriptor's explicit package
    pub fn package_of(&self, name: &str) -> String {
        match self.classes.get(name) {
            Some(class) => class.package(),
            None => package_of(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassDescriptor {
        serde_yaml::from_str(&format!("name: {}\nkind: class\n", name)).unwrap()
    }

    #[test]
    fn test_package_of_nested_class() {
        assert_eq!(package_of("com.example.Outer.Builder"), "com.example");
        assert_eq!(package_of("com.example.Leaf"), "com.example");
        assert_eq!(package_of("Leaf"), "");
    }

    #[test]
    fn test_explicit_package_wins() {
        let mut descriptor = class("com.example.odd.lowercase");
        descriptor.package = Some("com.example".to_string());
        assert_eq!(descriptor.package(), "com.example");
        assert_eq!(descriptor.relative_name(), "odd.lowercase");
    }

    #[test]
    fn test_relative_name() {
        assert_eq!(class("com.example.Outer.Builder").relative_name(), "Outer.Builder");
    }

    #[test]
    fn test_deserialize_full_descriptor() {
        let yaml = r#"
name: com.example.Svc
kind: interface
type_parameters: [TDocument]
doc: A service.
methods:
  - name: find
    parameters:
      - name: filter
        type: org.bson.conversions.Bson
    return_type: com.example.FindPublisher<TDocument>
    doc: "Finds.\n@return a publisher of documents"
  - name: create
    static: true
    return_type: com.example.Svc<org.bson.Document>
"#;
        let descriptor: ClassDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert!(descriptor.is_interface());
        assert_eq!(descriptor.methods.len(), 2);
        assert_eq!(descriptor.instance_methods().count(), 1);
        assert_eq!(descriptor.static_methods().count(), 1);
        assert_eq!(
            descriptor.methods[0].signature(),
            "find(org.bson.conversions.Bson)"
        );
        assert_eq!(descriptor.self_type().to_string(), "com.example.Svc<TDocument>");
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        let result = ApiModel::from_classes(vec![class("com.example.A"), class("com.example.A")]);
        assert_eq!(
            result.unwrap_err(),
            GenError::DuplicateClass("com.example.A".to_string())
        );
    }

    #[test]
    fn test_concrete_detection() {
        let mut descriptor = class("com.example.A");
        assert!(descriptor.is_concrete());
        descriptor.is_abstract = true;
        assert!(!descriptor.is_concrete());
    }
}
