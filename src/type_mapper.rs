//! Type mapping engine.
//!
//! Translates a source type reference into the pair of source-side and
//! target-side types the emitters need. Resolution order:
//!
//! 1. primitives map to themselves
//! 2. type variables and unbounded wildcards pass through
//! 3. the substitution table (built-in entries plus configuration)
//! 4. classes labeled enum, reactive API or options config are moved to
//!    the target namespace under the same simple name
//! 5. isolated classes are reused unchanged
//!
//! Anything else is an [`GenError::UnmappableType`]. Publisher types are
//! only legal as a method's return type, where [`TypeMapper::map_return`]
//! unwraps them into the single- or multi-result target abstraction.

use crate::arity::{resolve_arity, Arity};
use crate::config::GeneratorConfig;
use crate::context::{ApiSurface, Classification};
use crate::error::{GenError, Result};
use crate::model::{ApiModel, ClassDescriptor, MethodDescriptor};
use crate::namespace::NamespaceMapper;
use crate::type_expr::{TypeExpr, WildcardBound};
use log::trace;
use std::collections::BTreeMap;

/// Source types the target API uses unchanged
const KEPT_TYPES: &[&str] = &[
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Character",
    "java.lang.CharSequence",
    "java.lang.Class",
    "java.lang.Double",
    "java.lang.Float",
    "java.lang.Integer",
    "java.lang.Iterable",
    "java.lang.Long",
    "java.lang.Number",
    "java.lang.Object",
    "java.lang.Short",
    "java.lang.String",
    "java.lang.Void",
    "java.util.Collection",
    "java.util.Date",
    "java.util.List",
    "java.util.Map",
    "java.util.Set",
    "java.util.UUID",
];

/// Type variable standing for the payload in the target templates
const PAYLOAD_VAR: &str = "T";

/// Which resolution rule produced a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRule {
    Primitive,
    /// Type variables and unbounded wildcards
    PassThrough,
    Substituted,
    Rewritten(Classification),
    Isolated,
    Publisher,
}

/// A source type together with its target-side representation
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub source: TypeExpr,
    pub target: TypeExpr,
    pub is_publisher: bool,
    pub is_single_result: bool,
    /// Mapped payload of a publisher; `None` for completion-only results
    pub element: Option<Box<MappedType>>,
    pub rule: MappingRule,
}

impl MappedType {
    fn plain(source: &TypeExpr, target: TypeExpr, rule: MappingRule) -> Self {
        Self {
            source: source.clone(),
            target,
            is_publisher: false,
            is_single_result: false,
            element: None,
            rule,
        }
    }

    pub fn source_type(&self) -> String {
        self.source.to_string()
    }

    pub fn target_type(&self) -> String {
        self.target.to_string()
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    /// Whether values crossing the boundary need a generated converter.
    ///
    /// Rewritten classes convert themselves (`toDriverClass` /
    /// `fromDriverClass`) unless they are wrapped in an array or wildcard.
    /// Publishers are unwrapped by the emitter, not converted.
    pub fn needs_converter(&self) -> bool {
        if self.is_identity() {
            return false;
        }
        match self.rule {
            MappingRule::Publisher => false,
            MappingRule::Rewritten(_) => !matches!(
                self.source,
                TypeExpr::Named(_) | TypeExpr::Parameterized { .. }
            ),
            _ => true,
        }
    }

    /// Label of a class rewritten into the target namespace
    pub fn rewritten_as(&self) -> Option<Classification> {
        match (self.rule, &self.source) {
            (MappingRule::Rewritten(label), TypeExpr::Named(_) | TypeExpr::Parameterized { .. }) => {
                Some(label)
            }
            _ => None,
        }
    }
}

/// Maps source types against one finalized API surface
pub struct TypeMapper<'a> {
    model: &'a ApiModel,
    config: &'a GeneratorConfig,
    surface: &'a ApiSurface,
    namespaces: NamespaceMapper<'a>,
    substitutions: BTreeMap<String, Option<TypeExpr>>,
    single_result: TypeExpr,
    callback: TypeExpr,
    multi_result: TypeExpr,
}

impl<'a> TypeMapper<'a> {
    pub fn new(
        model: &'a ApiModel,
        config: &'a GeneratorConfig,
        surface: &'a ApiSurface,
    ) -> Result<Self> {
        let mut substitutions: BTreeMap<String, Option<TypeExpr>> = KEPT_TYPES
            .iter()
            .map(|name| (name.to_string(), None))
            .collect();
        substitutions.insert(config.time_unit_type.clone(), None);
        for (source, target) in &config.substitutions {
            let target = target.as_deref().map(TypeExpr::parse).transpose()?;
            substitutions.insert(source.clone(), target);
        }

        let mapper = Self {
            model,
            config,
            surface,
            namespaces: NamespaceMapper::new(&config.namespace_rewrites),
            substitutions,
            single_result: TypeExpr::parse(&config.single_result_type)?,
            callback: TypeExpr::parse(&config.callback_type)?,
            multi_result: TypeExpr::parse(&config.multi_result_type)?,
        };
        mapper.check_target_names()?;
        Ok(mapper)
    }

    /// Every rewritten class must land on its own target name, otherwise
    /// one generated file would silently replace another.
    fn check_target_names(&self) -> Result<()> {
        let mut owners: BTreeMap<String, &str> = BTreeMap::new();
        for name in self.surface.visited_classes() {
            if !self
                .surface
                .classification(name)
                .map_or(false, is_rewritten_label)
            {
                continue;
            }
            let target = self.target_class_name(name)?;
            if let Some(first) = owners.get(&target) {
                return Err(GenError::TargetNameClash {
                    target,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
            owners.insert(target, name);
        }
        Ok(())
    }

    pub fn surface(&self) -> &ApiSurface {
        self.surface
    }

    /// Map a type used anywhere but a method's return position.
    ///
    /// `site` names the member using the type, for error reports.
    pub fn map_type(&self, ty: &TypeExpr, site: &str) -> Result<MappedType> {
        let mapped = match ty {
            TypeExpr::Primitive(_) => MappedType::plain(ty, ty.clone(), MappingRule::Primitive),
            TypeExpr::Named(_) if ty.is_type_variable() => {
                MappedType::plain(ty, ty.clone(), MappingRule::PassThrough)
            }
            TypeExpr::Wildcard(WildcardBound::Unbounded) => {
                MappedType::plain(ty, ty.clone(), MappingRule::PassThrough)
            }
            TypeExpr::Wildcard(WildcardBound::Extends(bound)) => {
                let inner = self.map_type(bound, site)?;
                let target = TypeExpr::Wildcard(WildcardBound::Extends(Box::new(inner.target)));
                MappedType::plain(ty, target, inner.rule)
            }
            TypeExpr::Wildcard(WildcardBound::Super(bound)) => {
                let inner = self.map_type(bound, site)?;
                let target = TypeExpr::Wildcard(WildcardBound::Super(Box::new(inner.target)));
                MappedType::plain(ty, target, inner.rule)
            }
            TypeExpr::Array(element) => {
                let inner = self.map_type(element, site)?;
                MappedType::plain(ty, TypeExpr::Array(Box::new(inner.target)), inner.rule)
            }
            TypeExpr::Named(name) => self.map_class(ty, name, &[], site)?,
            TypeExpr::Parameterized { raw, args } => self.map_class(ty, raw, args, site)?,
        };
        trace!(
            "Mapped {} to {} ({:?})",
            mapped.source_type(),
            mapped.target_type(),
            mapped.rule
        );
        Ok(mapped)
    }

    fn map_class(
        &self,
        ty: &TypeExpr,
        raw: &str,
        args: &[TypeExpr],
        site: &str,
    ) -> Result<MappedType> {
        if self.surface.is_publisher(raw) {
            return Err(GenError::shape(
                site,
                format!("publisher type {} outside a method return", ty),
            ));
        }

        if let Some(substitute) = self.substitutions.get(raw) {
            // A configured target is taken as written, source arguments are dropped.
            let target = match substitute {
                Some(target) => target.clone(),
                None if args.is_empty() => ty.clone(),
                None => {
                    let mapped_args = args
                        .iter()
                        .map(|arg| self.map_type(arg, site).map(|mapped| mapped.target))
                        .collect::<Result<Vec<_>>>()?;
                    TypeExpr::parameterized(raw, mapped_args)
                }
            };
            return Ok(MappedType::plain(ty, target, MappingRule::Substituted));
        }

        if let Some(label) = self
            .surface
            .classification(raw)
            .filter(|label| is_rewritten_label(*label))
        {
            let target_raw = self.target_class_name(raw)?;
            // Arguments of a rewritten class are carried over as they are.
            let target = if args.is_empty() {
                TypeExpr::named(target_raw)
            } else {
                TypeExpr::parameterized(target_raw, args.to_vec())
            };
            return Ok(MappedType::plain(ty, target, MappingRule::Rewritten(label)));
        }

        if self.surface.is_isolated(raw) {
            return Ok(MappedType::plain(ty, ty.clone(), MappingRule::Isolated));
        }

        Err(GenError::unmappable(ty, site))
    }

    /// Map a method's return type, unwrapping publishers.
    ///
    /// A publisher of the void sentinel is a completion-only single result.
    /// Any other payload gets its arity from [`resolve_arity`].
    pub fn map_return(
        &self,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
    ) -> Result<MappedType> {
        let site = format!("{}#{}", class.name, method.signature());
        let ty = &method.return_type;
        let Some(raw) = ty.raw_name().filter(|raw| self.surface.is_publisher(raw)) else {
            return self.map_type(ty, &site);
        };

        let payload = self.publisher_payload(ty, raw).ok_or_else(|| {
            GenError::shape(&class.name, format!("cannot find the element type of {}", ty))
        })?;
        let payload = match &payload {
            TypeExpr::Wildcard(WildcardBound::Extends(bound)) => bound.as_ref().clone(),
            other => other.clone(),
        };

        if payload.raw_name() == Some(self.config.void_sentinel.as_str()) {
            return Ok(MappedType {
                source: ty.clone(),
                target: self.single_result.substitute(PAYLOAD_VAR, &payload),
                is_publisher: true,
                is_single_result: true,
                element: None,
                rule: MappingRule::Publisher,
            });
        }

        let arity = resolve_arity(self.config, class, method)?;
        let element = self.map_type(&payload, &site)?;
        let template = match arity {
            Arity::Single => &self.single_result,
            Arity::Multi => &self.multi_result,
        };
        Ok(MappedType {
            source: ty.clone(),
            target: template.substitute(PAYLOAD_VAR, &element.target.boxed()),
            is_publisher: true,
            is_single_result: arity == Arity::Single,
            element: Some(Box::new(element)),
            rule: MappingRule::Publisher,
        })
    }

    /// Element type of a publisher: its single type argument, or the
    /// argument it passes to a publisher supertype.
    fn publisher_payload(&self, ty: &TypeExpr, raw: &str) -> Option<TypeExpr> {
        if let [payload] = ty.type_args() {
            return Some(payload.clone());
        }
        let class = self.model.get(raw)?;
        class
            .interfaces
            .iter()
            .chain(class.superclass.iter())
            .filter(|parent| {
                parent
                    .raw_name()
                    .is_some_and(|name| self.surface.is_publisher(name))
            })
            .find_map(|parent| match parent.type_args() {
                [payload] if !payload.is_type_variable() => Some(payload.clone()),
                _ => None,
            })
    }

    /// Callback type of a single-result method's overload
    pub fn callback_type(&self, mapped: &MappedType) -> TypeExpr {
        let payload = match &mapped.element {
            Some(element) => element.target.boxed(),
            None => TypeExpr::named(self.config.void_sentinel.clone()),
        };
        self.callback.substitute(PAYLOAD_VAR, &payload)
    }

    /// Qualified target-namespace name of a rewritten class
    pub fn target_class_name(&self, name: &str) -> Result<String> {
        let class = self
            .model
            .get(name)
            .ok_or_else(|| GenError::ClassNotFound(name.to_string()))?;
        let implementation = class.is_concrete()
            && self.surface.classification(name) == Some(Classification::ReactiveApi);
        self.namespaces.target_name(class, implementation)
    }
}

/// Labels whose classes get a generated counterpart in the target namespace
fn is_rewritten_label(label: Classification) -> bool {
    matches!(
        label,
        Classification::Enum | Classification::ReactiveApi | Classification::OptionsConfig
    )
}
