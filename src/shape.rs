//! Method shape analyzer.
//!
//! Derives the configuration fields ("options") of an options or result
//! class from the shape of its methods. Three archetypes are recognized:
//!
//! - static builder: `Class.builder(...)`, fluent setters on the builder,
//!   terminal `build()`
//! - constructor-only: a single constructor, then setters on the instance
//! - result bean: getters only, populated from a driver-produced instance
//!
//! Every setter must pair with a getter of the same property. Setters
//! taking a duration plus a time unit collapse into one option whose unit
//! is implied.

use crate::config::GeneratorConfig;
use crate::context::Classification;
use crate::conversions::{ConversionRegistry, Direction};
use crate::error::{GenError, Result};
use crate::javadoc;
use crate::model::{ApiModel, ClassDescriptor, MethodDescriptor, ParameterDescriptor};
use crate::naming::strip_accessor_prefix;
use crate::type_expr::TypeExpr;
use crate::type_mapper::{MappedType, TypeMapper};
use log::debug;
use std::collections::BTreeSet;

const GETTER_PREFIXES: &[&str] = &["get", "is", "was"];
const SETTER_PREFIXES: &[&str] = &["set"];
const BUILDER_FACTORY: &str = "builder";
const BUILD_METHOD: &str = "build";

/// How an options class is constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Archetype {
    /// Built through the named nested builder class
    StaticBuilder { builder: String },
    ConstructorOnly,
    ResultBean,
}

impl Archetype {
    /// Config archetypes are converted to the driver class, beans from it
    pub fn is_config(&self) -> bool {
        !matches!(self, Archetype::ResultBean)
    }
}

/// Options whose values are themselves regenerated classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    Options,
    Enum,
}

/// A setter or getter on the driver side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub method: String,
    /// Takes or yields a duration together with a time unit
    pub time_unit: bool,
}

/// One derived configuration field
#[derive(Debug, Clone, PartialEq)]
pub struct OptionField {
    pub name: String,
    pub mapped: MappedType,
    /// Supplied through the constructor or builder factory
    pub mandatory: bool,
    pub converter: Option<String>,
    pub nested: Option<NestedKind>,
    /// Absent for mandatory options and result beans
    pub setter: Option<Accessor>,
    /// Absent only for setters listed as unmatched
    pub getter: Option<Accessor>,
    pub setter_doc: String,
    pub getter_doc: String,
}

impl OptionField {
    /// Field type on the target side, boxed so that "unset" is representable
    pub fn target_type(&self) -> TypeExpr {
        self.mapped.target.boxed()
    }

    /// Preferred documentation: the setter's, else the getter's
    pub fn doc(&self) -> &str {
        if self.setter_doc.is_empty() {
            &self.getter_doc
        } else {
            &self.setter_doc
        }
    }
}

/// All options of one class, in declaration order with mandatory ones first
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsShape {
    pub class: String,
    pub archetype: Archetype,
    pub options: Vec<OptionField>,
}

impl OptionsShape {
    pub fn mandatory(&self) -> impl Iterator<Item = &OptionField> {
        self.options.iter().filter(|o| o.mandatory)
    }

    pub fn optional(&self) -> impl Iterator<Item = &OptionField> {
        self.options.iter().filter(|o| !o.mandatory)
    }
}

/// An option before its getter is paired and its type mapped
struct Candidate {
    name: String,
    ty: TypeExpr,
    mandatory: bool,
    setter: Option<Accessor>,
    doc: String,
}

struct Getter {
    name: String,
    accessor: Accessor,
    ty: TypeExpr,
    doc: String,
}

pub struct ShapeAnalyzer<'a> {
    model: &'a ApiModel,
    config: &'a GeneratorConfig,
    mapper: &'a TypeMapper<'a>,
}

impl<'a> ShapeAnalyzer<'a> {
    pub fn new(model: &'a ApiModel, config: &'a GeneratorConfig, mapper: &'a TypeMapper<'a>) -> Self {
        Self {
            model,
            config,
            mapper,
        }
    }

    /// Extract the options of a class, registering the converters they need
    pub fn analyze(
        &self,
        class: &ClassDescriptor,
        registry: &mut ConversionRegistry,
    ) -> Result<OptionsShape> {
        let getters = self.getters(class);
        let (archetype, candidates) = self.candidates(class, &getters)?;
        let direction = if archetype.is_config() {
            Direction::ToSource
        } else {
            Direction::ToTarget
        };

        let mut seen = BTreeSet::new();
        let mut options = Vec::new();
        for candidate in candidates {
            if self.config.excluded_option_fields.contains(&candidate.name) {
                debug!("Skipping excluded option {}#{}", class.name, candidate.name);
                continue;
            }
            if !seen.insert(candidate.name.clone()) {
                return Err(GenError::DuplicateOption {
                    class: class.name.clone(),
                    option: candidate.name,
                });
            }

            let getter = getters.iter().find(|g| g.name == candidate.name);
            if getter.is_none()
                && !self
                    .config
                    .allows_unmatched_setter(&class.name, &candidate.name)
            {
                return Err(GenError::MissingGetter {
                    class: class.name.clone(),
                    option: candidate.name,
                });
            }

            let site = format!("{}#{}", class.name, candidate.name);
            let mapped = self.mapper.map_type(&candidate.ty, &site)?;
            let nested = nested_kind(&mapped, &site)?;
            if nested == Some(NestedKind::Options) {
                self.check_nested_direction(&archetype, &mapped, &site)?;
            }
            let converter = registry.register_mapped(&mapped, direction);

            options.push(OptionField {
                name: candidate.name,
                mapped,
                mandatory: candidate.mandatory,
                converter,
                nested,
                setter: candidate.setter,
                getter: getter.map(|g| g.accessor.clone()),
                setter_doc: javadoc::description(&candidate.doc),
                getter_doc: getter
                    .map(|g| javadoc::description(&g.doc))
                    .unwrap_or_default(),
            });
        }

        debug!(
            "{} is a {:?} with {} options",
            class.name,
            archetype,
            options.len()
        );
        Ok(OptionsShape {
            class: class.name.clone(),
            archetype,
            options,
        })
    }

    /// A nested options class must convert the same way as its owner:
    /// configs build driver instances, beans are copied from them.
    fn check_nested_direction(
        &self,
        owner: &Archetype,
        mapped: &MappedType,
        site: &str,
    ) -> Result<()> {
        let nested = mapped
            .source
            .raw_name()
            .and_then(|raw| self.model.get(raw))
            .ok_or_else(|| GenError::unmappable(&mapped.source, site))?;
        let (archetype, _) = self.candidates(nested, &self.getters(nested))?;
        if archetype.is_config() == owner.is_config() {
            return Ok(());
        }
        Err(GenError::shape(
            site,
            format!(
                "nested {} is a {}, its owner is a {}",
                nested.name,
                role(&archetype),
                role(owner)
            ),
        ))
    }

    fn candidates(
        &self,
        class: &ClassDescriptor,
        getters: &[Getter],
    ) -> Result<(Archetype, Vec<Candidate>)> {
        let factories: Vec<&MethodDescriptor> = class
            .static_methods()
            .filter(|m| m.name == BUILDER_FACTORY)
            .filter(|m| !self.config.is_ignored_method(&class.name, m))
            .filter(|m| !is_copy_factory(class, m))
            .collect();
        match factories.as_slice() {
            [] => {}
            [factory] => return self.builder_candidates(class, factory),
            _ => {
                return Err(GenError::shape(
                    &class.name,
                    format!("{} builder factories", factories.len()),
                ))
            }
        }

        let setters: Vec<Candidate> = class
            .instance_methods()
            .filter_map(|m| self.setter(&class.name, m))
            .collect();
        let has_ctor_params = class.constructors.iter().any(|c| !c.parameters.is_empty());

        if setters.is_empty() && !has_ctor_params {
            let candidates = getters
                .iter()
                .map(|g| Candidate {
                    name: g.name.clone(),
                    ty: g.ty.clone(),
                    mandatory: false,
                    setter: None,
                    doc: String::new(),
                })
                .collect();
            return Ok((Archetype::ResultBean, candidates));
        }

        let ctor = match class.constructors.as_slice() {
            [ctor] => ctor,
            [] => {
                return Err(GenError::shape(
                    &class.name,
                    "options class without a public constructor",
                ))
            }
            many => {
                return Err(GenError::MultipleConstructors {
                    class: class.name.clone(),
                    count: many.len(),
                })
            }
        };
        let mut candidates: Vec<Candidate> = ctor
            .parameters
            .iter()
            .map(|p| mandatory_candidate(p, &ctor.doc))
            .collect();
        candidates.extend(setters);
        Ok((Archetype::ConstructorOnly, candidates))
    }

    fn builder_candidates(
        &self,
        class: &ClassDescriptor,
        factory: &MethodDescriptor,
    ) -> Result<(Archetype, Vec<Candidate>)> {
        let builder_name = factory.return_type.raw_name().ok_or_else(|| {
            GenError::shape(
                &class.name,
                format!("builder factory returns {}", factory.return_type),
            )
        })?;
        let builder = self
            .model
            .get(builder_name)
            .ok_or_else(|| GenError::ClassNotFound(builder_name.to_string()))?;

        let has_build = builder.instance_methods().any(|m| {
            m.name == BUILD_METHOD
                && m.parameters.is_empty()
                && m.return_type.raw_name() == Some(class.name.as_str())
        });
        if !has_build {
            return Err(GenError::shape(
                &builder.name,
                format!("builder without a build() method returning {}", class.name),
            ));
        }

        let mut candidates: Vec<Candidate> = factory
            .parameters
            .iter()
            .map(|p| mandatory_candidate(p, &factory.doc))
            .collect();
        candidates.extend(
            builder
                .instance_methods()
                .filter_map(|m| self.setter(&builder.name, m)),
        );
        Ok((
            Archetype::StaticBuilder {
                builder: builder.name.clone(),
            },
            candidates,
        ))
    }

    /// `setX(v)` returning void or the owner, or a fluent `x(v)` returning the owner
    fn setter(&self, owner: &str, method: &MethodDescriptor) -> Option<Candidate> {
        if method.is_static
            || method.name == BUILD_METHOD
            || self.config.is_ignored_method(owner, method)
        {
            return None;
        }
        let (value, time_unit) = match method.parameters.as_slice() {
            [value] => (value, false),
            [value, unit] if self.is_time_unit(&unit.ty) => (value, true),
            _ => return None,
        };
        let returns_owner = method.return_type.raw_name() == Some(owner);

        let name = match strip_accessor_prefix(&method.name, SETTER_PREFIXES) {
            Some(name) if returns_owner || method.return_type.is_void() => name,
            _ if returns_owner => method.name.clone(),
            _ => return None,
        };
        Some(Candidate {
            name,
            ty: value.ty.clone(),
            mandatory: false,
            setter: Some(Accessor {
                method: method.name.clone(),
                time_unit,
            }),
            doc: method.doc.clone(),
        })
    }

    /// `getX()`, `isX()`, `wasX()`, optionally taking a time unit
    fn getters(&self, class: &ClassDescriptor) -> Vec<Getter> {
        let mut getters: Vec<Getter> = Vec::new();
        for method in class.instance_methods() {
            if method.return_type.is_void()
                || method.name == "getClass"
                || self.config.is_ignored_method(&class.name, method)
            {
                continue;
            }
            let time_unit = match method.parameters.as_slice() {
                [] => false,
                [unit] if self.is_time_unit(&unit.ty) => true,
                _ => continue,
            };
            let Some(name) = strip_accessor_prefix(&method.name, GETTER_PREFIXES) else {
                continue;
            };
            if getters.iter().any(|g| g.name == name) {
                continue;
            }
            getters.push(Getter {
                name,
                accessor: Accessor {
                    method: method.name.clone(),
                    time_unit,
                },
                ty: method.return_type.clone(),
                doc: method.doc.clone(),
            });
        }
        getters
    }

    fn is_time_unit(&self, ty: &TypeExpr) -> bool {
        ty.raw_name() == Some(self.config.time_unit_type.as_str())
    }
}

/// `builder(Existing)` copies an instance and adds no options
fn is_copy_factory(class: &ClassDescriptor, method: &MethodDescriptor) -> bool {
    matches!(
        method.parameters.as_slice(),
        [only] if only.ty.raw_name() == Some(class.name.as_str())
    )
}

fn mandatory_candidate(param: &ParameterDescriptor, doc: &str) -> Candidate {
    Candidate {
        name: param.name.clone(),
        ty: param.ty.clone(),
        mandatory: true,
        setter: None,
        doc: javadoc::param_text(doc, &param.name).unwrap_or_default(),
    }
}

fn role(archetype: &Archetype) -> &'static str {
    if archetype.is_config() {
        "config"
    } else {
        "result bean"
    }
}

fn nested_kind(mapped: &MappedType, site: &str) -> Result<Option<NestedKind>> {
    match mapped.rewritten_as() {
        None => Ok(None),
        Some(Classification::Enum) => Ok(Some(NestedKind::Enum)),
        Some(Classification::OptionsConfig) => Ok(Some(NestedKind::Options)),
        Some(label) => Err(GenError::shape(
            site,
            format!(
                "option of type {} ({:?}) has no data object counterpart",
                mapped.source, label
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ApiSurface;
    use crate::test_support;
    use pretty_assertions::assert_eq;

    fn analyze_with(
        yaml: &str,
        class: &str,
        adjust: impl FnOnce(&mut GeneratorConfig),
    ) -> (Result<OptionsShape>, ConversionRegistry) {
        let model = test_support::model(yaml);
        let mut config = test_support::config(&[class]);
        adjust(&mut config);
        let surface: ApiSurface = test_support::surface(&model, &config);
        let mapper = TypeMapper::new(&model, &config, &surface).unwrap();
        let analyzer = ShapeAnalyzer::new(&model, &config, &mapper);
        let mut registry = ConversionRegistry::new();
        let shape = analyzer.analyze(model.get(class).unwrap(), &mut registry);
        (shape, registry)
    }

    fn analyze(yaml: &str, class: &str) -> (Result<OptionsShape>, ConversionRegistry) {
        analyze_with(yaml, class, |_| {})
    }

    const CLIENT_SETTINGS: &str = r#"
- name: com.example.ClientSettings
  kind: class
  methods:
    - name: builder
      static: true
      return_type: com.example.ClientSettings.Builder
    - name: builder
      static: true
      parameters:
        - name: settings
          type: com.example.ClientSettings
      return_type: com.example.ClientSettings.Builder
    - name: getRetryWrites
      return_type: boolean
      doc: "Returns the retry writes value.\n@return the retryWrites value"
    - name: getReadPreference
      return_type: com.example.ReadPreference
    - name: getCodecRegistry
      return_type: org.bson.codecs.configuration.CodecRegistry
- name: com.example.ClientSettings.Builder
  kind: class
  methods:
    - name: retryWrites
      parameters:
        - name: retryWrites
          type: boolean
      return_type: com.example.ClientSettings.Builder
      doc: "Sets whether writes should be retried if they fail due to a network error.\n@param retryWrites the retryWrites value\n@return this"
    - name: readPreference
      parameters:
        - name: readPreference
          type: com.example.ReadPreference
      return_type: com.example.ClientSettings.Builder
      doc: "Sets the read preference."
    - name: codecRegistry
      parameters:
        - name: codecRegistry
          type: org.bson.codecs.configuration.CodecRegistry
      return_type: com.example.ClientSettings.Builder
    - name: build
      return_type: com.example.ClientSettings
- name: com.example.ReadPreference
  kind: class
  abstract: true
"#;

    #[test]
    fn test_static_builder_options() {
        let (shape, registry) = analyze(CLIENT_SETTINGS, "com.example.ClientSettings");
        let shape = shape.unwrap();

        assert_eq!(
            shape.archetype,
            Archetype::StaticBuilder {
                builder: "com.example.ClientSettings.Builder".to_string()
            }
        );
        let names: Vec<&str> = shape.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["retryWrites", "readPreference"]);

        let retry = &shape.options[0];
        assert_eq!(retry.target_type().to_source(), "Boolean");
        assert_eq!(retry.setter.as_ref().unwrap().method, "retryWrites");
        assert_eq!(retry.getter.as_ref().unwrap().method, "getRetryWrites");
        assert_eq!(
            retry.doc(),
            "Sets whether writes should be retried if they fail due to a network error."
        );

        // The getter has no documentation; the option is still complete.
        let read = &shape.options[1];
        assert_eq!(read.getter.as_ref().unwrap().method, "getReadPreference");
        assert_eq!(read.getter_doc, "");
        assert_eq!(read.mapped.target_type(), "com.example.ReadPreference");
        assert!(read.converter.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_builder_without_build_is_rejected() {
        let yaml = CLIENT_SETTINGS.replace("    - name: build\n", "    - name: create\n");
        let (shape, _) = analyze(&yaml, "com.example.ClientSettings");
        assert!(matches!(shape, Err(GenError::UnsupportedShape { .. })));
    }

    const COUNT_OPTIONS: &str = r#"
- name: com.example.CountOptions
  kind: class
  constructors:
    - parameters: []
  methods:
    - name: limit
      parameters:
        - name: limit
          type: int
      return_type: com.example.CountOptions
    - name: getLimit
      return_type: int
    - name: hint
      parameters:
        - name: hint
          type: org.bson.conversions.Bson
      return_type: com.example.CountOptions
    - name: getHint
      return_type: org.bson.conversions.Bson
    - name: maxTime
      parameters:
        - name: maxTime
          type: long
        - name: timeUnit
          type: java.util.concurrent.TimeUnit
      return_type: com.example.CountOptions
    - name: getMaxTime
      parameters:
        - name: timeUnit
          type: java.util.concurrent.TimeUnit
      return_type: long
    - name: setLevel
      parameters:
        - name: level
          type: com.example.Level
      return_type: void
    - name: isLevel
      return_type: com.example.Level
- name: com.example.Level
  kind: enum
  enum_constants: [LOW, HIGH]
"#;

    #[test]
    fn test_constructor_only_options() {
        let (shape, registry) = analyze(COUNT_OPTIONS, "com.example.CountOptions");
        let shape = shape.unwrap();

        assert_eq!(shape.archetype, Archetype::ConstructorOnly);
        assert_eq!(shape.mandatory().count(), 0);
        let names: Vec<&str> = shape.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "hint", "maxTime", "level"]);

        let hint = &shape.options[1];
        assert_eq!(hint.converter.as_deref(), Some("toBson"));
        assert_eq!(registry.len(), 1);

        let max_time = &shape.options[2];
        assert!(max_time.setter.as_ref().unwrap().time_unit);
        assert!(max_time.getter.as_ref().unwrap().time_unit);
        assert_eq!(max_time.target_type().to_source(), "Long");

        let level = &shape.options[3];
        assert_eq!(level.nested, Some(NestedKind::Enum));
        assert_eq!(level.setter.as_ref().unwrap().method, "setLevel");
        assert_eq!(level.mapped.target_type(), "io.vertx.example.Level");
    }

    #[test]
    fn test_constructor_parameters_are_mandatory() {
        let yaml = r#"
- name: com.example.IndexOptions
  kind: class
  constructors:
    - parameters:
        - name: name
          type: java.lang.String
      doc: "@param name the index name"
  methods:
    - name: getName
      return_type: java.lang.String
    - name: unique
      parameters:
        - name: unique
          type: boolean
      return_type: com.example.IndexOptions
    - name: isUnique
      return_type: boolean
"#;
        let (shape, _) = analyze(yaml, "com.example.IndexOptions");
        let shape = shape.unwrap();
        let mandatory: Vec<&OptionField> = shape.mandatory().collect();
        assert_eq!(mandatory.len(), 1);
        assert_eq!(mandatory[0].name, "name");
        assert_eq!(mandatory[0].doc(), "the index name");
        assert!(mandatory[0].setter.is_none());
        assert_eq!(shape.optional().count(), 1);
    }

    #[test]
    fn test_multiple_constructors_are_fatal() {
        let yaml = r#"
- name: com.example.IndexOptions
  kind: class
  constructors:
    - parameters: []
    - parameters:
        - name: name
          type: java.lang.String
  methods:
    - name: getName
      return_type: java.lang.String
"#;
        let (shape, _) = analyze(yaml, "com.example.IndexOptions");
        assert_eq!(
            shape.unwrap_err(),
            GenError::MultipleConstructors {
                class: "com.example.IndexOptions".to_string(),
                count: 2,
            }
        );
    }

    const UNMATCHED: &str = r#"
- name: com.example.BatchOptions
  kind: class
  constructors:
    - parameters: []
  methods:
    - name: batchSize
      parameters:
        - name: batchSize
          type: int
      return_type: com.example.BatchOptions
    - name: batchSize
      parameters:
        - name: batchSize
          type: long
      return_type: com.example.BatchOptions
"#;

    #[test]
    fn test_setter_without_getter_is_fatal() {
        let (shape, _) = analyze(UNMATCHED, "com.example.BatchOptions");
        assert_eq!(
            shape.unwrap_err(),
            GenError::MissingGetter {
                class: "com.example.BatchOptions".to_string(),
                option: "batchSize".to_string(),
            }
        );
    }

    #[test]
    fn test_overloaded_setter_is_a_duplicate_option() {
        let (shape, _) = analyze_with(UNMATCHED, "com.example.BatchOptions", |config| {
            config
                .unmatched_setters
                .insert("com.example.BatchOptions#batchSize".to_string());
        });
        assert!(matches!(shape, Err(GenError::DuplicateOption { .. })));
    }

    #[test]
    fn test_listed_exceptions_make_the_shape_acceptable() {
        let (shape, _) = analyze_with(UNMATCHED, "com.example.BatchOptions", |config| {
            config
                .unmatched_setters
                .insert("com.example.BatchOptions#batchSize".to_string());
            config
                .ignored_members
                .insert("com.example.BatchOptions#batchSize(long)".to_string());
        });
        let shape = shape.unwrap();
        assert_eq!(shape.options.len(), 1);
        assert!(shape.options[0].getter.is_none());
        assert_eq!(shape.options[0].target_type().to_source(), "Integer");
    }

    #[test]
    fn test_result_bean() {
        let yaml = r#"
- name: com.example.UpdateResult
  kind: class
  abstract: true
  methods:
    - name: getMatchedCount
      return_type: long
      doc: "Gets the number of documents matched."
    - name: wasAcknowledged
      return_type: boolean
    - name: getUpsertedDocument
      return_type: org.bson.Document
"#;
        let (shape, registry) = analyze(yaml, "com.example.UpdateResult");
        let shape = shape.unwrap();

        assert_eq!(shape.archetype, Archetype::ResultBean);
        let names: Vec<&str> = shape.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["matchedCount", "acknowledged", "upsertedDocument"]);
        assert_eq!(shape.options[0].doc(), "Gets the number of documents matched.");
        assert_eq!(shape.options[2].converter.as_deref(), Some("toJsonObject"));
        assert_eq!(
            registry.conversions()[0].from.to_string(),
            "org.bson.Document"
        );
    }

    const RUN_RESULT: &str = r#"
- name: com.example.RunResult
  kind: class
  abstract: true
  methods:
    - name: getStats
      return_type: com.example.StatsResult
- name: com.example.StatsResult
  kind: class
  abstract: true
  methods:
    - name: getCount
      return_type: long
- name: com.example.FindOptions
  kind: class
  constructors:
    - parameters: []
  methods:
    - name: limit
      parameters:
        - name: limit
          type: int
      return_type: com.example.FindOptions
    - name: getLimit
      return_type: int
"#;

    #[test]
    fn test_result_bean_nests_result_bean() {
        let (shape, _) = analyze(RUN_RESULT, "com.example.RunResult");
        let shape = shape.unwrap();
        assert_eq!(shape.options[0].nested, Some(NestedKind::Options));
        assert_eq!(
            shape.options[0].mapped.target_type(),
            "io.vertx.example.StatsResult"
        );
    }

    #[test]
    fn test_result_bean_cannot_nest_config() {
        let yaml = RUN_RESULT.replace(
            "return_type: com.example.StatsResult",
            "return_type: com.example.FindOptions",
        );
        let (shape, _) = analyze(&yaml, "com.example.RunResult");
        assert_eq!(
            shape.unwrap_err(),
            GenError::UnsupportedShape {
                class: "com.example.RunResult#stats".to_string(),
                reason: "nested com.example.FindOptions is a config, its owner is a result bean"
                    .to_string(),
            }
        );
    }
}
