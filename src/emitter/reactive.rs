//! Reactive API emitter.
//!
//! A reactive API class becomes a target interface. Publisher-returning
//! methods return the single-result or multi-result abstraction; single
//! results also get a `default` overload taking a completion callback.

use super::{push_javadoc, push_line, push_package, with_tags, JavaFile, OutputCategory};
use crate::config::GeneratorConfig;
use crate::context::Classification;
use crate::conversions::{ConversionRegistry, Direction};
use crate::error::{GenError, Result};
use crate::javadoc;
use crate::model::{ClassDescriptor, MethodDescriptor};
use crate::type_expr::simple_name;
use crate::type_mapper::{MappedType, TypeMapper};
use log::{debug, warn};
use std::collections::BTreeMap;

const RESULT_HANDLER: &str = "resultHandler";

struct TargetMethod<'c> {
    name: String,
    source: &'c MethodDescriptor,
    params: Vec<(String, MappedType)>,
    returns: MappedType,
}

/// Emit the target interface of a reactive API class
pub fn emit_reactive_api(
    class: &ClassDescriptor,
    mapper: &TypeMapper,
    config: &GeneratorConfig,
    registry: &mut ConversionRegistry,
) -> Result<JavaFile> {
    let qualified_name = mapper.target_class_name(&class.name)?;
    let simple = simple_name(&qualified_name);
    let self_type = if class.type_parameters.is_empty() {
        simple.to_string()
    } else {
        format!("{}<{}>", simple, class.type_parameters.join(", "))
    };

    let mut methods = Vec::new();
    for method in &class.methods {
        if method.is_static {
            warn!("Skipping static method {}#{}", class.name, method.signature());
            continue;
        }
        if config.is_ignored_method(&class.name, method) {
            debug!("Skipping ignored method {}#{}", class.name, method.signature());
            continue;
        }
        methods.push(target_method(class, method, mapper, registry)?);
    }
    disambiguate(class, &mut methods)?;

    let mut supertypes = Vec::new();
    for interface in &class.interfaces {
        let reactive = interface.raw_name().is_some_and(|raw| {
            mapper.surface().classification(raw) == Some(Classification::ReactiveApi)
        });
        if reactive {
            supertypes.push(mapper.map_type(interface, &class.name)?.target.to_source());
        }
    }

    let mut code = String::new();
    push_package(
        &mut code,
        qualified_name.rsplit_once('.').map_or("", |(package, _)| package),
    );
    push_javadoc(&mut code, 0, &[javadoc::description(&class.doc)]);
    let extends = if supertypes.is_empty() {
        String::new()
    } else {
        format!(" extends {}", supertypes.join(", "))
    };
    code.push_str(&format!("public interface {}{} {{\n", self_type, extends));

    for method in &methods {
        code.push('\n');
        render_method(&mut code, method);
        if method.returns.is_publisher && method.returns.is_single_result {
            code.push('\n');
            render_callback_overload(&mut code, method, &self_type, mapper, config);
        }
    }
    code.push_str("}\n");

    debug!("Emitted {} with {} methods", qualified_name, methods.len());
    Ok(JavaFile {
        qualified_name,
        category: OutputCategory::ReactiveApi,
        source: code,
    })
}

fn target_method<'c>(
    class: &ClassDescriptor,
    method: &'c MethodDescriptor,
    mapper: &TypeMapper,
    registry: &mut ConversionRegistry,
) -> Result<TargetMethod<'c>> {
    let site = format!("{}#{}", class.name, method.signature());

    let mut params = Vec::new();
    for param in &method.parameters {
        let publisher = param
            .ty
            .raw_name()
            .is_some_and(|raw| mapper.surface().is_publisher(raw));
        if publisher {
            return Err(GenError::shape(
                &class.name,
                format!("{} takes the publisher parameter {}", method.signature(), param.name),
            ));
        }
        let mapped = mapper.map_type(&param.ty, &site)?;
        registry.register_mapped(&mapped, Direction::ToSource);
        params.push((param.name.clone(), mapped));
    }

    let returns = mapper.map_return(class, method)?;
    match &returns.element {
        Some(element) => registry.register_mapped(element, Direction::ToTarget),
        None => registry.register_mapped(&returns, Direction::ToTarget),
    };

    Ok(TargetMethod {
        name: method.name.clone(),
        source: method,
        params,
        returns,
    })
}

/// Methods whose target signatures coincide are told apart by whether their
/// documentation talks about an id or a name; anything else is fatal.
fn disambiguate(class: &ClassDescriptor, methods: &mut [TargetMethod]) -> Result<()> {
    let mut groups: BTreeMap<(String, Vec<String>), Vec<usize>> = BTreeMap::new();
    for (index, method) in methods.iter().enumerate() {
        let erasures = method.params.iter().map(|(_, m)| m.target.erasure()).collect();
        groups
            .entry((method.name.clone(), erasures))
            .or_default()
            .push(index);
    }

    for ((name, _), indices) in groups {
        let [first, second] = match indices.as_slice() {
            [_] => continue,
            [first, second] => [*first, *second],
            _ => return Err(clash(class, &name)),
        };
        match (
            overload_suffix(&methods[first].source.doc),
            overload_suffix(&methods[second].source.doc),
        ) {
            (Some(a), Some(b)) if a != b => {
                methods[first].name = format!("{}{}", name, a);
                methods[second].name = format!("{}{}", name, b);
                debug!(
                    "Split {}#{} into {} and {}",
                    class.name, name, methods[first].name, methods[second].name
                );
            }
            _ => return Err(clash(class, &name)),
        }
    }
    Ok(())
}

fn clash(class: &ClassDescriptor, method: &str) -> GenError {
    GenError::shape(
        &class.name,
        format!("overloads of {} are identical in the target API", method),
    )
}

fn overload_suffix(doc: &str) -> Option<&'static str> {
    let text = doc.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    let mentions_id = words
        .iter()
        .any(|word| matches!(*word, "id" | "identifier" | "objectid"));
    let mentions_name = words.iter().any(|word| matches!(*word, "name" | "names"));
    match (mentions_id, mentions_name) {
        (true, false) => Some("ById"),
        (false, true) => Some("ByName"),
        _ => None,
    }
}

fn render_method(code: &mut String, method: &TargetMethod) {
    let doc = &method.source.doc;
    let mut tags = param_tags(method);
    if let Some(text) = javadoc::return_text(doc).filter(|t| !t.is_empty()) {
        tags.push(format!("@return {}", text));
    }
    push_javadoc(code, 1, &with_tags(javadoc::description(doc), tags));

    push_line(
        code,
        1,
        &format!(
            "{}{} {}({});",
            type_parameters(method),
            method.returns.target.to_source(),
            method.name,
            parameter_list(&method.params)
        ),
    );
}

fn render_callback_overload(
    code: &mut String,
    method: &TargetMethod,
    self_type: &str,
    mapper: &TypeMapper,
    config: &GeneratorConfig,
) {
    let mut tags = param_tags(method);
    tags.push(format!("@param {} an async result handler", RESULT_HANDLER));
    tags.push("@return a reference to this, so the API can be used fluently".to_string());
    push_javadoc(
        code,
        1,
        &with_tags(javadoc::description(&method.source.doc), tags),
    );

    let mut params = parameter_list(&method.params);
    if !params.is_empty() {
        params.push_str(", ");
    }
    params.push_str(&format!(
        "{} {}",
        mapper.callback_type(&method.returns).to_source(),
        RESULT_HANDLER
    ));
    let args: Vec<&str> = method.params.iter().map(|(name, _)| name.as_str()).collect();

    push_line(
        code,
        1,
        &format!(
            "default {}{} {}({}) {{",
            type_parameters(method),
            self_type,
            method.name,
            params
        ),
    );
    push_line(
        code,
        2,
        &format!(
            "{}({}).{}({});",
            method.name,
            args.join(", "),
            config.completion_method,
            RESULT_HANDLER
        ),
    );
    push_line(code, 2, "return this;");
    push_line(code, 1, "}");
}

fn param_tags(method: &TargetMethod) -> Vec<String> {
    method
        .params
        .iter()
        .filter_map(|(name, _)| {
            javadoc::param_text(&method.source.doc, name)
                .filter(|text| !text.is_empty())
                .map(|text| format!("@param {} {}", name, text))
        })
        .collect()
}

fn type_parameters(method: &TargetMethod) -> String {
    if method.source.type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}> ", method.source.type_parameters.join(", "))
    }
}

fn parameter_list(params: &[(String, MappedType)]) -> String {
    params
        .iter()
        .map(|(name, mapped)| format!("{} {}", mapped.target.to_source(), name))
        .collect::<Vec<_>>()
        .join(", ")
}
