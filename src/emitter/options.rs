//! Options and result bean emitter.
//!
//! Emits a data object class per options shape: one private field per
//! option, setter and getter pairs for optional fields, a constructor over
//! the mandatory fields, JSON hooks, and the conversion to the driver class
//! (config archetypes) or from it (result beans).

use super::{push_javadoc, push_line, push_package, with_tags, JavaFile, OutputCategory};
use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::javadoc;
use crate::model::ClassDescriptor;
use crate::naming::capitalize;
use crate::shape::{Archetype, OptionField, OptionsShape};
use crate::type_expr::{simple_name, TypeExpr};
use crate::type_mapper::TypeMapper;
use log::debug;

/// Emit the data object of an options or result class
pub fn emit_options(
    class: &ClassDescriptor,
    shape: &OptionsShape,
    mapper: &TypeMapper,
    config: &GeneratorConfig,
) -> Result<JavaFile> {
    if !class.type_parameters.is_empty() {
        return Err(GenError::shape(&class.name, "generic options class"));
    }
    let qualified_name = mapper.target_class_name(&class.name)?;
    let emitter = OptionsEmitter {
        class,
        shape,
        config,
        simple: simple_name(&qualified_name).to_string(),
        driver: class.self_type().to_source(),
    };

    let mut code = String::new();
    push_package(
        &mut code,
        qualified_name.rsplit_once('.').map_or("", |(package, _)| package),
    );
    emitter.render(&mut code);

    debug!(
        "Emitted {} with {} options",
        qualified_name,
        shape.options.len()
    );
    Ok(JavaFile {
        qualified_name,
        category: OutputCategory::Options,
        source: code,
    })
}

struct OptionsEmitter<'a> {
    class: &'a ClassDescriptor,
    shape: &'a OptionsShape,
    config: &'a GeneratorConfig,
    simple: String,
    /// Driver class, as written in the generated source
    driver: String,
}

impl OptionsEmitter<'_> {
    fn render(&self, code: &mut String) {
        push_javadoc(code, 0, &[javadoc::description(&self.class.doc)]);
        code.push_str(&format!(
            "@{}(generateConverter = true)\n",
            self.config.data_object_annotation
        ));
        code.push_str(&format!("public class {} {{\n", self.simple));

        for option in &self.shape.options {
            code.push('\n');
            self.field(code, option);
        }

        self.constructors(code);
        if self.shape.archetype == Archetype::ResultBean {
            self.from_driver(code);
        }

        for option in &self.shape.options {
            if !option.mandatory {
                self.setter(code, option);
            }
            self.getter(code, option);
        }

        self.to_json(code);
        if self.shape.archetype.is_config() {
            self.to_driver(code);
        }
        code.push_str("}\n");
    }

    fn field(&self, code: &mut String, option: &OptionField) {
        push_javadoc(code, 1, &[option.doc().to_string()]);
        push_line(
            code,
            1,
            &format!("private {} {};", option.target_type().to_source(), option.name),
        );
    }

    fn constructors(&self, code: &mut String) {
        let json = TypeExpr::named(self.config.json_type.clone()).to_source();
        let mandatory: Vec<&OptionField> = self.shape.mandatory().collect();

        code.push('\n');
        push_line(code, 1, &format!("public {}() {{", self.simple));
        push_line(code, 1, "}");

        code.push('\n');
        push_javadoc(
            code,
            1,
            &[
                "Creates an instance from its JSON representation.".to_string(),
                String::new(),
                "@param json the JSON object".to_string(),
            ],
        );
        push_line(code, 1, &format!("public {}({} json) {{", self.simple, json));
        push_line(code, 2, &format!("{}Converter.fromJson(json, this);", self.simple));
        push_line(code, 1, "}");

        if mandatory.is_empty() {
            return;
        }
        let params: Vec<String> = mandatory
            .iter()
            .map(|o| format!("{} {}", o.target_type().to_source(), o.name))
            .collect();
        let tags: Vec<String> = mandatory
            .iter()
            .filter(|o| !o.doc().is_empty())
            .map(|o| format!("@param {} {}", o.name, o.doc()))
            .collect();
        code.push('\n');
        push_javadoc(
            code,
            1,
            &with_tags("Creates an instance from its mandatory values.".to_string(), tags),
        );
        push_line(
            code,
            1,
            &format!("public {}({}) {{", self.simple, params.join(", ")),
        );
        for option in &mandatory {
            push_line(code, 2, &format!("this.{0} = {0};", option.name));
        }
        push_line(code, 1, "}");
    }

    fn from_driver(&self, code: &mut String) {
        code.push('\n');
        push_javadoc(
            code,
            1,
            &[
                "Copies the values of a driver instance.".to_string(),
                String::new(),
                "@param from the driver instance".to_string(),
            ],
        );
        push_line(code, 1, &format!("public {}({} from) {{", self.simple, self.driver));
        for option in &self.shape.options {
            let Some(getter) = &option.getter else {
                continue;
            };
            let call = if getter.time_unit {
                format!("from.{}({})", getter.method, self.implied_unit())
            } else {
                format!("from.{}()", getter.method)
            };
            push_line(
                code,
                2,
                &format!("this.{} = {};", option.name, self.from_driver_value(option, &call)),
            );
        }
        push_line(code, 1, "}");

        code.push('\n');
        push_javadoc(
            code,
            1,
            &[
                "@param from the driver instance, may be null".to_string(),
                "@return the copied values, or null".to_string(),
            ],
        );
        push_line(
            code,
            1,
            &format!(
                "public static {} fromDriverClass({} from) {{",
                self.simple, self.driver
            ),
        );
        push_line(
            code,
            2,
            &format!("return from == null ? null : new {}(from);", self.simple),
        );
        push_line(code, 1, "}");
    }

    fn setter(&self, code: &mut String, option: &OptionField) {
        let target = option.target_type().to_source();
        code.push('\n');
        push_javadoc(
            code,
            1,
            &with_tags(
                option.doc().to_string(),
                vec![
                    format!("@param {} the value to set", option.name),
                    "@return a reference to this, so the API can be used fluently".to_string(),
                ],
            ),
        );
        push_line(
            code,
            1,
            &format!(
                "public {} set{}({} {}) {{",
                self.simple,
                capitalize(&option.name),
                target,
                option.name
            ),
        );
        push_line(code, 2, &format!("this.{0} = {0};", option.name));
        push_line(code, 2, "return this;");
        push_line(code, 1, "}");
    }

    fn getter(&self, code: &mut String, option: &OptionField) {
        let target = option.target_type();
        let prefix = if target.raw_name() == Some("java.lang.Boolean") {
            "is"
        } else {
            "get"
        };
        let doc = if option.getter_doc.is_empty() {
            option.doc().to_string()
        } else {
            option.getter_doc.clone()
        };
        code.push('\n');
        push_javadoc(
            code,
            1,
            &with_tags(doc, vec![format!("@return {}", option.name)]),
        );
        push_line(
            code,
            1,
            &format!(
                "public {} {}{}() {{",
                target.to_source(),
                prefix,
                capitalize(&option.name)
            ),
        );
        push_line(code, 2, &format!("return {};", option.name));
        push_line(code, 1, "}");
    }

    fn to_json(&self, code: &mut String) {
        let json = TypeExpr::named(self.config.json_type.clone()).to_source();
        code.push('\n');
        push_javadoc(code, 1, &["@return the JSON representation".to_string()]);
        push_line(code, 1, &format!("public {} toJson() {{", json));
        push_line(code, 2, &format!("{0} json = new {0}();", json));
        push_line(code, 2, &format!("{}Converter.toJson(this, json);", self.simple));
        push_line(code, 2, "return json;");
        push_line(code, 1, "}");
    }

    /// Rebuild the driver instance: check mandatory values, construct, then
    /// apply every option that was set.
    fn to_driver(&self, code: &mut String) {
        code.push('\n');
        push_javadoc(code, 1, &["@return the driver instance".to_string()]);
        push_line(code, 1, &format!("public {} toDriverClass() {{", self.driver));

        let mandatory: Vec<&OptionField> = self.shape.mandatory().collect();
        for option in &mandatory {
            push_line(code, 2, &format!("if (this.{} == null) {{", option.name));
            push_line(
                code,
                3,
                &format!(
                    "throw new IllegalArgumentException(\"{} is mandatory\");",
                    option.name
                ),
            );
            push_line(code, 2, "}");
        }
        let args: Vec<String> = mandatory
            .iter()
            .map(|o| self.to_driver_value(o, &format!("this.{}", o.name)))
            .collect();

        let (receiver, finish) = match &self.shape.archetype {
            Archetype::StaticBuilder { builder } => {
                push_line(
                    code,
                    2,
                    &format!(
                        "{} builder = {}.builder({});",
                        TypeExpr::named(builder.clone()).to_source(),
                        self.driver,
                        args.join(", ")
                    ),
                );
                ("builder", "builder.build()")
            }
            _ => {
                push_line(
                    code,
                    2,
                    &format!(
                        "{0} result = new {0}({1});",
                        self.driver,
                        args.join(", ")
                    ),
                );
                ("result", "result")
            }
        };

        for option in self.shape.optional() {
            let Some(setter) = &option.setter else {
                continue;
            };
            let value = self.to_driver_value(option, &format!("this.{}", option.name));
            let value = if setter.time_unit {
                format!("{}, {}", value, self.implied_unit())
            } else {
                value
            };
            push_line(code, 2, &format!("if (this.{} != null) {{", option.name));
            push_line(
                code,
                3,
                &format!("{}.{}({});", receiver, setter.method, value),
            );
            push_line(code, 2, "}");
        }
        push_line(code, 2, &format!("return {};", finish));
        push_line(code, 1, "}");
    }

    fn to_driver_value(&self, option: &OptionField, value: &str) -> String {
        match (&option.nested, &option.converter) {
            (Some(_), _) => format!("{}.toDriverClass()", value),
            (None, Some(converter)) => {
                format!("{}.{}({})", self.config.conversion_instance, converter, value)
            }
            (None, None) => value.to_string(),
        }
    }

    fn from_driver_value(&self, option: &OptionField, value: &str) -> String {
        match (&option.nested, &option.converter) {
            (Some(_), _) => format!(
                "{}.fromDriverClass({})",
                option.mapped.target.to_source(),
                value
            ),
            (None, Some(converter)) => {
                format!("{}.{}({})", self.config.conversion_instance, converter, value)
            }
            (None, None) => value.to_string(),
        }
    }

    fn implied_unit(&self) -> String {
        format!(
            "{}.{}",
            self.config.time_unit_type, self.config.implied_time_unit
        )
    }
}
