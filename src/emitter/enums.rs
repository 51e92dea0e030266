//! Enum passthrough emitter.

use super::{push_javadoc, push_line, push_package, JavaFile, OutputCategory};
use crate::error::{GenError, Result};
use crate::javadoc;
use crate::model::ClassDescriptor;
use crate::type_expr::simple_name;
use crate::type_mapper::TypeMapper;

/// Emit a target enum with the same constants and conversions by name
pub fn emit_enum(class: &ClassDescriptor, mapper: &TypeMapper) -> Result<JavaFile> {
    if class.enum_constants.is_empty() {
        return Err(GenError::shape(&class.name, "enum without constants"));
    }
    let qualified_name = mapper.target_class_name(&class.name)?;
    let simple = simple_name(&qualified_name);
    let driver = class.self_type().to_source();

    let mut code = String::new();
    push_package(
        &mut code,
        qualified_name.rsplit_once('.').map_or("", |(package, _)| package),
    );
    push_javadoc(&mut code, 0, &[javadoc::description(&class.doc)]);
    code.push_str(&format!("public enum {} {{\n", simple));

    let last = class.enum_constants.len() - 1;
    for (i, constant) in class.enum_constants.iter().enumerate() {
        let separator = if i == last { ";" } else { "," };
        push_line(&mut code, 1, &format!("{}{}", constant, separator));
    }

    code.push('\n');
    push_javadoc(&mut code, 1, &["@return the driver constant".to_string()]);
    push_line(&mut code, 1, &format!("public {} toDriverClass() {{", driver));
    push_line(&mut code, 2, &format!("return {}.valueOf(name());", driver));
    push_line(&mut code, 1, "}");

    code.push('\n');
    push_javadoc(
        &mut code,
        1,
        &[
            "@param from the driver constant, may be null".to_string(),
            "@return the matching constant, or null".to_string(),
        ],
    );
    push_line(
        &mut code,
        1,
        &format!("public static {} fromDriverClass({} from) {{", simple, driver),
    );
    push_line(
        &mut code,
        2,
        &format!("return from == null ? null : {}.valueOf(from.name());", simple),
    );
    push_line(&mut code, 1, "}");
    code.push_str("}\n");

    Ok(JavaFile {
        qualified_name,
        category: OutputCategory::Enum,
        source: code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enum_passthrough() {
        let model = test_support::model(
            r#"
- name: com.example.ValidationLevel
  kind: enum
  doc: "Determines how strictly to apply validation rules."
  enum_constants: [OFF, STRICT, MODERATE]
"#,
        );
        let config = test_support::config(&["com.example.ValidationLevel"]);
        let surface = test_support::surface(&model, &config);
        let mapper = TypeMapper::new(&model, &config, &surface).unwrap();

        let file = emit_enum(model.get("com.example.ValidationLevel").unwrap(), &mapper).unwrap();

        assert_eq!(file.category, OutputCategory::Enum);
        let expected = r#"package io.vertx.example;

/**
 * Determines how strictly to apply validation rules.
 */
public enum ValidationLevel {
    OFF,
    STRICT,
    MODERATE;

    /**
     * @return the driver constant
     */
    public com.example.ValidationLevel toDriverClass() {
        return com.example.ValidationLevel.valueOf(name());
    }

    /**
     * @param from the driver constant, may be null
     * @return the matching constant, or null
     */
    public static ValidationLevel fromDriverClass(com.example.ValidationLevel from) {
        return from == null ? null : ValidationLevel.valueOf(from.name());
    }
}
"#;
        assert_eq!(file.source, expected);
    }

    #[test]
    fn test_enum_without_constants_is_rejected() {
        let model = test_support::model("- name: com.example.Empty\n  kind: enum\n");
        let config = test_support::config(&["com.example.Empty"]);
        let surface = test_support::surface(&model, &config);
        let mapper = TypeMapper::new(&model, &config, &surface).unwrap();

        assert!(matches!(
            emit_enum(model.get("com.example.Empty").unwrap(), &mapper),
            Err(GenError::UnsupportedShape { .. })
        ));
    }
}
