//! Conversion utility emitter.

use super::{push_javadoc, push_line, push_package, JavaFile, OutputCategory};
use crate::config::GeneratorConfig;
use crate::conversions::ConversionRegistry;
use crate::type_expr::simple_name;

/// Emit the interface declaring one converter per registered pair
pub fn emit_conversions(registry: &ConversionRegistry, config: &GeneratorConfig) -> JavaFile {
    let qualified_name = config.conversion_class.clone();
    let mut code = String::new();
    push_package(
        &mut code,
        qualified_name.rsplit_once('.').map_or("", |(package, _)| package),
    );
    push_javadoc(
        &mut code,
        0,
        &["Conversions between driver types and their target API counterparts.".to_string()],
    );
    code.push_str(&format!(
        "public interface {} {{\n",
        simple_name(&qualified_name)
    ));
    for conversion in registry.conversions() {
        code.push('\n');
        push_line(
            &mut code,
            1,
            &format!(
                "{} {}({} from);",
                conversion.to.to_source(),
                conversion.name,
                conversion.from.to_source()
            ),
        );
    }
    code.push_str("}\n");

    JavaFile {
        qualified_name,
        category: OutputCategory::Conversion,
        source: code,
    }
}
