//! Code emitters.
//!
//! Each emitter turns one classified source class into a Java compilation
//! unit of the target API. Emitters never guess: a member that does not fit
//! the recognized shapes aborts generation.

mod conversion;
mod enums;
mod options;
mod reactive;

pub use conversion::emit_conversions;
pub use enums::emit_enum;
pub use options::emit_options;
pub use reactive::emit_reactive_api;

use crate::type_expr::simple_name;
use serde::Serialize;
use std::path::PathBuf;

/// Indentation unit of the generated sources
const INDENT: &str = "    ";

/// What kind of target class a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputCategory {
    ReactiveApi,
    Options,
    Enum,
    Conversion,
}

/// A generated Java compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub qualified_name: String,
    pub category: OutputCategory,
    pub source: String,
}

impl JavaFile {
    pub fn package(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    /// Path of the file below the output root: `io/vertx/Foo.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package()
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.simple_name()));
        path
    }
}

fn push_package(code: &mut String, package: &str) {
    if !package.is_empty() {
        code.push_str(&format!("package {};\n\n", package));
    }
}

/// Write a `/** ... */` block at the given nesting depth; blank entries
/// become paragraph breaks and an all-blank block is skipped.
fn push_javadoc(code: &mut String, depth: usize, lines: &[String]) {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return;
    }
    let indent = INDENT.repeat(depth);
    code.push_str(&format!("{}/**\n", indent));
    for line in lines {
        if line.trim().is_empty() {
            code.push_str(&format!("{} *\n", indent));
        } else {
            code.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    code.push_str(&format!("{} */\n", indent));
}

/// Javadoc lines: the description, a blank line, then the block tags
fn with_tags(description: String, tags: Vec<String>) -> Vec<String> {
    if description.is_empty() {
        return tags;
    }
    let mut lines = vec![description];
    if !tags.is_empty() {
        lines.push(String::new());
        lines.extend(tags);
    }
    lines
}

/// Append a line at the given nesting depth
fn push_line(code: &mut String, depth: usize, line: &str) {
    code.push_str(&INDENT.repeat(depth));
    code.push_str(line);
    code.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_relative_path_follows_package() {
        let file = JavaFile {
            qualified_name: "io.vertx.mongo.client.MongoCollection".to_string(),
            category: OutputCategory::ReactiveApi,
            source: String::new(),
        };
        assert_eq!(file.package(), "io.vertx.mongo.client");
        assert_eq!(file.simple_name(), "MongoCollection");
        assert_eq!(
            file.relative_path(),
            Path::new("io/vertx/mongo/client/MongoCollection.java")
        );
    }

    #[test]
    fn test_javadoc_block() {
        let mut code = String::new();
        push_javadoc(
            &mut code,
            1,
            &["Summary.".to_string(), String::new(), "@return this".to_string()],
        );
        assert_eq!(
            code,
            "    /**\n     * Summary.\n     *\n     * @return this\n     */\n"
        );

        let mut empty = String::new();
        push_javadoc(&mut empty, 0, &[String::new()]);
        assert!(empty.is_empty());
    }
}
