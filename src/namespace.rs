//! Source-to-target namespace rewriting.
//!
//! Rewritten classes keep their simple name and move from a source package
//! to a target package. Implementation classes additionally land in an
//! `impl` sub-package.

use crate::config::NamespaceRule;
use crate::error::{GenError, Result};
use crate::model::ClassDescriptor;
use crate::type_expr::simple_name;

#[derive(Debug)]
pub struct NamespaceMapper<'a> {
    rules: &'a [NamespaceRule],
}

impl<'a> NamespaceMapper<'a> {
    pub fn new(rules: &'a [NamespaceRule]) -> Self {
        Self { rules }
    }

    /// Rewrite a package, the longest matching `from` prefix winning
    pub fn target_package(&self, class: &str, package: &str) -> Result<String> {
        self.rules
            .iter()
            .filter(|rule| {
                package == rule.from
                    || package
                        .strip_prefix(rule.from.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(|rule| rule.from.len())
            .map(|rule| format!("{}{}", rule.to, &package[rule.from.len()..]))
            .ok_or_else(|| GenError::NamespaceNotMapped {
                class: class.to_string(),
                package: package.to_string(),
            })
    }

    /// Qualified target name of a rewritten class
    pub fn target_name(&self, class: &ClassDescriptor, implementation: bool) -> Result<String> {
        let mut package = self.target_package(&class.name, &class.package())?;
        if implementation {
            package.push_str(".impl");
        }
        Ok(format!("{}.{}", package, simple_name(class.relative_name())))
    }
}
