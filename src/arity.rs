//! Single-versus-multi result inference for publisher-returning methods.
//!
//! The source API does not encode in its types whether a publisher emits
//! one element or many; only the documented `@return` sentence says so.
//! This module is the one place that reads that sentence. An override
//! table in the configuration takes precedence, and anything the phrases
//! below cannot decide is an error rather than a guess.

use crate::config::{ArityOverride, GeneratorConfig};
use crate::error::{GenError, Result};
use crate::javadoc;
use crate::model::{ClassDescriptor, MethodDescriptor};
use log::debug;

/// Result arity of an asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value, or plain completion
    Single,
    /// A sequence of values
    Multi,
}

impl From<ArityOverride> for Arity {
    fn from(value: ArityOverride) -> Self {
        match value {
            ArityOverride::Single => Arity::Single,
            ArityOverride::Multi => Arity::Multi,
        }
    }
}

const SINGLE_PHRASES: &[&str] = &["single element", "empty publisher", "empty sequence"];

const MULTI_PHRASES: &[&str] = &["publisher", "iterable", "sequence", "stream"];

/// Decide the arity of a publisher-returning method
pub fn resolve_arity(
    config: &GeneratorConfig,
    class: &ClassDescriptor,
    method: &MethodDescriptor,
) -> Result<Arity> {
    let signature = method.signature();
    if let Some(forced) = config.arity_override(&class.name, &signature) {
        debug!("Arity of {}#{} forced to {:?}", class.name, signature, forced);
        return Ok(forced.into());
    }
    infer_arity(&format!("{}#{}", class.name, signature), &method.doc)
}

/// Read the arity off a method's `@return` documentation
pub fn infer_arity(method_id: &str, doc: &str) -> Result<Arity> {
    let text = javadoc::return_text(doc)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GenError::MissingReturnDoc(method_id.to_string()))?;
    let lowered = text.to_lowercase();

    if SINGLE_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return Ok(Arity::Single);
    }
    if MULTI_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return Ok(Arity::Multi);
    }
    Err(GenError::AmbiguousArity {
        method: method_id.to_string(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_phrase() {
        let doc = "Counts.\n@return a publisher with a single element indicating the count";
        assert_eq!(infer_arity("Svc#count()", doc).unwrap(), Arity::Single);
    }

    #[test]
    fn test_empty_publisher_is_single() {
        let doc = "@return an empty publisher that indicates when the operation has completed";
        assert_eq!(infer_arity("Svc#drop()", doc).unwrap(), Arity::Single);
    }

    #[test]
    fn test_plain_publisher_is_multi() {
        let doc = "Finds.\n@return the fluent find publisher interface";
        assert_eq!(infer_arity("Svc#find()", doc).unwrap(), Arity::Multi);
    }

    #[test]
    fn test_case_insensitive() {
        let doc = "@return A Publisher containing a Single Element";
        assert_eq!(infer_arity("Svc#one()", doc).unwrap(), Arity::Single);
    }

    #[test]
    fn test_missing_return_doc_fails() {
        let err = infer_arity("Svc#find()", "Finds things.").unwrap_err();
        assert_eq!(err, GenError::MissingReturnDoc("Svc#find()".to_string()));

        let err = infer_arity("Svc#find()", "@return").unwrap_err();
        assert!(matches!(err, GenError::MissingReturnDoc(_)));
    }

    #[test]
    fn test_unrecognized_text_fails() {
        let err = infer_arity("Svc#find()", "@return the results").unwrap_err();
        assert_eq!(
            err,
            GenError::AmbiguousArity {
                method: "Svc#find()".to_string(),
                text: "the results".to_string(),
            }
        );
    }

    #[test]
    fn test_override_wins_over_doc() {
        let class: ClassDescriptor =
            serde_yaml::from_str("name: com.example.Svc\nkind: interface\n").unwrap();
        let method: MethodDescriptor = serde_yaml::from_str(
            "name: watch\nreturn_type: org.reactivestreams.Publisher<java.lang.Long>\n",
        )
        .unwrap();
        let mut config = GeneratorConfig::default();
        config
            .arity_overrides
            .insert("com.example.Svc#watch()".to_string(), ArityOverride::Multi);

        assert_eq!(resolve_arity(&config, &class, &method).unwrap(), Arity::Multi);

        config.arity_overrides.clear();
        assert!(matches!(
            resolve_arity(&config, &class, &method),
            Err(GenError::MissingReturnDoc(_))
        ));
    }
}
