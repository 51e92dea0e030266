use thiserror::Error;

/// Result type alias for generation steps
pub type Result<T> = std::result::Result<T, GenError>;

/// Fatal generation errors.
///
/// Every variant aborts the run. There is no soft failure path: a type or
/// shape the generator does not recognize is reported, never guessed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A reachable class lives in a package that is neither allow-listed nor excluded
    #[error("class {class} is in package {package}, which is not an allowed API package")]
    UnauthorizedPackage { class: String, package: String },

    /// An allow-listed class was referenced but the model has no descriptor for it
    #[error("class {0} is referenced but missing from the API model")]
    ClassNotFound(String),

    /// Two model files describe the same class
    #[error("class {0} is described more than once in the API model")]
    DuplicateClass(String),

    /// A constructor-only config class declares more than one constructor
    #[error("class {class} declares {count} constructors, constructor-only configs need exactly one")]
    MultipleConstructors { class: String, count: usize },

    /// A setter has no getter to pair with
    #[error("setter {option} of {class} has no matching getter")]
    MissingGetter { class: String, option: String },

    /// Two setters collapse into the same option name
    #[error("option {option} is declared twice in {class}")]
    DuplicateOption { class: String, option: String },

    /// A member or class does not fit any recognized archetype
    #[error("unsupported shape in {class}: {reason}")]
    UnsupportedShape { class: String, reason: String },

    /// A type resolves against no mapping rule
    #[error("type {ty} (used by {site}) cannot be mapped to the target API")]
    UnmappableType { ty: String, site: String },

    /// A publisher-returning method has no @return documentation
    #[error("method {0} returns a publisher but has no @return documentation")]
    MissingReturnDoc(String),

    /// The @return text gives no clue about the result arity
    #[error("cannot tell whether {method} yields one or many results from: \"{text}\"")]
    AmbiguousArity { method: String, text: String },

    /// A class has to be rewritten but no namespace rule covers its package
    #[error("no namespace rewrite covers package {package} (class {class})")]
    NamespaceNotMapped { class: String, package: String },

    /// Two rewritten classes end up with the same target class name
    #[error("classes {first} and {second} both map to the target class {target}")]
    TargetNameClash {
        target: String,
        first: String,
        second: String,
    },

    /// A type expression in the model could not be parsed
    #[error("invalid type expression \"{input}\": {message}")]
    TypeParse { input: String, message: String },

    /// The generator configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenError {
    pub fn unmappable(ty: impl ToString, site: impl Into<String>) -> Self {
        GenError::UnmappableType {
            ty: ty.to_string(),
            site: site.into(),
        }
    }

    pub fn shape(class: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::UnsupportedShape {
            class: class.into(),
            reason: reason.into(),
        }
    }
}
