//! Type expressions of the reflected API.
//!
//! The model dump writes types the way the source language spells them
//! (`java.util.List<? extends org.bson.conversions.Bson>`, `long`, `byte[]`).
//! They are parsed once into a small recursive tree so that every later stage
//! matches on structure instead of slicing strings.

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
}

impl Primitive {
    /// Parse a primitive keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(Primitive::Boolean),
            "byte" => Some(Primitive::Byte),
            "short" => Some(Primitive::Short),
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            "char" => Some(Primitive::Char),
            "void" => Some(Primitive::Void),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::Void => "void",
        }
    }

    /// The boxed reference type used wherever a nullable value is needed
    pub fn boxed(&self) -> &'static str {
        match self {
            Primitive::Boolean => "java.lang.Boolean",
            Primitive::Byte => "java.lang.Byte",
            Primitive::Short => "java.lang.Short",
            Primitive::Int => "java.lang.Integer",
            Primitive::Long => "java.lang.Long",
            Primitive::Float => "java.lang.Float",
            Primitive::Double => "java.lang.Double",
            Primitive::Char => "java.lang.Character",
            Primitive::Void => "java.lang.Void",
        }
    }
}

/// Bound of a wildcard type argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<TypeExpr>),
    Super(Box<TypeExpr>),
}

/// A parsed type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    Primitive(Primitive),
    /// A class reference, or a type variable when the name has no package
    Named(String),
    Parameterized { raw: String, args: Vec<TypeExpr> },
    Wildcard(WildcardBound),
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    /// Parse a type expression
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = TypeParser::new(input);
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    /// The class name of a named or parameterized type
    pub fn raw_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name),
            TypeExpr::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[TypeExpr] {
        match self {
            TypeExpr::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Dotless names are type variables (`T`, `TDocument`)
    pub fn is_type_variable(&self) -> bool {
        matches!(self, TypeExpr::Named(name) if !name.contains('.'))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeExpr::Primitive(Primitive::Void))
    }

    /// Collect every class name this type mentions, skipping primitives and type variables
    pub fn class_references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Primitive(_) => {}
            TypeExpr::Named(name) => {
                if name.contains('.') {
                    names.push(name);
                }
            }
            TypeExpr::Parameterized { raw, args } => {
                names.push(raw);
                for arg in args {
                    arg.collect_references(names);
                }
            }
            TypeExpr::Wildcard(WildcardBound::Unbounded) => {}
            TypeExpr::Wildcard(WildcardBound::Extends(bound))
            | TypeExpr::Wildcard(WildcardBound::Super(bound)) => bound.collect_references(names),
            TypeExpr::Array(element) => element.collect_references(names),
        }
    }

    /// Replace every occurrence of the type variable `var`
    pub fn substitute(&self, var: &str, replacement: &TypeExpr) -> TypeExpr {
        match self {
            TypeExpr::Named(name) if name == var => replacement.clone(),
            TypeExpr::Parameterized { raw, args } => TypeExpr::Parameterized {
                raw: raw.clone(),
                args: args.iter().map(|a| a.substitute(var, replacement)).collect(),
            },
            TypeExpr::Wildcard(WildcardBound::Extends(bound)) => TypeExpr::Wildcard(
                WildcardBound::Extends(Box::new(bound.substitute(var, replacement))),
            ),
            TypeExpr::Wildcard(WildcardBound::Super(bound)) => TypeExpr::Wildcard(
                WildcardBound::Super(Box::new(bound.substitute(var, replacement))),
            ),
            TypeExpr::Array(element) => {
                TypeExpr::Array(Box::new(element.substitute(var, replacement)))
            }
            other => other.clone(),
        }
    }

    /// Replace a primitive with its boxed reference type
    pub fn boxed(&self) -> TypeExpr {
        match self {
            TypeExpr::Primitive(p) => TypeExpr::Named(p.boxed().to_string()),
            other => other.clone(),
        }
    }

    /// Render as source text, dropping the implicit `java.lang.` package
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, true);
        out
    }

    /// Render the type erasure (no type arguments)
    pub fn erasure(&self) -> String {
        match self {
            TypeExpr::Primitive(p) => p.keyword().to_string(),
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Parameterized { raw, .. } => raw.clone(),
            TypeExpr::Wildcard(WildcardBound::Extends(bound)) => bound.erasure(),
            TypeExpr::Wildcard(_) => "java.lang.Object".to_string(),
            TypeExpr::Array(element) => format!("{}[]", element.erasure()),
        }
    }

    fn render(&self, out: &mut String, short_lang: bool) {
        match self {
            TypeExpr::Primitive(p) => out.push_str(p.keyword()),
            TypeExpr::Named(name) => out.push_str(display_class_name(name, short_lang)),
            TypeExpr::Parameterized { raw, args } => {
                out.push_str(display_class_name(raw, short_lang));
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.render(out, short_lang);
                }
                out.push('>');
            }
            TypeExpr::Wildcard(WildcardBound::Unbounded) => out.push('?'),
            TypeExpr::Wildcard(WildcardBound::Extends(bound)) => {
                out.push_str("? extends ");
                bound.render(out, short_lang);
            }
            TypeExpr::Wildcard(WildcardBound::Super(bound)) => {
                out.push_str("? super ");
                bound.render(out, short_lang);
            }
            TypeExpr::Array(element) => {
                element.render(out, short_lang);
                out.push_str("[]");
            }
        }
    }
}

fn display_class_name(name: &str, short_lang: bool) -> &str {
    if short_lang {
        if let Some(rest) = name.strip_prefix("java.lang.") {
            if !rest.contains('.') {
                return rest;
            }
        }
    }
    name
}

/// Last segment of a qualified name
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, false);
        f.write_str(&out)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self> {
        TypeExpr::parse(&value)
    }
}

impl From<TypeExpr> for String {
    fn from(value: TypeExpr) -> Self {
        value.to_string()
    }
}

struct TypeParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: &str) -> GenError {
        GenError::TypeParse {
            input: self.input.to_string(),
            message: format!("{} at offset {}", message, self.pos),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        let matches = self.chars[self.pos..]
            .iter()
            .take(len)
            .copied()
            .eq(keyword.chars());
        let boundary = self
            .peek_at(len)
            .map_or(true, |c| !is_identifier_char(c));
        if matches && boundary {
            self.pos += len;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr> {
        self.skip_whitespace();

        if self.eat('?') {
            self.skip_whitespace();
            let bound = if self.eat_keyword("extends") {
                WildcardBound::Extends(Box::new(self.parse_type()?))
            } else if self.eat_keyword("super") {
                WildcardBound::Super(Box::new(self.parse_type()?))
            } else {
                WildcardBound::Unbounded
            };
            return Ok(TypeExpr::Wildcard(bound));
        }

        let name = self.parse_qualified_name()?;
        let mut ty = if let Some(primitive) = Primitive::from_keyword(&name) {
            TypeExpr::Primitive(primitive)
        } else {
            self.skip_whitespace();
            if self.eat('<') {
                let args = self.parse_type_args()?;
                TypeExpr::Parameterized { raw: name, args }
            } else {
                TypeExpr::Named(name)
            }
        };

        loop {
            self.skip_whitespace();
            if self.peek() == Some('[') && self.peek_at(1) == Some(']') {
                self.pos += 2;
                ty = TypeExpr::Array(Box::new(ty));
            } else if self.peek() == Some('.')
                && self.peek_at(1) == Some('.')
                && self.peek_at(2) == Some('.')
            {
                self.pos += 3;
                ty = TypeExpr::Array(Box::new(ty));
            } else {
                break;
            }
        }

        Ok(ty)
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            if self.eat('>') {
                return Ok(args);
            }
            return Err(self.error("expected ',' or '>'"));
        }
    }

    fn parse_qualified_name(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_char(c) {
                self.pos += 1;
            } else if c == '.' && self.peek_at(1).is_some_and(is_identifier_start) {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        if !name.chars().next().is_some_and(is_identifier_start) {
            return Err(self.error("type names cannot start with a digit"));
        }
        Ok(name)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
