//! Data model for scraped bindings, independent of how pages are rendered.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One configured binding source file.
#[derive(Debug, Clone)]
pub struct SourceTarget {
    /// Path relative to the source root.
    pub path: PathBuf,
    /// Declared scope, e.g. `Client` or `General`.
    pub scope: String,
    /// Receiver prefix override; falls back to the lowercased scope.
    pub replace: Option<String>,
}

impl SourceTarget {
    pub fn new(path: &str, scope: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            scope: scope.to_string(),
            replace: None,
        }
    }

    pub fn with_replace(mut self, replace: &str) -> Self {
        self.replace = Some(replace.to_string());
        self
    }

    /// Receiver prefix used when deriving objects for this target.
    pub fn replace_token(&self) -> String {
        match self.replace.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => self.scope.to_lowercase(),
        }
    }
}

/// The fixed set of semantic types the scraper can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Uint,
    Long,
    UnsignedLong,
    Float,
    Double,
    String,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Uint => "uint",
            ValueType::Long => "long",
            ValueType::UnsignedLong => "unsigned long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an optional type the way pages show it: empty when unknown.
pub fn type_name(ty: Option<ValueType>) -> &'static str {
    ty.map_or("", ValueType::as_str)
}

/// A single argument recovered from a usage string.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    /// `None` until a known-name lookup or a declaration on a later line resolves it.
    pub ty: Option<ValueType>,
    /// Written in brackets in the usage string, e.g. `[language_id]`.
    pub optional: bool,
}

/// A bound function reconstructed from the source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionRecord {
    /// Receiver expression placed before the function in examples, e.g. `$client->`.
    pub object: String,
    /// Bare function name once normalized, raw usage name before that.
    pub function: String,
    pub scope: String,
    /// `None` means the function returns nothing (`void`).
    pub returns: Option<ValueType>,
    pub arguments: Vec<Argument>,
}

impl FunctionRecord {
    pub fn new(function: &str) -> Self {
        Self {
            function: function.to_string(),
            ..Default::default()
        }
    }

    /// Return type as shown on pages; defaults to `void`.
    pub fn return_name(&self) -> &'static str {
        self.returns.map_or("void", ValueType::as_str)
    }

    /// Arguments a script caller actually passes (the receiver `THIS` is implicit).
    pub fn call_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.name.trim() != "THIS")
    }
}

/// A variable exported to an event handler.
#[derive(Debug, Clone, PartialEq)]
pub struct EventExport {
    pub name: String,
    pub ty: Option<ValueType>,
}

/// A script event and the variables exported to its handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub name: String,
    pub exports: Vec<EventExport>,
}

/// One occurrence of an argument name, kept for the per-file type report.
#[derive(Debug, Clone)]
pub struct ArgumentUse {
    pub function: String,
    pub ty: Option<ValueType>,
}

// -- Manifest catalog ---------------------------------------------------------

/// Root of the sample manifest: scopes in first-seen order.
#[derive(Debug, Default, Serialize)]
pub struct Catalog {
    pub scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Serialize)]
pub struct ScopeEntry {
    pub name: String,
    pub functions: Vec<FunctionEntry>,
}

/// Generated documentation for one (scope, function) pair.
#[derive(Debug, Serialize)]
pub struct FunctionEntry {
    pub name: String,
    pub summary: String,
    pub example: String,
    /// Markdown argument table, empty when the function takes no arguments.
    pub argument: String,
}

impl Catalog {
    pub fn scope_mut(&mut self, name: &str) -> &mut ScopeEntry {
        let idx = match self.scopes.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.scopes.push(ScopeEntry {
                    name: name.to_string(),
                    functions: Vec::new(),
                });
                self.scopes.len() - 1
            }
        };
        &mut self.scopes[idx]
    }
}

impl ScopeEntry {
    pub fn contains(&self, function: &str) -> bool {
        self.functions.iter().any(|f| f.name == function)
    }
}
