use blend_core::Location;
use serde::Serialize;
use thiserror::Error;

use crate::symbol_table::Symbol;

pub type Result<T, E = SemanticErrors> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    DuplicateSymbol,
    UndefinedSymbol,
    CallbackMismatch,
    TypeMismatch,
    ConstantRequired,
    InvalidOperation,
    InvalidScope,
}

impl ErrorKind {
    /// Stable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::DuplicateSymbol => "E001",
            ErrorKind::UndefinedSymbol => "E002",
            ErrorKind::TypeMismatch => "E003",
            ErrorKind::CallbackMismatch => "E004",
            ErrorKind::ConstantRequired => "E005",
            ErrorKind::InvalidOperation => "E006",
            ErrorKind::InvalidScope => "E007",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DuplicateSymbol => write!(f, "duplicate symbol"),
            ErrorKind::UndefinedSymbol => write!(f, "undefined symbol"),
            ErrorKind::CallbackMismatch => write!(f, "callback mismatch"),
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::ConstantRequired => write!(f, "constant required"),
            ErrorKind::InvalidOperation => write!(f, "invalid operation"),
            ErrorKind::InvalidScope => write!(f, "invalid scope"),
        }
    }
}

/// A single semantic problem found while analyzing one declaration or call site.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct SemanticError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
    /// Advisory text only, never meant to be parsed.
    pub suggestions: Vec<String>,
}

impl SemanticError {
    pub fn new(kind: ErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn duplicate_symbol(name: &str, existing: &Symbol, location: Location) -> Self {
        Self::new(
            ErrorKind::DuplicateSymbol,
            location,
            format!(
                "duplicate symbol '{name}': a {} with this name is already declared in this scope",
                existing.kind()
            ),
        )
        .with_suggestion(format!("previous declaration at {}", existing.location()))
    }

    pub fn undefined_symbol(name: &str, location: Location) -> Self {
        Self::new(
            ErrorKind::UndefinedSymbol,
            location,
            format!("reference to undefined identifier '{name}'"),
        )
    }

    pub fn type_mismatch(location: Location, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, location, message)
    }

    pub fn callback_mismatch(location: Location, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CallbackMismatch, location, message)
    }

    pub fn invalid_operation(location: Location, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperation, location, message)
    }
}

/// The non-empty list of errors a failing operation reports.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}", join_messages(.0))]
pub struct SemanticErrors(Vec<SemanticError>);

fn join_messages(errors: &[SemanticError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SemanticErrors {
    /// Returns `None` for an empty list, a failure always carries at least one error.
    pub fn from_vec(errors: Vec<SemanticError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self(errors))
    }

    pub fn first(&self) -> &SemanticError {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SemanticError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SemanticError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<SemanticError> {
        self.0
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.0.iter().map(|error| error.kind).collect()
    }

    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|error| error.kind == kind)
    }
}

impl From<SemanticError> for SemanticErrors {
    fn from(error: SemanticError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for SemanticErrors {
    type Item = SemanticError;
    type IntoIter = std::vec::IntoIter<SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SemanticErrors {
    type Item = &'a SemanticError;
    type IntoIter = std::slice::Iter<'a, SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
