use blend_core::Location;

use crate::error::{ErrorKind, Result, SemanticError, SemanticErrors};

/// Collects independent errors while one declaration or call site is validated.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<SemanticError>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn items(self) -> Vec<SemanticError> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, error: SemanticError) {
        self.0.push(error);
    }

    pub fn error(&mut self, kind: ErrorKind, location: Location, message: impl Into<String>) {
        self.push(SemanticError::new(kind, location, message));
    }

    pub fn extend(&mut self, errors: SemanticErrors) {
        self.0.extend(errors);
    }

    /// Records the errors of a failed result and hands back the value of a successful one.
    pub fn absorb<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.extend(errors);
                None
            }
        }
    }

    /// Succeeds with `value` only when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T> {
        match SemanticErrors::from_vec(self.0) {
            Some(errors) => Err(errors),
            None => Ok(value),
        }
    }
}
