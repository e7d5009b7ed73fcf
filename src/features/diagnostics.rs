use blend_core::Diagnostic;
use blend_semantic::{SemanticError, SemanticInfo};

/// Turns semantic errors into the diagnostics shown to the user.
#[derive(Debug, Default)]
pub struct DiagnosticProvider;

impl DiagnosticProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn get_diagnostics(&self, info: &SemanticInfo) -> Vec<Diagnostic> {
        info.diagnostics
            .iter()
            .map(|error| self.convert_semantic_error(error))
            .collect()
    }

    fn convert_semantic_error(&self, error: &SemanticError) -> Diagnostic {
        error.suggestions.iter().fold(
            Diagnostic::error(error.location, &error.message).with_code(error.kind.code()),
            |diagnostic, suggestion| diagnostic.with_help(suggestion),
        )
    }
}
