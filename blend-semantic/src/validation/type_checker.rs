use blend_core::Location;
use blend_syntax::{Expr, TypeAnnotation};

use crate::diagnostics::Diagnostics;
use crate::error::{ErrorKind, Result, SemanticError};
use crate::symbol_table::SymbolTable;
use crate::types::{CallbackType, PrimitiveType, Type};
use crate::validation::constant::{ConstantEvaluator, WORD_MAX};

/// Resolves annotations into types and decides whether one type may be stored into another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeChecker {
    callback_widening: bool,
}

impl TypeChecker {
    pub fn new(callback_widening: bool) -> Self {
        Self { callback_widening }
    }

    pub fn is_assignment_compatible(&self, target: &Type, source: &Type) -> bool {
        if target == source {
            return true;
        }

        match (target, source) {
            (Type::Primitive(target), Type::Primitive(source)) => source.widens_to(*target),
            // arrays are laid out element by element, so a byte[4] is never a word[4]
            (Type::Array(target), Type::Array(source)) => {
                target.size == source.size && target.element == source.element
            }
            (Type::Callback(target), Type::Callback(source)) => {
                self.is_callback_compatible(target, source)
            }
            _ => false,
        }
    }

    /// `target` is the slot being filled, `source` the signature of the function stored in it.
    pub fn is_callback_compatible(&self, target: &CallbackType, source: &CallbackType) -> bool {
        target.arity() == source.arity()
            && target
                .params
                .iter()
                .zip(&source.params)
                .all(|(expected, declared)| self.callback_param_matches(expected, declared))
            && target.return_type == source.return_type
    }

    fn callback_param_matches(&self, expected: &Type, declared: &Type) -> bool {
        match (expected, declared) {
            (Type::Primitive(expected), Type::Primitive(declared)) if self.callback_widening => {
                expected.widens_to(*declared)
            }
            _ => expected == declared,
        }
    }

    pub fn resolve_type(&self, annotation: &TypeAnnotation, table: &SymbolTable) -> Result<Type> {
        match annotation {
            TypeAnnotation::Named(ident) => PrimitiveType::from_name(&ident.name)
                .map(Type::Primitive)
                .ok_or_else(|| {
                    SemanticError::new(
                        ErrorKind::UndefinedSymbol,
                        ident.location,
                        format!("unknown type '{}'", ident.name),
                    )
                    .with_suggestion("expected one of byte, word, boolean, void, string")
                    .into()
                }),
            TypeAnnotation::Array {
                element,
                size,
                location,
            } => {
                let element = self.resolve_type(element, table)?;
                self.validate_array_type(element, size, table, *location)
            }
            TypeAnnotation::Callback {
                params,
                return_type,
                ..
            } => {
                let mut diagnostics = Diagnostics::new();
                let params = params
                    .iter()
                    .filter_map(|param| diagnostics.absorb(self.resolve_type(param, table)))
                    .collect();
                let return_type = match return_type {
                    Some(return_type) => diagnostics
                        .absorb(self.resolve_type(return_type, table))
                        .unwrap_or(Type::VOID),
                    None => Type::VOID,
                };

                diagnostics.finish(Type::callback(params, return_type))
            }
        }
    }

    /// Builds `element[size]`, where `size` must fold to a constant in `0..=0xFFFF`.
    pub fn validate_array_type(
        &self,
        element: Type,
        size: &Expr,
        table: &SymbolTable,
        location: Location,
    ) -> Result<Type> {
        if element.is_void() {
            return Err(SemanticError::invalid_operation(location, "arrays of void are not allowed").into());
        }

        let size = ConstantEvaluator::new(table).evaluate(size)?;

        if size < 0 {
            return Err(SemanticError::invalid_operation(
                location,
                format!("array size cannot be negative, got {size}"),
            )
            .into());
        }

        if size > WORD_MAX {
            return Err(SemanticError::invalid_operation(
                location,
                format!("array size {size} does not fit in the 16-bit address space"),
            )
            .into());
        }

        Ok(Type::array(element, size as usize))
    }
}
