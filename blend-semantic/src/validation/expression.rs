use blend_syntax::{Binary, BinaryOp, Call, Expr, Ident, Index, Unary, UnaryOp};

use crate::analysis::function_analyzer::FunctionAnalyzer;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, SemanticError};
use crate::symbol_table::{Symbol, SymbolTable};
use crate::types::Type;
use crate::validation::constant::WORD_MAX;

/// Infers the type of an expression. Call-site validation types its arguments through this.
pub trait TypeInference {
    fn infer_type(&self, expr: &Expr, table: &SymbolTable) -> Result<Type>;
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionAnalyzer<'a> {
    functions: &'a FunctionAnalyzer,
}

impl<'a> ExpressionAnalyzer<'a> {
    pub fn new(functions: &'a FunctionAnalyzer) -> Self {
        Self { functions }
    }

    fn literal_type(value: i64, expr: &Expr) -> Result<Type> {
        match value {
            0..=0xFF => Ok(Type::BYTE),
            0x100..=WORD_MAX => Ok(Type::WORD),
            _ => Err(SemanticError::type_mismatch(
                expr.location(),
                format!("integer literal {value} does not fit in a word"),
            )
            .into()),
        }
    }

    fn resolve_identifier_type(&self, ident: &Ident, table: &SymbolTable) -> Result<Type> {
        match table.lookup_symbol(&ident.name) {
            Some(Symbol::Variable(variable)) => Ok(variable.ty.clone()),
            Some(Symbol::Function(function)) => Ok(Type::Callback(function.signature())),
            None => Err(SemanticError::undefined_symbol(&ident.name, ident.location).into()),
        }
    }

    fn infer_unary(&self, unary: &Unary, table: &SymbolTable) -> Result<Type> {
        let operand = self.infer_type(&unary.expr, table)?;

        match unary.op {
            UnaryOp::Neg | UnaryOp::BitNot if operand.is_numeric() => Ok(operand),
            UnaryOp::Not if operand == Type::BOOLEAN => Ok(Type::BOOLEAN),
            op => Err(SemanticError::type_mismatch(
                unary.location,
                format!("operator '{op}' cannot be applied to '{operand}'"),
            )
            .into()),
        }
    }

    fn infer_binary(&self, binary: &Binary, table: &SymbolTable) -> Result<Type> {
        let mut diagnostics = Diagnostics::new();
        let lhs = diagnostics.absorb(self.infer_type(&binary.lhs, table));
        let rhs = diagnostics.absorb(self.infer_type(&binary.rhs, table));

        let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
            return diagnostics.finish(Type::VOID);
        };

        let checker = self.functions.type_checker();
        let result = match binary.op {
            op if op.is_arithmetic() && lhs.is_numeric() && rhs.is_numeric() => {
                Some(if lhs == Type::WORD || rhs == Type::WORD { Type::WORD } else { Type::BYTE })
            }
            BinaryOp::Eq | BinaryOp::NotEq
                if checker.is_assignment_compatible(&lhs, &rhs)
                    || checker.is_assignment_compatible(&rhs, &lhs) =>
            {
                Some(Type::BOOLEAN)
            }
            op if op.is_comparison() && lhs.is_numeric() && rhs.is_numeric() => Some(Type::BOOLEAN),
            op if op.is_logical() && lhs == Type::BOOLEAN && rhs == Type::BOOLEAN => {
                Some(Type::BOOLEAN)
            }
            _ => None,
        };

        result.ok_or_else(|| {
            SemanticError::type_mismatch(
                binary.location,
                format!("operator '{}' cannot be applied to '{lhs}' and '{rhs}'", binary.op),
            )
            .into()
        })
    }

    fn infer_call(&self, call: &Call, table: &SymbolTable) -> Result<Type> {
        let Some(callee) = call.callee.as_ident() else {
            return Err(SemanticError::invalid_operation(
                call.callee.location(),
                "only named functions and callback variables can be called",
            )
            .into());
        };

        match table.lookup_symbol(&callee.name) {
            Some(Symbol::Function(function)) => self.functions.validate_function_call(
                function,
                &call.args,
                call.location,
                table,
                self,
            ),
            Some(Symbol::Variable(variable)) => self.functions.validate_callback_call(
                variable,
                &call.args,
                call.location,
                table,
                self,
            ),
            None => Err(SemanticError::undefined_symbol(&callee.name, callee.location).into()),
        }
    }

    fn infer_index(&self, index: &Index, table: &SymbolTable) -> Result<Type> {
        let mut diagnostics = Diagnostics::new();
        let target = diagnostics.absorb(self.infer_type(&index.target, table));
        let position = diagnostics.absorb(self.infer_type(&index.index, table));

        if let Some(position) = &position
            && !position.is_numeric()
        {
            diagnostics.push(SemanticError::type_mismatch(
                index.index.location(),
                format!("array index must be a byte or word, found '{position}'"),
            ));
        }

        let element = match target {
            Some(Type::Array(array)) => {
                if let Expr::Number { value, .. } = index.index.as_ref()
                    && *value >= 0
                    && *value as usize >= array.size
                {
                    diagnostics.push(SemanticError::invalid_operation(
                        index.index.location(),
                        format!("index {value} is out of bounds for '{}'", Type::Array(array.clone())),
                    ));
                }
                *array.element
            }
            Some(other) => {
                diagnostics.push(SemanticError::type_mismatch(
                    index.target.location(),
                    format!("cannot index into a value of type '{other}'"),
                ));
                Type::VOID
            }
            None => Type::VOID,
        };

        diagnostics.finish(element)
    }
}

impl TypeInference for ExpressionAnalyzer<'_> {
    fn infer_type(&self, expr: &Expr, table: &SymbolTable) -> Result<Type> {
        match expr {
            Expr::Number { value, .. } => Self::literal_type(*value, expr),
            Expr::Bool { .. } => Ok(Type::BOOLEAN),
            Expr::String { .. } => Ok(Type::STRING),
            Expr::Ident(ident) => self.resolve_identifier_type(ident, table),
            Expr::Unary(unary) => self.infer_unary(unary, table),
            Expr::Binary(binary) => self.infer_binary(binary, table),
            Expr::Call(call) => self.infer_call(call, table),
            Expr::Index(index) => self.infer_index(index, table),
        }
    }
}
