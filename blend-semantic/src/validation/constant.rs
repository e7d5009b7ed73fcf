use blend_core::Location;
use blend_syntax::{Binary, BinaryOp, Expr, Ident, UnaryOp};

use crate::error::{ErrorKind, SemanticError};
use crate::symbol_table::{Symbol, SymbolTable, VariableSymbol};

pub const WORD_MAX: i64 = 0xFFFF;

/// Folds integer expressions known at compile time: literals, `const` variables and arithmetic
/// over them.
#[derive(Debug)]
pub struct ConstantEvaluator<'a> {
    table: &'a SymbolTable,
}

fn not_constant(location: Location, message: impl Into<String>) -> SemanticError {
    SemanticError::new(ErrorKind::ConstantRequired, location, message)
}

impl<'a> ConstantEvaluator<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<i64, SemanticError> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Ident(ident) => self.resolve_constant(ident),
            Expr::Unary(unary) => {
                let value = self.evaluate(&unary.expr)?;
                match unary.op {
                    UnaryOp::Neg => value.checked_neg().ok_or_else(|| {
                        SemanticError::invalid_operation(unary.location, "constant expression overflows")
                    }),
                    UnaryOp::BitNot => Ok(!value & WORD_MAX),
                    UnaryOp::Not => Err(not_constant(
                        unary.location,
                        "operator '!' does not produce an integer constant",
                    )),
                }
            }
            Expr::Binary(binary) => self.evaluate_binary(binary),
            other => Err(not_constant(
                other.location(),
                "expected an integer constant expression",
            )),
        }
    }

    fn evaluate_binary(&self, binary: &Binary) -> Result<i64, SemanticError> {
        let location = binary.location;
        if !binary.op.is_arithmetic() {
            return Err(not_constant(
                location,
                format!("operator '{}' does not produce an integer constant", binary.op),
            ));
        }

        let lhs = self.evaluate(&binary.lhs)?;
        let rhs = self.evaluate(&binary.rhs)?;

        if matches!(binary.op, BinaryOp::Div | BinaryOp::Mod) && rhs == 0 {
            return Err(SemanticError::invalid_operation(
                location,
                "division by zero in constant expression",
            ));
        }

        let value = match binary.op {
            BinaryOp::Add => lhs.checked_add(rhs),
            BinaryOp::Sub => lhs.checked_sub(rhs),
            BinaryOp::Mul => lhs.checked_mul(rhs),
            BinaryOp::Div => lhs.checked_div(rhs),
            BinaryOp::Mod => lhs.checked_rem(rhs),
            BinaryOp::BitAnd => Some(lhs & rhs),
            BinaryOp::BitOr => Some(lhs | rhs),
            BinaryOp::BitXor => Some(lhs ^ rhs),
            BinaryOp::Shl => u32::try_from(rhs).ok().and_then(|shift| lhs.checked_shl(shift)),
            BinaryOp::Shr => u32::try_from(rhs).ok().and_then(|shift| lhs.checked_shr(shift)),
            _ => None,
        };

        value.ok_or_else(|| SemanticError::invalid_operation(location, "constant expression overflows"))
    }

    fn resolve_constant(&self, ident: &Ident) -> Result<i64, SemanticError> {
        match self.table.lookup_symbol(&ident.name) {
            Some(Symbol::Variable(VariableSymbol {
                constant_value: Some(value),
                ..
            })) => Ok(*value),
            Some(symbol) => Err(not_constant(
                ident.location,
                format!(
                    "{} '{}' is not a compile-time constant",
                    symbol.kind(),
                    ident.name
                ),
            )
            .with_suggestion("declare it with `const` and a constant initializer")),
            None => Err(SemanticError::undefined_symbol(&ident.name, ident.location)),
        }
    }
}
