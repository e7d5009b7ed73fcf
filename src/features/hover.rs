use blend_core::Location;
use blend_semantic::{FunctionSymbol, SemanticInfo, Symbol, VariableSymbol};
use blend_syntax::{NodeFinder, Program};

#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub contents: String,
    pub location: Location,
}

/// Describes the symbol named at a byte offset.
#[derive(Debug, Default)]
pub struct HoverProvider;

impl HoverProvider {
    pub fn new() -> Self {
        Self
    }

    /// Only names visible at the top level of the program resolve here, which covers every
    /// function and global since functions cannot nest.
    pub fn hover(&self, program: &Program, info: &SemanticInfo, byte_offset: usize) -> Option<Hover> {
        let mut finder = NodeFinder::new(byte_offset);
        program.accept(&mut finder);
        let ident = finder.result?;

        let symbol = info
            .symbol_table
            .lookup_symbol_from(&ident.name, info.top_level_scope())?;

        Some(Hover {
            contents: self.describe(symbol),
            location: ident.location,
        })
    }

    fn describe(&self, symbol: &Symbol) -> String {
        match symbol {
            Symbol::Function(function) => self.describe_function(function),
            Symbol::Variable(variable) => self.describe_variable(variable),
        }
    }

    fn describe_function(&self, function: &FunctionSymbol) -> String {
        let params = function
            .params
            .iter()
            .map(|param| {
                let marker = if param.optional { "?" } else { "" };
                format!("{}{marker}: {}", param.name, param.ty)
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut signature = String::new();
        if function.is_exported {
            signature.push_str("export ");
        }
        if function.is_callback {
            signature.push_str("callback ");
        }
        signature.push_str(&format!("function {}({params}): {}", function.name, function.return_type));
        signature
    }

    fn describe_variable(&self, variable: &VariableSymbol) -> String {
        let keyword = if variable.is_const { "const" } else { "let" };
        let mut text = format!("{keyword} {}: {}", variable.name, variable.ty);

        if let Some(storage) = variable.storage {
            text.push_str(&format!(" {storage}"));
        }
        if let Some(value) = variable.constant_value {
            text.push_str(&format!(" = {value}"));
        }
        text
    }
}
