use blend_core::Location;
use blend_syntax::{Expr, StorageClass};
use serde::Serialize;

use crate::error::{ErrorKind, SemanticError};
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::types::{CallbackType, Type};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Symbol {
    Variable(VariableSymbol),
    Function(FunctionSymbol),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Function => write!(f, "function"),
        }
    }
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(variable) => &variable.name,
            Symbol::Function(function) => &function.name,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Variable(_) => SymbolKind::Variable,
            Symbol::Function(_) => SymbolKind::Function,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Symbol::Variable(variable) => variable.location,
            Symbol::Function(function) => function.location,
        }
    }

    pub fn scope(&self) -> ScopeId {
        match self {
            Symbol::Variable(variable) => variable.scope,
            Symbol::Function(function) => function.scope,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableSymbol> {
        match self {
            Symbol::Variable(variable) => Some(variable),
            Symbol::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self {
            Symbol::Function(function) => Some(function),
            Symbol::Variable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: Type,
    pub scope: ScopeId,
    pub location: Location,
    /// Placement hint for the allocator, not interpreted here.
    pub storage: Option<StorageClass>,
    pub is_const: bool,
    /// Folded initializer of a `const` integer, when it is a compile-time constant.
    pub constant_value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub default_value: Option<Expr>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub params: Vec<ParameterSymbol>,
    pub return_type: Type,
    pub scope: ScopeId,
    pub location: Location,
    pub is_callback: bool,
    pub is_exported: bool,
}

impl FunctionSymbol {
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|param| !param.optional).count()
    }

    /// The function's shape as a callback type, used when its name is taken as a value.
    pub fn signature(&self) -> CallbackType {
        CallbackType::new(
            self.params.iter().map(|param| param.ty.clone()).collect(),
            self.return_type.clone(),
        )
    }
}

/// Arena of scopes rooted at the global scope, with a cursor on the scope being analyzed.
///
/// Scopes are never removed: once closed they stay in the arena so later stages can resolve
/// names against the whole tree.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current_scope: ScopeId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeId::ROOT, ScopeKind::Global, None)],
            current_scope: ScopeId::ROOT,
        }
    }

    /// Opens a child of the current scope and makes it current.
    pub fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current_scope;
        let scope_id = ScopeId::new(self.scopes.len());

        self.scopes.push(Scope::new(scope_id, kind, Some(parent)));
        self.scopes[parent.index()].add_child(scope_id);
        self.current_scope = scope_id;

        tracing::debug!(?scope_id, ?parent, %kind, "entered scope");
        scope_id
    }

    /// Closes the current scope and returns its id.
    ///
    /// # Panics
    ///
    /// Closing the global scope is a driver bug and panics.
    pub fn pop_scope(&mut self) -> ScopeId {
        let closed = self.current_scope;
        let Some(parent) = self.current().parent() else {
            panic!("attempted to close the global scope");
        };

        self.current_scope = parent;
        tracing::debug!(scope_id = ?closed, "left scope");
        closed
    }

    /// Runs `f` inside a fresh child scope that is closed again however `f` returns.
    pub fn with_scope<R>(&mut self, kind: ScopeKind, f: impl FnOnce(&mut Self) -> R) -> R {
        let scope = self.push_scope(kind);
        let result = f(self);
        self.close_scope(scope);
        result
    }

    /// Closes `scope`, which must be current.
    ///
    /// # Panics
    ///
    /// Panics when scopes opened inside `scope` were left open.
    pub fn close_scope(&mut self, scope: ScopeId) {
        assert_eq!(
            self.current_scope, scope,
            "scope {scope:?} closed while {:?} is still open",
            self.current_scope
        );
        self.pop_scope();
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current_scope.index()]
    }

    pub fn root(&self) -> &Scope {
        &self.scopes[ScopeId::ROOT.index()]
    }

    pub fn scope(&self, scope_id: ScopeId) -> Option<&Scope> {
        self.scopes.get(scope_id.index())
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Inserts `symbol` into the current scope.
    pub fn declare_symbol(&mut self, symbol: Symbol) -> Result<(), SemanticError> {
        if symbol.scope() != self.current_scope {
            return Err(SemanticError::new(
                ErrorKind::InvalidScope,
                symbol.location(),
                format!(
                    "'{}' belongs to scope {} but scope {} is being analyzed",
                    symbol.name(),
                    symbol.scope().index(),
                    self.current_scope.index()
                ),
            ));
        }

        if let Some(existing) = self.current().lookup(symbol.name()) {
            return Err(SemanticError::duplicate_symbol(
                symbol.name(),
                existing,
                symbol.location(),
            ));
        }

        tracing::debug!(
            name = symbol.name(),
            kind = %symbol.kind(),
            scope = self.current_scope.index(),
            "declared symbol"
        );
        self.scopes[self.current_scope.index()].insert(symbol);
        Ok(())
    }

    /// Lexical lookup from the current scope outwards.
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.lookup_symbol_from(name, self.current_scope)
    }

    /// Lexical lookup starting at `scope_id`, for stages that resolve names after the pass.
    pub fn lookup_symbol_from(&self, name: &str, scope_id: ScopeId) -> Option<&Symbol> {
        let mut scope_id = Some(scope_id);
        while let Some(id) = scope_id {
            let scope = self.scope(id)?;
            if let Some(symbol) = scope.lookup(name) {
                tracing::trace!(name, scope = id.index(), "resolved symbol");
                return Some(symbol);
            }
            scope_id = scope.parent();
        }

        None
    }

    /// Looks in exactly one scope, ignoring ancestors.
    pub fn lookup_symbol_in_scope(&self, name: &str, scope_id: ScopeId) -> Option<&Symbol> {
        self.scope(scope_id)?.lookup(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.lookup_symbol(name).and_then(Symbol::as_function)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&VariableSymbol> {
        self.lookup_symbol(name).and_then(Symbol::as_variable)
    }

    pub fn symbols_in_scope(&self, scope_id: ScopeId) -> &[Symbol] {
        self.scope(scope_id).map(Scope::symbols).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(table: &SymbolTable, name: &str, ty: Type) -> Symbol {
        Symbol::Variable(VariableSymbol {
            name: name.into(),
            ty,
            scope: table.current_scope(),
            location: Location::default(),
            storage: None,
            is_const: false,
            constant_value: None,
        })
    }

    fn function(table: &SymbolTable, name: &str) -> Symbol {
        Symbol::Function(FunctionSymbol {
            name: name.into(),
            params: Vec::new(),
            return_type: Type::VOID,
            scope: table.current_scope(),
            location: Location::at(2, 1, 12),
            is_callback: false,
            is_exported: false,
        })
    }

    #[test]
    fn test_duplicate_in_same_scope_leaves_table_unchanged() {
        let mut table = SymbolTable::new();
        table.declare_symbol(function(&table, "main")).unwrap();
        let before = table.symbols_in_scope(ScopeId::ROOT).to_vec();

        let error = table
            .declare_symbol(variable(&table, "main", Type::BYTE))
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::DuplicateSymbol);
        insta::assert_snapshot!(
            error.message,
            @"duplicate symbol 'main': a function with this name is already declared in this scope"
        );
        assert_eq!(error.suggestions, vec!["previous declaration at 2:1".to_string()]);
        assert_eq!(table.symbols_in_scope(ScopeId::ROOT), before.as_slice());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = SymbolTable::new();
        table.declare_symbol(variable(&table, "color", Type::BYTE)).unwrap();
        table.declare_symbol(variable(&table, "Color", Type::WORD)).unwrap();
        assert_eq!(table.root().len(), 2);
    }

    #[test]
    fn test_child_scope_shadows_parent() {
        let mut table = SymbolTable::new();
        table.declare_symbol(variable(&table, "x", Type::WORD)).unwrap();

        table.with_scope(ScopeKind::Function, |table| {
            table.declare_symbol(variable(table, "x", Type::BYTE)).unwrap();
            assert_eq!(table.lookup_variable("x").unwrap().ty, Type::BYTE);
        });

        assert_eq!(table.lookup_variable("x").unwrap().ty, Type::WORD);
    }

    #[test]
    fn test_lookup_walks_every_ancestor() {
        let mut table = SymbolTable::new();
        table.declare_symbol(function(&table, "irq")).unwrap();

        table.push_scope(ScopeKind::Module);
        table.push_scope(ScopeKind::Function);
        let block = table.push_scope(ScopeKind::Block);

        assert!(table.lookup_function("irq").is_some());
        assert!(table.lookup_symbol_in_scope("irq", block).is_none());
        assert!(table.lookup_symbol_in_scope("irq", ScopeId::ROOT).is_some());
        assert!(table.lookup_symbol("missing").is_none());
    }

    #[test]
    fn test_closed_scopes_stay_queryable() {
        let mut table = SymbolTable::new();
        let function_scope = table.with_scope(ScopeKind::Function, |table| {
            table.declare_symbol(variable(table, "counter", Type::BYTE)).unwrap();
            table.current_scope()
        });

        assert_eq!(table.current_scope(), ScopeId::ROOT);
        assert!(table.lookup_symbol("counter").is_none());
        assert!(table.lookup_symbol_from("counter", function_scope).is_some());
        assert_eq!(table.root().children(), &[function_scope]);
        assert_eq!(table.scope(function_scope).unwrap().parent(), Some(ScopeId::ROOT));
    }

    #[test]
    fn test_with_scope_closes_on_error_paths() {
        let mut table = SymbolTable::new();
        let result: Result<(), SemanticError> = table.with_scope(ScopeKind::Block, |table| {
            table.declare_symbol(variable(table, "a", Type::BYTE))?;
            table.declare_symbol(variable(table, "a", Type::BYTE))?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(table.current_scope(), ScopeId::ROOT);
    }

    #[test]
    fn test_symbol_must_belong_to_current_scope() {
        let mut table = SymbolTable::new();
        let stale = variable(&table, "x", Type::BYTE);
        table.push_scope(ScopeKind::Block);

        let error = table.declare_symbol(stale).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidScope);
        assert!(table.current().is_empty());
    }

    #[test]
    #[should_panic(expected = "attempted to close the global scope")]
    fn test_popping_root_panics() {
        SymbolTable::new().pop_scope();
    }
}
