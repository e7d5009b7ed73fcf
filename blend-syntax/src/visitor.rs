use crate::ast::*;

/// Read-only traversal of a [`Program`].
///
/// Every method walks into the node's children by default, so an implementation only overrides
/// the nodes it cares about and calls the matching `walk_*` function to keep descending.
pub trait AstVisitor<'ast> {
    fn visit_item(&mut self, item: &'ast Item) {
        walk_item(self, item);
    }

    fn visit_function(&mut self, function: &'ast FunctionDecl) {
        walk_function(self, function);
    }

    fn visit_variable(&mut self, variable: &'ast VariableDecl) {
        walk_variable(self, variable);
    }

    fn visit_type(&mut self, annotation: &'ast TypeAnnotation) {
        walk_type(self, annotation);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Both declared names and references.
    fn visit_ident(&mut self, _ident: &'ast Ident) {}
}

impl Program {
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V)
    where
        V: AstVisitor<'ast> + ?Sized,
    {
        for item in &self.items {
            visitor.visit_item(item);
        }
    }
}

pub fn walk_item<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, item: &'ast Item) {
    match item {
        Item::Function(function) => visitor.visit_function(function),
        Item::Variable(variable) => visitor.visit_variable(variable),
    }
}

pub fn walk_function<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, function: &'ast FunctionDecl) {
    visitor.visit_ident(&function.name);

    for param in &function.params {
        visitor.visit_ident(&param.name);
        visitor.visit_type(&param.ty);
        if let Some(default_value) = &param.default_value {
            visitor.visit_expr(default_value);
        }
    }

    if let Some(return_type) = &function.return_type {
        visitor.visit_type(return_type);
    }

    if let Some(body) = &function.body {
        walk_block(visitor, body);
    }
}

pub fn walk_variable<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, variable: &'ast VariableDecl) {
    visitor.visit_ident(&variable.name);

    if let Some(ty) = &variable.ty {
        visitor.visit_type(ty);
    }

    if let Some(initializer) = &variable.initializer {
        visitor.visit_expr(initializer);
    }
}

pub fn walk_type<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, annotation: &'ast TypeAnnotation) {
    match annotation {
        // type names are not symbols
        TypeAnnotation::Named(_) => {}
        TypeAnnotation::Array { element, size, .. } => {
            visitor.visit_type(element);
            visitor.visit_expr(size);
        }
        TypeAnnotation::Callback {
            params,
            return_type,
            ..
        } => {
            params.iter().for_each(|param| visitor.visit_type(param));
            if let Some(return_type) = return_type {
                visitor.visit_type(return_type);
            }
        }
    }
}

pub fn walk_block<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    block.statements.iter().for_each(|stmt| visitor.visit_stmt(stmt));
}

pub fn walk_stmt<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Variable(variable) => visitor.visit_variable(variable),
        Stmt::Assign(assign) => {
            visitor.visit_ident(&assign.target);
            visitor.visit_expr(&assign.value);
        }
        Stmt::Expr(expr) => visitor.visit_expr(expr),
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                visitor.visit_expr(value);
            }
        }
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition);
            walk_block(visitor, &if_stmt.then_branch);
            if let Some(else_branch) = &if_stmt.else_branch {
                walk_block(visitor, else_branch);
            }
        }
        Stmt::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition);
            walk_block(visitor, &while_stmt.body);
        }
        Stmt::Block(block) => walk_block(visitor, block),
    }
}

pub fn walk_expr<'ast, V: AstVisitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Number { .. } | Expr::Bool { .. } | Expr::String { .. } => {}
        Expr::Ident(ident) => visitor.visit_ident(ident),
        Expr::Unary(unary) => visitor.visit_expr(&unary.expr),
        Expr::Binary(binary) => {
            visitor.visit_expr(&binary.lhs);
            visitor.visit_expr(&binary.rhs);
        }
        Expr::Call(call) => {
            visitor.visit_expr(&call.callee);
            call.args.iter().for_each(|arg| visitor.visit_expr(arg));
        }
        Expr::Index(index) => {
            visitor.visit_expr(&index.target);
            visitor.visit_expr(&index.index);
        }
    }
}
