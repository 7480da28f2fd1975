//! The Referee compiler middle-end.
//!
//! Turns a parsed specification (an untyped [`ast::ExprId`]/[`ast::SpecId`]
//! tree in a [`store::Store`], resolved against a [`module::Module`] symbol
//! table) into the pure, untimed kernel LTL a downstream code generator
//! consumes: type-check, negate to push `Not` to the leaves, canonicalize
//! to the minimal operator kernel, and rewrite away specification patterns,
//! scopes, and timed operators. Parsing, trace storage, code generation,
//! and the CLI driver are out of scope — this crate is the part of the
//! pipeline between a parse tree and a printable, type-checked, pure LTL
//! formula.

pub mod ast;
pub mod canonic;
pub mod error;
pub mod intern;
pub mod module;
pub mod negate;
pub mod position;
pub mod printer;
pub mod rewrite;
pub mod store;
pub mod typecalc;
pub mod types;

pub use ast::{ExprId, SpecId, TimeId};
pub use error::RefereeError;
pub use module::{Module, ModuleId};
pub use store::Store;

/// Runs the full middle-end pipeline on a single expression: type-checks it
/// against `module`, then fully rewrites and canonicalizes it into pure
/// kernel LTL. Returns the final expression handle; pass it to
/// [`printer::print`] to render it.
pub fn compile_expr(
    store: &mut Store,
    module: &Module,
    expr: ExprId,
) -> Result<ExprId, RefereeError> {
    typecalc::run(store, module, expr)?;
    Ok(rewrite::run(store, module, expr))
}

/// Runs the full middle-end pipeline on a specification pattern: type-checks
/// its underlying expressions, then lowers the pattern and its scope to
/// pure kernel LTL.
pub fn compile_spec(
    store: &mut Store,
    module: &Module,
    spec: SpecId,
) -> Result<ExprId, RefereeError> {
    let kind = store.spec_kind(spec);
    let scope = store.spec_scope(spec);
    for child in ast::spec_children(kind)
        .into_iter()
        .chain(ast::scope_children(scope))
    {
        typecalc::run(store, module, child)?;
    }
    Ok(rewrite::run_spec(store, module, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SpecKind;
    use crate::position::Position;

    #[test]
    fn compile_expr_rewrites_and_typechecks() {
        let mut store = Store::new();
        let module = Module::new(ModuleId(0), &mut store, "m");
        let t = store.true_lit(Position::SYNTHETIC);
        let f = store.false_lit(Position::SYNTHETIC);
        let and = store.and(t, f, Position::SYNTHETIC);
        let result = compile_expr(&mut store, &module, and).unwrap();
        assert_eq!(store.expr_kind(result), crate::ast::ExprKind::False);
    }

    #[test]
    fn compile_spec_lowers_pattern() {
        let mut store = Store::new();
        let module = Module::new(ModuleId(0), &mut store, "m");
        let name = store.intern("p");
        let p = store.context(name, Position::SYNTHETIC);
        let spec = store.spec(
            SpecKind::Existence(p, None),
            ast::Scope::Globally,
            Position::SYNTHETIC,
        );
        let result = compile_spec(&mut store, &module, spec).unwrap();
        assert!(matches!(
            store.expr_kind(result),
            crate::ast::ExprKind::Us(_, _, _)
        ));
    }
}
