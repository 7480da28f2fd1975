//! Negation-normal-form construction: computes an expression semantically
//! equal to `¬e` with `Not` pushed all the way to the leaves.
//!
//! Grounded on `examples/original_source/core/visitors/negated.cpp`'s
//! `NegatedImpl`: one dual per connective, a fallback that wraps anything
//! else in `Not`, and a recursive `negated()` helper used for the operands
//! that themselves need negating. Unlike the original, `negate` here also
//! canonicalizes every operand it touches (negated or not) before
//! reassembling the result, so the property `canonic(canonic(e)) ==
//! canonic(e)` holds regardless of how deeply the input is nested — the
//! original relies on its caller (`rewrite.cpp`'s `make`) to have already
//! canonicalized an expression before negating it, which only holds for
//! expressions built by the rewrite pass itself, not for an arbitrary tree
//! handed to `Canonic::make` directly. This divergence is recorded in
//! `DESIGN.md`.

use crate::ast::ExprKind;
use crate::canonic;
use crate::module::Module;
use crate::store::Store;
use crate::ast::ExprId;

/// Returns an expression equal to `¬expr`, itself in canonical form.
pub fn negate(store: &mut Store, module: &Module, expr: ExprId) -> ExprId {
    let position = store.expr_position(expr);
    match store.expr_kind(expr) {
        ExprKind::True => store.false_lit(position),
        ExprKind::False => store.true_lit(position),

        ExprKind::Not(x) => canonic::run(store, module, x),

        ExprKind::Eq(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.ne(l, r, position)
        }
        ExprKind::Ne(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.eq(l, r, position)
        }
        ExprKind::Gt(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.le(l, r, position)
        }
        ExprKind::Ge(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.lt(l, r, position)
        }
        ExprKind::Lt(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.ge(l, r, position)
        }
        ExprKind::Le(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.gt(l, r, position)
        }

        ExprKind::Or(l, r) => {
            let nl = negate(store, module, l);
            let nr = negate(store, module, r);
            store.and(nl, nr, position)
        }
        ExprKind::And(l, r) => {
            let nl = negate(store, module, l);
            let nr = negate(store, module, r);
            store.or(nl, nr, position)
        }
        ExprKind::Xor(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.equ(l, r, position)
        }
        ExprKind::Equ(l, r) => {
            let (l, r) = canon_pair(store, module, l, r);
            store.xor(l, r, position)
        }
        ExprKind::Imp(l, r) => {
            let l = canonic::run(store, module, l);
            let nr = negate(store, module, r);
            store.and(l, nr, position)
        }

        ExprKind::At(name, body) => {
            let nb = negate(store, module, body);
            store.at(name, nb, position)
        }
        ExprKind::Paren(x) => negate(store, module, x),

        ExprKind::G(time, x) => {
            let nx = negate(store, module, x);
            store.f(time, nx, position)
        }
        ExprKind::F(time, x) => {
            let nx = negate(store, module, x);
            store.g(time, nx, position)
        }
        ExprKind::Xs(time, x) => {
            let nx = negate(store, module, x);
            store.xw(time, nx, position)
        }
        ExprKind::Xw(time, x) => {
            let nx = negate(store, module, x);
            store.xs(time, nx, position)
        }
        ExprKind::Us(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.rw(time, nl, nr, position)
        }
        ExprKind::Uw(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.rs(time, nl, nr, position)
        }
        ExprKind::Rs(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.uw(time, nl, nr, position)
        }
        ExprKind::Rw(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.us(time, nl, nr, position)
        }

        ExprKind::H(time, x) => {
            let nx = negate(store, module, x);
            store.o(time, nx, position)
        }
        ExprKind::O(time, x) => {
            let nx = negate(store, module, x);
            store.h(time, nx, position)
        }
        ExprKind::Ys(time, x) => {
            let nx = negate(store, module, x);
            store.yw(time, nx, position)
        }
        ExprKind::Yw(time, x) => {
            let nx = negate(store, module, x);
            store.ys(time, nx, position)
        }
        ExprKind::Ss(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.tw(time, nl, nr, position)
        }
        ExprKind::Sw(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.ts(time, nl, nr, position)
        }
        ExprKind::Ts(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.sw(time, nl, nr, position)
        }
        ExprKind::Tw(time, l, r) => {
            let (nl, nr) = negate_pair(store, module, l, r);
            store.ss(time, nl, nr, position)
        }

        // Atoms: constants, arithmetic, access forms, Choice, Integral. No
        // dual exists; the canonical form of `¬e` is `Not` over the
        // (canonicalized) atom itself.
        _ => {
            let c = canonic::run(store, module, expr);
            store.not(c, position)
        }
    }
}

fn canon_pair(store: &mut Store, module: &Module, l: ExprId, r: ExprId) -> (ExprId, ExprId) {
    let l = canonic::run(store, module, l);
    let r = canonic::run(store, module, r);
    (l, r)
}

fn negate_pair(store: &mut Store, module: &Module, l: ExprId, r: ExprId) -> (ExprId, ExprId) {
    let nl = negate(store, module, l);
    let nr = negate(store, module, r);
    (nl, nr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::module::ModuleId;
    use crate::position::Position;

    fn fresh() -> (Store, Module) {
        let mut store = Store::new();
        let module = Module::new(ModuleId(0), &mut store, "m");
        (store, module)
    }

    #[test]
    fn negate_true_is_false() {
        let (mut store, module) = fresh();
        let t = store.true_lit(Position::SYNTHETIC);
        let n = negate(&mut store, &module, t);
        assert_eq!(store.expr_kind(n), ExprKind::False);
    }

    #[test]
    fn negate_and_is_or_of_negations() {
        let (mut store, module) = fresh();
        let a = store.true_lit(Position::SYNTHETIC);
        let b = store.false_lit(Position::SYNTHETIC);
        let and = store.and(a, b, Position::SYNTHETIC);
        let n = negate(&mut store, &module, and);
        match store.expr_kind(n) {
            ExprKind::Or(l, r) => {
                assert_eq!(store.expr_kind(l), ExprKind::False);
                assert_eq!(store.expr_kind(r), ExprKind::True);
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn negate_f_is_g_of_negation() {
        let (mut store, module) = fresh();
        let name = store.intern("p");
        let p = store.context(name, Position::SYNTHETIC);
        let f = store.f(None, p, Position::SYNTHETIC);
        let n = negate(&mut store, &module, f);
        match store.expr_kind(n) {
            ExprKind::G(_, x) => assert_eq!(store.expr_kind(x), ExprKind::Not(p)),
            other => panic!("expected G, got {other:?}"),
        }
    }

    #[test]
    fn double_negation_is_involutive() {
        let (mut store, module) = fresh();
        let name = store.intern("p");
        let p = store.context(name, Position::SYNTHETIC);
        let g = store.g(None, p, Position::SYNTHETIC);
        let canonical = canonic::run(&mut store, &module, g);
        let once = negate(&mut store, &module, canonical);
        let twice = negate(&mut store, &module, once);
        assert_eq!(twice, canonical);
    }

    #[test]
    fn negate_xor_is_equ() {
        let (mut store, module) = fresh();
        let a = store.true_lit(Position::SYNTHETIC);
        let b = store.false_lit(Position::SYNTHETIC);
        let xor = store.xor(a, b, Position::SYNTHETIC);
        let n = negate(&mut store, &module, xor);
        assert!(matches!(store.expr_kind(n), ExprKind::Equ(_, _)));
    }

    #[test]
    fn negate_imp_keeps_lhs_and_negates_rhs() {
        let (mut store, module) = fresh();
        let a = store.true_lit(Position::SYNTHETIC);
        let b = store.false_lit(Position::SYNTHETIC);
        let imp = store.imp(a, b, Position::SYNTHETIC);
        let n = negate(&mut store, &module, imp);
        match store.expr_kind(n) {
            ExprKind::And(l, r) => {
                assert_eq!(l, a);
                assert_eq!(store.expr_kind(r), ExprKind::True);
            }
            other => panic!("expected And, got {other:?}"),
        }
    }
}
