//! Duality truth tables and the negation-involution property from the
//! rewrite-pipeline specification's quantified invariants: for all
//! canonical `e`, `negate(negate(e))` is identical, by hash-cons equality,
//! to `canonic(e)`.

use referee_core::ast::ExprKind;
use referee_core::module::ModuleId;
use referee_core::position::Position;
use referee_core::{canonic, negate, ExprId, Module, Store};

fn fresh() -> (Store, Module) {
    let mut store = Store::new();
    let module = Module::new(ModuleId(0), &mut store, "m");
    (store, module)
}

fn p_and_q(store: &mut Store) -> (ExprId, ExprId) {
    let p_name = store.intern("p");
    let q_name = store.intern("q");
    let p = store.context(p_name, Position::SYNTHETIC);
    let q = store.context(q_name, Position::SYNTHETIC);
    (p, q)
}

/// Checks `negate(negate(e)) == canonic(e)` by hash-cons identity for a
/// representative sample of canonical expressions covering every dual
/// pair negate.rs implements.
fn assert_negation_involutive(store: &mut Store, module: &Module, e: ExprId) {
    let canon = canonic::run(store, module, e);
    let once = negate::negate(store, module, canon);
    let twice = negate::negate(store, module, once);
    assert_eq!(
        twice,
        canonic::run(store, module, canon),
        "negate(negate(e)) should equal canonic(e) by hash-cons identity"
    );
}

#[test]
fn involution_holds_for_and_or() {
    let (mut store, module) = fresh();
    let (p, q) = p_and_q(&mut store);
    let and = store.and(p, q, Position::SYNTHETIC);
    let or = store.or(p, q, Position::SYNTHETIC);
    assert_negation_involutive(&mut store, &module, and);
    assert_negation_involutive(&mut store, &module, or);
}

#[test]
fn involution_holds_for_future_kernel_operators() {
    let (mut store, module) = fresh();
    let (p, q) = p_and_q(&mut store);
    let us = store.us(None, p, q, Position::SYNTHETIC);
    let rw = store.rw(None, p, q, Position::SYNTHETIC);
    let xs = store.xs(None, p, Position::SYNTHETIC);
    let xw = store.xw(None, p, Position::SYNTHETIC);
    assert_negation_involutive(&mut store, &module, us);
    assert_negation_involutive(&mut store, &module, rw);
    assert_negation_involutive(&mut store, &module, xs);
    assert_negation_involutive(&mut store, &module, xw);
}

#[test]
fn involution_holds_for_past_kernel_operators() {
    let (mut store, module) = fresh();
    let (p, q) = p_and_q(&mut store);
    let ss = store.ss(None, p, q, Position::SYNTHETIC);
    let tw = store.tw(None, p, q, Position::SYNTHETIC);
    let ys = store.ys(None, p, Position::SYNTHETIC);
    let yw = store.yw(None, p, Position::SYNTHETIC);
    assert_negation_involutive(&mut store, &module, ss);
    assert_negation_involutive(&mut store, &module, tw);
    assert_negation_involutive(&mut store, &module, ys);
    assert_negation_involutive(&mut store, &module, yw);
}

#[test]
fn involution_holds_for_relational_and_atoms() {
    let (mut store, module) = fresh();
    let a = store.int_lit(1, Position::SYNTHETIC);
    let b = store.int_lit(2, Position::SYNTHETIC);
    let lt = store.lt(a, b, Position::SYNTHETIC);
    let eq = store.eq(a, b, Position::SYNTHETIC);
    assert_negation_involutive(&mut store, &module, lt);
    assert_negation_involutive(&mut store, &module, eq);

    let t = store.true_lit(Position::SYNTHETIC);
    assert_negation_involutive(&mut store, &module, t);
}

/// `negate` applied to an atom with no algebraic dual (arithmetic, access
/// forms, `Choice`, `Integral`) just wraps it in `Not` rather than failing.
#[test]
fn negate_of_a_bare_atom_wraps_in_not() {
    let (mut store, module) = fresh();
    let name = store.intern("x");
    let curr_name = store.intern("__curr__");
    let curr = store.context(curr_name, Position::SYNTHETIC);
    let data = store.data(curr, name, Position::SYNTHETIC);
    let negated = negate::negate(&mut store, &module, data);
    assert!(matches!(store.expr_kind(negated), ExprKind::Not(_)));
}

/// Each dual pair from negate.rs's truth table: negating a node of one
/// kind produces a node of its documented dual kind.
#[test]
fn duality_table_matches_dual_kinds() {
    let (mut store, module) = fresh();
    let (p, q) = p_and_q(&mut store);

    let and = store.and(p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, and)),
        ExprKind::Or(_, _)
    ));

    let or = store.or(p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, or)),
        ExprKind::And(_, _)
    ));

    let us = store.us(None, p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, us)),
        ExprKind::Rw(None, _, _)
    ));

    let uw = store.uw(None, p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, uw)),
        ExprKind::Rs(None, _, _)
    ));

    let ss = store.ss(None, p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, ss)),
        ExprKind::Tw(None, _, _)
    ));

    let sw = store.sw(None, p, q, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, sw)),
        ExprKind::Ts(None, _, _)
    ));

    let xs = store.xs(None, p, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, xs)),
        ExprKind::Xw(None, _)
    ));

    let ys = store.ys(None, p, Position::SYNTHETIC);
    assert!(matches!(
        store.expr_kind(negate::negate(&mut store, &module, ys)),
        ExprKind::Yw(None, _)
    ));
}
