//! Deterministic textual serialization of a canonical kernel expression.
//!
//! Grounded on `examples/original_source/core/visitors/printer.cpp`'s
//! `PrinterImpl`: binary connectives print infix with surrounding spaces,
//! unary temporal operators print as `OP(arg)`, binary temporal operators
//! print as `OP(lhs, rhs)`, `True`/`False` print lowercase, `Context`/`Data`
//! print the bare name. The original falls back to `"???"` for a node kind
//! its visitor doesn't handle; `ExprKind` here is a closed enum and
//! `write_expr`'s match is exhaustive, so that fallback has no case to
//! apply to and is omitted.

use std::fmt::Write as _;

use crate::ast::{ExprId, ExprKind, TimeKind};
use crate::intern::Symbol;
use crate::store::Store;

/// Renders `expr` to its canonical textual form.
pub fn print(store: &Store, expr: ExprId) -> String {
    let mut out = String::new();
    write_expr(store, expr, &mut out);
    out
}

fn name(store: &Store, sym: Symbol) -> String {
    store.resolve(sym).to_string()
}

fn write_expr(store: &Store, expr: ExprId, out: &mut String) {
    match store.expr_kind(expr) {
        ExprKind::True => out.push_str("true"),
        ExprKind::False => out.push_str("false"),
        ExprKind::IntLit(v) => {
            let _ = write!(out, "{v}");
        }
        ExprKind::NumberLit(bits) => {
            let _ = write!(out, "{}", f64::from_bits(bits));
        }
        ExprKind::StringLit(sym) => {
            let _ = write!(out, "\"{}\"", name(store, sym));
        }

        ExprKind::Neg(x) => {
            out.push('-');
            write_expr(store, x, out);
        }
        ExprKind::Add(l, r) => infix(store, l, "+", r, out),
        ExprKind::Sub(l, r) => infix(store, l, "-", r, out),
        ExprKind::Mul(l, r) => infix(store, l, "*", r, out),
        ExprKind::Div(l, r) => infix(store, l, "/", r, out),
        ExprKind::Mod(l, r) => infix(store, l, "%", r, out),

        ExprKind::Eq(l, r) => infix(store, l, "==", r, out),
        ExprKind::Ne(l, r) => infix(store, l, "!=", r, out),
        ExprKind::Lt(l, r) => infix(store, l, "<", r, out),
        ExprKind::Le(l, r) => infix(store, l, "<=", r, out),
        ExprKind::Gt(l, r) => infix(store, l, ">", r, out),
        ExprKind::Ge(l, r) => infix(store, l, ">=", r, out),

        ExprKind::Not(x) => {
            out.push('!');
            write_expr(store, x, out);
        }
        ExprKind::And(l, r) => infix(store, l, "&&", r, out),
        ExprKind::Or(l, r) => infix(store, l, "||", r, out),
        ExprKind::Xor(l, r) => infix(store, l, "xor", r, out),
        ExprKind::Imp(l, r) => infix(store, l, "->", r, out),
        ExprKind::Equ(l, r) => infix(store, l, "<->", r, out),
        ExprKind::Choice(c, t, e) => {
            write_expr(store, c, out);
            out.push_str(" ? ");
            write_expr(store, t, out);
            out.push_str(" : ");
            write_expr(store, e, out);
        }

        ExprKind::Context(sym) => out.push_str(&name(store, sym)),
        ExprKind::Data(ctx, sym) => {
            write_expr(store, ctx, out);
            out.push('.');
            out.push_str(&name(store, sym));
        }
        ExprKind::Conf(ctx, sym) => {
            write_expr(store, ctx, out);
            out.push('#');
            out.push_str(&name(store, sym));
        }
        ExprKind::Member(base, sym) => {
            write_expr(store, base, out);
            out.push('.');
            out.push_str(&name(store, sym));
        }
        ExprKind::Index(base, idx) => {
            write_expr(store, base, out);
            out.push('[');
            write_expr(store, idx, out);
            out.push(']');
        }
        ExprKind::Paren(x) => {
            out.push('(');
            write_expr(store, x, out);
            out.push(')');
        }
        ExprKind::At(sym, body) => {
            out.push_str("at(");
            out.push_str(&name(store, sym));
            out.push_str(", ");
            write_expr(store, body, out);
            out.push(')');
        }

        ExprKind::F(time, x) => unary_temporal(store, "F", time, x, out),
        ExprKind::G(time, x) => unary_temporal(store, "G", time, x, out),
        ExprKind::Xs(time, x) => unary_temporal(store, "Xs", time, x, out),
        ExprKind::Xw(time, x) => unary_temporal(store, "Xw", time, x, out),
        ExprKind::O(time, x) => unary_temporal(store, "O", time, x, out),
        ExprKind::H(time, x) => unary_temporal(store, "H", time, x, out),
        ExprKind::Ys(time, x) => unary_temporal(store, "Ys", time, x, out),
        ExprKind::Yw(time, x) => unary_temporal(store, "Yw", time, x, out),

        ExprKind::Us(time, l, r) => binary_temporal(store, "Us", time, l, r, out),
        ExprKind::Uw(time, l, r) => binary_temporal(store, "Uw", time, l, r, out),
        ExprKind::Rs(time, l, r) => binary_temporal(store, "Rs", time, l, r, out),
        ExprKind::Rw(time, l, r) => binary_temporal(store, "Rw", time, l, r, out),
        ExprKind::Ss(time, l, r) => binary_temporal(store, "Ss", time, l, r, out),
        ExprKind::Sw(time, l, r) => binary_temporal(store, "Sw", time, l, r, out),
        ExprKind::Ts(time, l, r) => binary_temporal(store, "Ts", time, l, r, out),
        ExprKind::Tw(time, l, r) => binary_temporal(store, "Tw", time, l, r, out),

        ExprKind::Integral(time, predicate, integrand) => {
            out.push_str("integral");
            write_time(store, time, out);
            out.push('(');
            write_expr(store, predicate, out);
            out.push_str(", ");
            write_expr(store, integrand, out);
            out.push(')');
        }
    }
}

fn infix(store: &Store, l: ExprId, op: &str, r: ExprId, out: &mut String) {
    write_expr(store, l, out);
    out.push(' ');
    out.push_str(op);
    out.push(' ');
    write_expr(store, r, out);
}

fn unary_temporal(
    store: &Store,
    op: &str,
    time: Option<crate::ast::TimeId>,
    x: ExprId,
    out: &mut String,
) {
    out.push_str(op);
    write_time(store, time, out);
    out.push('(');
    write_expr(store, x, out);
    out.push(')');
}

fn binary_temporal(
    store: &Store,
    op: &str,
    time: Option<crate::ast::TimeId>,
    l: ExprId,
    r: ExprId,
    out: &mut String,
) {
    out.push_str(op);
    write_time(store, time, out);
    out.push('(');
    write_expr(store, l, out);
    out.push_str(", ");
    write_expr(store, r, out);
    out.push(')');
}

fn write_time(store: &Store, time: Option<crate::ast::TimeId>, out: &mut String) {
    let Some(time) = time else {
        return;
    };
    out.push('^');
    match store.time_kind(time) {
        TimeKind::Interval(lo, hi) => {
            out.push('[');
            write_expr(store, lo, out);
            out.push_str(", ");
            write_expr(store, hi, out);
            out.push(')');
        }
        TimeKind::Min(lo) => {
            out.push('[');
            write_expr(store, lo, out);
            out.push_str(", inf)");
        }
        TimeKind::Max(hi) => {
            out.push_str("[0, ");
            write_expr(store, hi, out);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn prints_literals() {
        let mut store = Store::new();
        let t = store.true_lit(Position::SYNTHETIC);
        assert_eq!(print(&store, t), "true");
        let f = store.false_lit(Position::SYNTHETIC);
        assert_eq!(print(&store, f), "false");
        let n = store.int_lit(42, Position::SYNTHETIC);
        assert_eq!(print(&store, n), "42");
    }

    #[test]
    fn prints_infix_and() {
        let mut store = Store::new();
        let a = store.true_lit(Position::SYNTHETIC);
        let b = store.false_lit(Position::SYNTHETIC);
        let and = store.and(a, b, Position::SYNTHETIC);
        assert_eq!(print(&store, and), "true && false");
    }

    #[test]
    fn prints_context_name() {
        let mut store = Store::new();
        let name = store.intern("speed");
        let c = store.context(name, Position::SYNTHETIC);
        assert_eq!(print(&store, c), "speed");
    }

    #[test]
    fn prints_unary_temporal_with_bound() {
        let mut store = Store::new();
        let name = store.intern("p");
        let p = store.context(name, Position::SYNTHETIC);
        let hi = store.int_lit(5, Position::SYNTHETIC);
        let time = store.time_max(hi, Position::SYNTHETIC);
        let f = store.f(Some(time), p, Position::SYNTHETIC);
        assert_eq!(print(&store, f), "F^[0, 5)(p)");
    }

    #[test]
    fn prints_binary_temporal() {
        let mut store = Store::new();
        let name = store.intern("p");
        let p = store.context(name, Position::SYNTHETIC);
        let name2 = store.intern("q");
        let q = store.context(name2, Position::SYNTHETIC);
        let us = store.us(None, p, q, Position::SYNTHETIC);
        assert_eq!(print(&store, us), "Us(p, q)");
    }

    #[test]
    fn prints_data_access() {
        let mut store = Store::new();
        let ctx_name = store.intern("starting");
        let ctx = store.context(ctx_name, Position::SYNTHETIC);
        let field = store.intern("__time__");
        let data = store.data(ctx, field, Position::SYNTHETIC);
        assert_eq!(print(&store, data), "starting.__time__");
    }
}
