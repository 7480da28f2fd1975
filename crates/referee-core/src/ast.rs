//! The expression, time-bound and specification-pattern algebras.
//!
//! Grounded on `examples/original_source/core/syntax.hpp`: every field here
//! corresponds to one of its `Expr*`/`Time*` class hierarchy members. Nodes
//! reference their children by [`ExprId`]/[`TimeId`] handle rather than by
//! pointer or `Box`, since they live in a [`crate::store::Store`] arena and
//! are hash-consed by structural equality (see `store.rs`).

use serde::{Deserialize, Serialize};

use crate::intern::Symbol;

/// A hash-consed handle to an [`ExprKind`] node stored in a `Store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExprId(pub(crate) u32);

/// A hash-consed handle to a [`TimeKind`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeId(pub(crate) u32);

/// A hash-consed handle to a [`SpecKind`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpecId(pub(crate) u32);

/// The expression algebra. `Bool` literals are not a case here: the store's
/// `bool_lit` constructor resolves directly to the `True`/`False`
/// singletons, since `syntax.hpp`'s split between a generic
/// `ExprConstBoolean` and the distinguished `ExprTrue`/`ExprFalse` nodes only
/// exists because C++ needs a separate compile-time-constant class; a `bool`
/// in Rust already has exactly two values, so keeping both forms would be
/// pure duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    True,
    False,
    IntLit(i64),
    /// Stored as bit pattern so the node is `Eq`/`Hash` without a float
    /// total-order wrapper.
    NumberLit(u64),
    StringLit(Symbol),

    Neg(ExprId),
    Add(ExprId, ExprId),
    Sub(ExprId, ExprId),
    Mul(ExprId, ExprId),
    Div(ExprId, ExprId),
    Mod(ExprId, ExprId),

    Eq(ExprId, ExprId),
    Ne(ExprId, ExprId),
    Lt(ExprId, ExprId),
    Le(ExprId, ExprId),
    Gt(ExprId, ExprId),
    Ge(ExprId, ExprId),

    Not(ExprId),
    And(ExprId, ExprId),
    Or(ExprId, ExprId),
    Xor(ExprId, ExprId),
    Imp(ExprId, ExprId),
    Equ(ExprId, ExprId),
    Choice(ExprId, ExprId, ExprId),

    /// A bare reference to a context ("the bindings in scope under this
    /// name"), e.g. `__curr__` or a name introduced by `At`.
    Context(Symbol),
    /// Access to a declared property through a context value.
    Data(ExprId, Symbol),
    /// Access to a declared configuration value through a context value.
    Conf(ExprId, Symbol),
    /// Access to a named member of a struct- or enum-typed value.
    Member(ExprId, Symbol),
    /// Access to an element of an array-typed value.
    Index(ExprId, ExprId),
    /// An explicit parenthesization. Collapsed by the rewrite pass per the
    /// rules in `rewrite.rs`.
    Paren(ExprId),

    /// Binds `name` to the sample in scope for the lifetime of `body`.
    At(Symbol, ExprId),

    F(Option<TimeId>, ExprId),
    G(Option<TimeId>, ExprId),
    Xs(Option<TimeId>, ExprId),
    Xw(Option<TimeId>, ExprId),
    Us(Option<TimeId>, ExprId, ExprId),
    Uw(Option<TimeId>, ExprId, ExprId),
    Rs(Option<TimeId>, ExprId, ExprId),
    Rw(Option<TimeId>, ExprId, ExprId),

    O(Option<TimeId>, ExprId),
    H(Option<TimeId>, ExprId),
    Ys(Option<TimeId>, ExprId),
    Yw(Option<TimeId>, ExprId),
    Ss(Option<TimeId>, ExprId, ExprId),
    Sw(Option<TimeId>, ExprId, ExprId),
    Ts(Option<TimeId>, ExprId, ExprId),
    Tw(Option<TimeId>, ExprId, ExprId),

    /// The integral of `integrand` over the samples where `predicate`
    /// holds, optionally bounded.
    Integral(Option<TimeId>, ExprId, ExprId),
}

/// A time bound attached to a temporal operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKind {
    /// `[lo, hi)`: both bounds present.
    Interval(ExprId, ExprId),
    /// `[lo, ∞)`: only a lower bound.
    Min(ExprId),
    /// `[0, hi)`: only an upper bound.
    Max(ExprId),
}

/// A scope restriction applied to a specification pattern, following the
/// standard LTL specification-pattern scopes (global / before / after /
/// while / between / after-until). See `rewrite.rs` for the lowering of
/// each into the kernel operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Globally,
    Before(ExprId),
    After(ExprId),
    While(ExprId),
    BetweenAnd(ExprId, ExprId),
    AfterUntil(ExprId, ExprId),
}

/// The specification-pattern algebra (section 3's "Specification patterns").
/// Each variant lowers, via `rewrite.rs`, to a pure LTL formula built from
/// the kernel operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    Universality(ExprId, Option<TimeId>),
    Absence(ExprId, Option<TimeId>),
    Existence(ExprId, Option<TimeId>),
    TransientState(ExprId, Option<TimeId>),
    SteadyState(ExprId),
    MinimumDuration(ExprId, TimeId),
    MaximumDuration(ExprId, TimeId),
    Recurrence(ExprId, Option<TimeId>),
    /// `P`, `S`, the bound: `P` must be preceded by `S`.
    Precedence(ExprId, ExprId, Option<TimeId>),
    /// `S`, `T`, `P`, the bound between `S` and `T`, then between `T` and
    /// `P`: a two-link precedence chain ending at `P`.
    PrecedenceChain12(ExprId, ExprId, ExprId, Option<TimeId>, Option<TimeId>),
    /// `P`, `S`, `T`, the bound between `P` and `S`, then between `S` and
    /// `T`: a two-link precedence chain starting at `P`.
    PrecedenceChain21(ExprId, ExprId, ExprId, Option<TimeId>, Option<TimeId>),
    /// `P`, `S`, the response bound, and the cancellation guard `c`.
    Response(ExprId, ExprId, Option<TimeId>, ExprId),
    ResponseChain12(
        ExprId,
        ExprId,
        ExprId,
        Option<TimeId>,
        Option<TimeId>,
        ExprId,
        ExprId,
    ),
    ResponseChain21(
        ExprId,
        ExprId,
        ExprId,
        Option<TimeId>,
        Option<TimeId>,
        ExprId,
        ExprId,
    ),
    ResponseInvariance(ExprId, ExprId, Option<TimeId>),
    Until(ExprId, ExprId, Option<TimeId>),
}

/// The `ExprId` operands a `SpecKind` carries directly, for callers (e.g.
/// `lib.rs`'s `compile_spec`) that need to type-check every expression a
/// pattern references before lowering it. Bound expressions nested inside a
/// `TimeId` are not included; `Store::time_bounds` exposes those.
pub fn spec_children(kind: SpecKind) -> Vec<ExprId> {
    match kind {
        SpecKind::Universality(p, _) => vec![p],
        SpecKind::Absence(p, _) => vec![p],
        SpecKind::Existence(p, _) => vec![p],
        SpecKind::TransientState(p, _) => vec![p],
        SpecKind::SteadyState(p) => vec![p],
        SpecKind::MinimumDuration(p, _) => vec![p],
        SpecKind::MaximumDuration(p, _) => vec![p],
        SpecKind::Recurrence(p, _) => vec![p],
        SpecKind::Precedence(p, s, _) => vec![p, s],
        SpecKind::PrecedenceChain12(s, t, p, _, _) => vec![s, t, p],
        SpecKind::PrecedenceChain21(p, s, t, _, _) => vec![p, s, t],
        SpecKind::Response(p, s, _, c) => vec![p, s, c],
        SpecKind::ResponseChain12(p, q, s, _, _, c, d) => vec![p, q, s, c, d],
        SpecKind::ResponseChain21(p, q, s, _, _, c, d) => vec![p, q, s, c, d],
        SpecKind::ResponseInvariance(p, q, _) => vec![p, q],
        SpecKind::Until(p, q, _) => vec![p, q],
    }
}

/// The `ExprId` operands a `Scope` carries, for the same type-checking
/// purpose as [`spec_children`].
pub fn scope_children(scope: Scope) -> Vec<ExprId> {
    match scope {
        Scope::Globally => vec![],
        Scope::Before(q) => vec![q],
        Scope::After(q) => vec![q],
        Scope::While(q) => vec![q],
        Scope::BetweenAnd(a, b) => vec![a, b],
        Scope::AfterUntil(a, b) => vec![a, b],
    }
}
