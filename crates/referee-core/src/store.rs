//! The hash-consed node repository for types, expressions, time bounds and
//! specification patterns.
//!
//! Grounded on `examples/original_source/core/factory.hpp`'s `Factory<T>`
//! template: a map from a node's structural key to its (unique) instance.
//! Unlike `torc-core::hash::content_hash`, which content-addresses nodes via
//! SHA-256, the dedup key here is an ordinary derived `Eq`/`Hash` on the node
//! shape — there is no cross-process or on-disk identity requirement for
//! these nodes, so a cryptographic hash buys nothing a `HashMap` key
//! doesn't already give for free. This divergence from the teacher's
//! content-hash idiom is deliberate; see `DESIGN.md`.

use std::collections::HashMap;

use crate::ast::{ExprId, ExprKind, SpecId, SpecKind, Scope, TimeId, TimeKind};
use crate::intern::{Interner, Symbol};
use crate::module::ModuleId;
use crate::position::Position;
use crate::types::{TypeId, TypeKind};

struct ExprNode {
    kind: ExprKind,
    position: Position,
    ty: Option<TypeId>,
}

struct TimeNode {
    kind: TimeKind,
    position: Position,
}

struct SpecNode {
    kind: SpecKind,
    scope: Scope,
    position: Position,
}

/// Collapses the position component of a hash-cons key for synthesized
/// nodes, so that two manufactured nodes of identical shape always dedup
/// regardless of which pass produced them, while two source nodes of
/// identical shape at different source locations remain distinct.
fn position_key(position: Position) -> Option<Position> {
    if position.is_synthetic() {
        None
    } else {
        Some(position)
    }
}

/// Owns every interned string, type, expression, time bound and
/// specification node for one compilation.
pub struct Store {
    interner: Interner,

    type_table: HashMap<TypeKind, TypeId>,
    type_nodes: Vec<TypeKind>,

    expr_table: HashMap<(ExprKind, Option<Position>), ExprId>,
    expr_nodes: Vec<ExprNode>,

    time_table: HashMap<(TimeKind, Option<Position>), TimeId>,
    time_nodes: Vec<TimeNode>,

    spec_table: HashMap<(SpecKind, Scope, Option<Position>), SpecId>,
    spec_nodes: Vec<SpecNode>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Store {
            interner: Interner::new(),
            type_table: HashMap::new(),
            type_nodes: Vec::new(),
            expr_table: HashMap::new(),
            expr_nodes: Vec::new(),
            time_table: HashMap::new(),
            time_nodes: Vec::new(),
            spec_table: HashMap::new(),
            spec_nodes: Vec::new(),
        }
    }

    // ---- interning -----------------------------------------------------

    pub fn intern(&mut self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    pub fn resolve(&self, s: Symbol) -> &str {
        self.interner.resolve(s)
    }

    // ---- types -----------------------------------------------------------

    fn type_of(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.type_table.get(&kind) {
            return id;
        }
        let id = TypeId(self.type_nodes.len() as u32);
        self.type_nodes.push(kind.clone());
        self.type_table.insert(kind, id);
        id
    }

    pub fn type_boolean(&mut self) -> TypeId {
        self.type_of(TypeKind::Boolean)
    }

    pub fn type_integer(&mut self) -> TypeId {
        self.type_of(TypeKind::Integer)
    }

    pub fn type_number(&mut self) -> TypeId {
        self.type_of(TypeKind::Number)
    }

    pub fn type_string(&mut self) -> TypeId {
        self.type_of(TypeKind::String)
    }

    pub fn type_struct(&mut self, members: Vec<(Symbol, TypeId)>) -> TypeId {
        self.type_of(TypeKind::Struct(members))
    }

    pub fn type_array(&mut self, element: TypeId, size: u32) -> TypeId {
        self.type_of(TypeKind::Array { element, size })
    }

    pub fn type_enum(&mut self, items: Vec<Symbol>) -> TypeId {
        self.type_of(TypeKind::Enum(items))
    }

    pub fn type_context(&mut self, module: ModuleId) -> TypeId {
        self.type_of(TypeKind::Context(module))
    }

    pub fn get_type(&self, id: TypeId) -> &TypeKind {
        &self.type_nodes[id.0 as usize]
    }

    // ---- expressions -----------------------------------------------------

    fn expr(&mut self, kind: ExprKind, position: Position) -> ExprId {
        let key = (kind, position_key(position));
        if let Some(&id) = self.expr_table.get(&key) {
            return id;
        }
        let id = ExprId(self.expr_nodes.len() as u32);
        self.expr_nodes.push(ExprNode {
            kind: key.0,
            position,
            ty: None,
        });
        self.expr_table.insert((key.0, key.1), id);
        id
    }

    pub fn expr_kind(&self, id: ExprId) -> ExprKind {
        self.expr_nodes[id.0 as usize].kind
    }

    pub fn expr_position(&self, id: ExprId) -> Position {
        self.expr_nodes[id.0 as usize].position
    }

    pub fn expr_type(&self, id: ExprId) -> Option<TypeId> {
        self.expr_nodes[id.0 as usize].ty
    }

    /// Single-assignment type slot: setting the same type twice is a no-op,
    /// setting a different type is a logic error in the caller (the type
    /// calculator never revisits a node once it has a type).
    pub fn set_expr_type(&mut self, id: ExprId, ty: TypeId) {
        let slot = &mut self.expr_nodes[id.0 as usize].ty;
        match slot {
            Some(existing) => debug_assert_eq!(*existing, ty, "type slot reassigned to a different type"),
            None => *slot = Some(ty),
        }
    }

    pub fn true_lit(&mut self, position: Position) -> ExprId {
        self.expr(ExprKind::True, position)
    }

    pub fn false_lit(&mut self, position: Position) -> ExprId {
        self.expr(ExprKind::False, position)
    }

    pub fn bool_lit(&mut self, value: bool, position: Position) -> ExprId {
        if value {
            self.true_lit(position)
        } else {
            self.false_lit(position)
        }
    }

    pub fn int_lit(&mut self, value: i64, position: Position) -> ExprId {
        self.expr(ExprKind::IntLit(value), position)
    }

    pub fn number_lit(&mut self, value: f64, position: Position) -> ExprId {
        self.expr(ExprKind::NumberLit(value.to_bits()), position)
    }

    pub fn string_lit(&mut self, value: &str, position: Position) -> ExprId {
        let sym = self.intern(value);
        self.expr(ExprKind::StringLit(sym), position)
    }

    pub fn neg(&mut self, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Neg(x), position)
    }

    pub fn add(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Add(l, r), position)
    }

    pub fn sub(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Sub(l, r), position)
    }

    pub fn mul(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Mul(l, r), position)
    }

    pub fn div(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Div(l, r), position)
    }

    pub fn rem(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Mod(l, r), position)
    }

    pub fn eq(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Eq(l, r), position)
    }

    pub fn ne(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Ne(l, r), position)
    }

    pub fn lt(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Lt(l, r), position)
    }

    pub fn le(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Le(l, r), position)
    }

    pub fn gt(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Gt(l, r), position)
    }

    pub fn ge(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Ge(l, r), position)
    }

    pub fn not(&mut self, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Not(x), position)
    }

    pub fn and(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::And(l, r), position)
    }

    pub fn or(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Or(l, r), position)
    }

    pub fn xor(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Xor(l, r), position)
    }

    pub fn imp(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Imp(l, r), position)
    }

    pub fn equ(&mut self, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Equ(l, r), position)
    }

    pub fn choice(&mut self, cond: ExprId, then: ExprId, else_: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Choice(cond, then, else_), position)
    }

    pub fn context(&mut self, name: Symbol, position: Position) -> ExprId {
        self.expr(ExprKind::Context(name), position)
    }

    pub fn data(&mut self, ctx: ExprId, name: Symbol, position: Position) -> ExprId {
        self.expr(ExprKind::Data(ctx, name), position)
    }

    pub fn conf(&mut self, ctx: ExprId, name: Symbol, position: Position) -> ExprId {
        self.expr(ExprKind::Conf(ctx, name), position)
    }

    pub fn member(&mut self, base: ExprId, name: Symbol, position: Position) -> ExprId {
        self.expr(ExprKind::Member(base, name), position)
    }

    pub fn index(&mut self, base: ExprId, idx: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Index(base, idx), position)
    }

    pub fn paren(&mut self, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Paren(x), position)
    }

    pub fn at(&mut self, name: Symbol, body: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::At(name, body), position)
    }

    pub fn f(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::F(time, x), position)
    }

    pub fn g(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::G(time, x), position)
    }

    pub fn xs(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Xs(time, x), position)
    }

    pub fn xw(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Xw(time, x), position)
    }

    pub fn us(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Us(time, l, r), position)
    }

    pub fn uw(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Uw(time, l, r), position)
    }

    pub fn rs(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Rs(time, l, r), position)
    }

    pub fn rw(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Rw(time, l, r), position)
    }

    pub fn o(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::O(time, x), position)
    }

    pub fn h(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::H(time, x), position)
    }

    pub fn ys(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Ys(time, x), position)
    }

    pub fn yw(&mut self, time: Option<TimeId>, x: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Yw(time, x), position)
    }

    pub fn ss(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Ss(time, l, r), position)
    }

    pub fn sw(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Sw(time, l, r), position)
    }

    pub fn ts(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Ts(time, l, r), position)
    }

    pub fn tw(&mut self, time: Option<TimeId>, l: ExprId, r: ExprId, position: Position) -> ExprId {
        self.expr(ExprKind::Tw(time, l, r), position)
    }

    pub fn integral(
        &mut self,
        time: Option<TimeId>,
        predicate: ExprId,
        integrand: ExprId,
        position: Position,
    ) -> ExprId {
        self.expr(ExprKind::Integral(time, predicate, integrand), position)
    }

    // ---- time bounds -----------------------------------------------------

    fn time(&mut self, kind: TimeKind, position: Position) -> TimeId {
        let key = (kind, position_key(position));
        if let Some(&id) = self.time_table.get(&key) {
            return id;
        }
        let id = TimeId(self.time_nodes.len() as u32);
        self.time_nodes.push(TimeNode {
            kind: key.0,
            position,
        });
        self.time_table.insert(key, id);
        id
    }

    pub fn time_interval(&mut self, lo: ExprId, hi: ExprId, position: Position) -> TimeId {
        self.time(TimeKind::Interval(lo, hi), position)
    }

    pub fn time_min(&mut self, lo: ExprId, position: Position) -> TimeId {
        self.time(TimeKind::Min(lo), position)
    }

    pub fn time_max(&mut self, hi: ExprId, position: Position) -> TimeId {
        self.time(TimeKind::Max(hi), position)
    }

    pub fn time_kind(&self, id: TimeId) -> TimeKind {
        self.time_nodes[id.0 as usize].kind
    }

    pub fn time_position(&self, id: TimeId) -> Position {
        self.time_nodes[id.0 as usize].position
    }

    /// Splits a time bound into its (lower, upper) expression halves, with
    /// `None` standing for an absent bound.
    pub fn time_bounds(&self, id: TimeId) -> (Option<ExprId>, Option<ExprId>) {
        match self.time_kind(id) {
            TimeKind::Interval(lo, hi) => (Some(lo), Some(hi)),
            TimeKind::Min(lo) => (Some(lo), None),
            TimeKind::Max(hi) => (None, Some(hi)),
        }
    }

    // ---- specification patterns -------------------------------------------

    pub fn spec(&mut self, kind: SpecKind, scope: Scope, position: Position) -> SpecId {
        let key = (kind, scope, position_key(position));
        if let Some(&id) = self.spec_table.get(&key) {
            return id;
        }
        let id = SpecId(self.spec_nodes.len() as u32);
        self.spec_nodes.push(SpecNode {
            kind: key.0,
            scope: key.1,
            position,
        });
        self.spec_table.insert(key, id);
        id
    }

    pub fn spec_kind(&self, id: SpecId) -> SpecKind {
        self.spec_nodes[id.0 as usize].kind
    }

    pub fn spec_scope(&self, id: SpecId) -> Scope {
        self.spec_nodes[id.0 as usize].scope
    }

    pub fn spec_position(&self, id: SpecId) -> Position {
        self.spec_nodes[id.0 as usize].position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Location, Position};

    fn pos(row: u32) -> Position {
        Position::new(Location::new(row, 0), Location::new(row, 1))
    }

    #[test]
    fn identical_nodes_hash_cons_to_the_same_id() {
        let mut store = Store::new();
        let a = store.int_lit(42, pos(1));
        let b = store.int_lit(42, pos(1));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_positions_keep_source_nodes_distinct() {
        let mut store = Store::new();
        let a = store.int_lit(42, pos(1));
        let b = store.int_lit(42, pos(2));
        assert_ne!(a, b);
    }

    #[test]
    fn synthetic_positions_collapse_regardless_of_origin() {
        let mut store = Store::new();
        let a = store.true_lit(Position::SYNTHETIC);
        let b = store.true_lit(Position::SYNTHETIC);
        assert_eq!(a, b);
    }

    #[test]
    fn different_payloads_never_collide() {
        let mut store = Store::new();
        let t = store.true_lit(pos(1));
        let f = store.false_lit(pos(1));
        assert_ne!(t, f);
    }

    #[test]
    fn type_slot_is_single_assignment() {
        let mut store = Store::new();
        let e = store.int_lit(1, pos(1));
        assert_eq!(store.expr_type(e), None);
        let int_ty = store.type_integer();
        store.set_expr_type(e, int_ty);
        assert_eq!(store.expr_type(e), Some(int_ty));
        // Re-asserting the same type is fine (idempotent memoization).
        store.set_expr_type(e, int_ty);
        assert_eq!(store.expr_type(e), Some(int_ty));
    }

    #[test]
    fn primitive_types_are_singletons() {
        let mut store = Store::new();
        assert_eq!(store.type_boolean(), store.type_boolean());
        assert_ne!(store.type_boolean(), store.type_integer());
    }

    #[test]
    fn struct_types_hash_cons_by_member_list() {
        let mut store = Store::new();
        let x = store.intern("x");
        let int_ty = store.type_integer();
        let a = store.type_struct(vec![(x, int_ty)]);
        let b = store.type_struct(vec![(x, int_ty)]);
        assert_eq!(a, b);
    }

    #[test]
    fn time_bounds_split_correctly() {
        let mut store = Store::new();
        let lo = store.int_lit(1, pos(1));
        let hi = store.int_lit(2, pos(1));
        let interval = store.time_interval(lo, hi, pos(1));
        assert_eq!(store.time_bounds(interval), (Some(lo), Some(hi)));
        let min = store.time_min(lo, pos(1));
        assert_eq!(store.time_bounds(min), (Some(lo), None));
        let max = store.time_max(hi, pos(1));
        assert_eq!(store.time_bounds(max), (None, Some(hi)));
    }
}
