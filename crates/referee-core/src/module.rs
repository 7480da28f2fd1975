//! The module symbol table: declared types, properties ("data"),
//! configuration values, and the context-name stack used while rewriting
//! `At` bindings.
//!
//! Grounded on `examples/original_source/core/module.cpp`: the constructor
//! pre-registers the four primitive type names and the `__time__` property,
//! `addType`/`addData`/`addConf` reject redeclaration, and `getType`/`getData`/
//! `getConf` reject lookups of undeclared names. `pushContext`/`popContext`/
//! `hasContext` are carried over for the same bookkeeping role, even though
//! (per `rewrite.rs`'s grounding notes) the actual `__curr__` substitution is
//! driven by a separate `bind` field the rewrite pass threads through its own
//! recursion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::intern::Symbol;
use crate::position::Position;
use crate::store::Store;
use crate::types::TypeId;

/// Identifies a [`Module`] without borrowing it. Embedded in
/// [`crate::types::TypeKind::Context`] so that type carries no lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// An insertion-ordered name -> type table with O(1) lookup, used for each
/// of a module's three declaration namespaces (types, properties,
/// configuration).
#[derive(Debug, Default, Clone)]
struct DeclTable {
    order: Vec<Symbol>,
    index: HashMap<Symbol, usize>,
    types: Vec<TypeId>,
}

impl DeclTable {
    fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, name: Symbol, ty: TypeId) -> Result<usize, ()> {
        if self.index.contains_key(&name) {
            return Err(());
        }
        let idx = self.order.len();
        self.order.push(name);
        self.types.push(ty);
        self.index.insert(name, idx);
        Ok(idx)
    }

    fn get(&self, name: Symbol) -> Option<TypeId> {
        self.index.get(&name).map(|&i| self.types[i])
    }

    fn index_of(&self, name: Symbol) -> Option<usize> {
        self.index.get(&name).copied()
    }

    fn has(&self, name: Symbol) -> bool {
        self.index.contains_key(&name)
    }

    fn names(&self) -> &[Symbol] {
        &self.order
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// The symbol table for one specification module: the declared types,
/// properties, and configuration values a spec's expressions resolve
/// against, plus the context-name stack used while lowering `At` bindings.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    name: String,
    types: DeclTable,
    data: DeclTable,
    conf: DeclTable,
    context_stack: Vec<Symbol>,
}

impl Module {
    /// Creates a new module, pre-registering the four primitive type names
    /// and the reserved `__time__` property, exactly as the original
    /// constructor does.
    pub fn new(id: ModuleId, store: &mut Store, name: &str) -> Self {
        let mut module = Module {
            id,
            name: name.to_string(),
            types: DeclTable::new(),
            data: DeclTable::new(),
            conf: DeclTable::new(),
            context_stack: Vec::new(),
        };

        let boolean = store.intern("boolean");
        let integer = store.intern("integer");
        let number = store.intern("number");
        let string = store.intern("string");
        let time = store.intern("__time__");

        let bool_ty = store.type_boolean();
        let int_ty = store.type_integer();
        let number_ty = store.type_number();
        let string_ty = store.type_string();

        module.types.add(boolean, bool_ty).expect("fresh module");
        module.types.add(integer, int_ty).expect("fresh module");
        module.types.add(number, number_ty).expect("fresh module");
        module.types.add(string, string_ty).expect("fresh module");
        module.data.add(time, int_ty).expect("fresh module");

        module
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn sym(&mut self, store: &mut Store, name: &str) -> Symbol {
        store.intern(name)
    }

    pub fn add_type(
        &mut self,
        store: &mut Store,
        name: &str,
        ty: TypeId,
        position: Position,
    ) -> Result<(), TypeError> {
        let sym = self.sym(store, name);
        self.types.add(sym, ty).map_err(|_| TypeError::Redeclared {
            name: name.to_string(),
            position,
        })
    }

    pub fn add_data(
        &mut self,
        store: &mut Store,
        name: &str,
        ty: TypeId,
        position: Position,
    ) -> Result<(), TypeError> {
        let sym = self.sym(store, name);
        self.data.add(sym, ty).map_err(|_| TypeError::Redeclared {
            name: name.to_string(),
            position,
        })
    }

    pub fn add_conf(
        &mut self,
        store: &mut Store,
        name: &str,
        ty: TypeId,
        position: Position,
    ) -> Result<(), TypeError> {
        let sym = self.sym(store, name);
        self.conf.add(sym, ty).map_err(|_| TypeError::Redeclared {
            name: name.to_string(),
            position,
        })
    }

    pub fn get_type(&self, sym: Symbol) -> Option<TypeId> {
        self.types.get(sym)
    }

    pub fn get_data(&self, sym: Symbol) -> Option<TypeId> {
        self.data.get(sym)
    }

    pub fn get_conf(&self, sym: Symbol) -> Option<TypeId> {
        self.conf.get(sym)
    }

    pub fn has_type(&self, sym: Symbol) -> bool {
        self.types.has(sym)
    }

    pub fn has_data(&self, sym: Symbol) -> bool {
        self.data.has(sym)
    }

    pub fn has_conf(&self, sym: Symbol) -> bool {
        self.conf.has(sym)
    }

    pub fn data_index(&self, sym: Symbol) -> Option<usize> {
        self.data.index_of(sym)
    }

    pub fn conf_index(&self, sym: Symbol) -> Option<usize> {
        self.conf.index_of(sym)
    }

    pub fn type_names(&self) -> &[Symbol] {
        self.types.names()
    }

    pub fn data_names(&self) -> &[Symbol] {
        self.data.names()
    }

    pub fn conf_names(&self) -> &[Symbol] {
        self.conf.names()
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn conf_len(&self) -> usize {
        self.conf.len()
    }

    /// Consults configuration first, then properties, matching the lookup
    /// order `module.cpp` documents for member access through a context
    /// value.
    pub fn resolve_context_member(&self, sym: Symbol) -> Option<TypeId> {
        self.get_conf(sym).or_else(|| self.get_data(sym))
    }

    pub fn push_context(&mut self, name: Symbol) {
        self.context_stack.push(name);
    }

    pub fn pop_context(&mut self) {
        self.context_stack.pop();
    }

    pub fn has_context(&self, name: Symbol) -> bool {
        self.context_stack.contains(&name)
    }

    pub fn current_context(&self) -> Option<Symbol> {
        self.context_stack.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn primitives_preregistered() {
        let mut store = Store::new();
        let module = Module::new(ModuleId(0), &mut store, "m");
        let boolean = store.intern("boolean");
        assert_eq!(module.get_type(boolean), Some(store.type_boolean()));
        let time = store.intern("__time__");
        assert_eq!(module.get_data(time), Some(store.type_integer()));
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut store = Store::new();
        let mut module = Module::new(ModuleId(0), &mut store, "m");
        let int_ty = store.type_integer();
        module
            .add_data(&mut store, "speed", int_ty, Position::SYNTHETIC)
            .unwrap();
        let err = module
            .add_data(&mut store, "speed", int_ty, Position::SYNTHETIC)
            .unwrap_err();
        assert!(matches!(err, TypeError::Redeclared { .. }));
    }

    #[test]
    fn declaration_order_is_preserved_for_indexing() {
        let mut store = Store::new();
        let mut module = Module::new(ModuleId(0), &mut store, "m");
        let int_ty = store.type_integer();
        module
            .add_data(&mut store, "speed", int_ty, Position::SYNTHETIC)
            .unwrap();
        module
            .add_data(&mut store, "altitude", int_ty, Position::SYNTHETIC)
            .unwrap();
        let speed = store.intern("speed");
        let altitude = store.intern("altitude");
        // __time__ is registered first by the constructor.
        assert_eq!(module.data_index(speed), Some(1));
        assert_eq!(module.data_index(altitude), Some(2));
    }

    #[test]
    fn context_member_prefers_configuration() {
        let mut store = Store::new();
        let mut module = Module::new(ModuleId(0), &mut store, "m");
        let int_ty = store.type_integer();
        let bool_ty = store.type_boolean();
        module
            .add_data(&mut store, "armed", int_ty, Position::SYNTHETIC)
            .unwrap();
        module
            .add_conf(&mut store, "armed", bool_ty, Position::SYNTHETIC)
            .unwrap();
        let armed = store.intern("armed");
        assert_eq!(module.resolve_context_member(armed), Some(bool_ty));
    }

    #[test]
    fn context_stack_tracks_bound_names() {
        let mut store = Store::new();
        let mut module = Module::new(ModuleId(0), &mut store, "m");
        let starting = store.intern("starting");
        assert!(!module.has_context(starting));
        module.push_context(starting);
        assert!(module.has_context(starting));
        assert_eq!(module.current_context(), Some(starting));
        module.pop_context();
        assert!(!module.has_context(starting));
    }
}
