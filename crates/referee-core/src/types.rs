//! The type algebra: four primitives plus the composite shapes a module's
//! property/configuration declarations can name, and the synthetic
//! [`TypeKind::Context`] type assigned to context-access expressions.
//!
//! Grounded on `torc-core::types::Type` for the overall shape of a closed,
//! hash-consed type enum, and on `examples/original_source/core/syntax.hpp`
//! (`TypeVoid`/`TypeBoolean`/`TypeInteger`/`TypeNumber`/`TypeString`/`Named<T>`/
//! `TypeStruct`/`TypeArray`/`TypeEnum`) for which shapes exist.

use serde::{Deserialize, Serialize};

use crate::intern::Symbol;
use crate::module::ModuleId;

/// A hash-consed handle to a [`TypeKind`] stored in a [`crate::store::Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub(crate) u32);

/// The data model's type algebra.
///
/// `Struct`, `Array` and `Enum` carry [`Symbol`]s rather than strings so that
/// structural equality (and therefore hash-consing) is a cheap derived
/// `Eq`/`Hash` rather than a string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Boolean,
    Integer,
    Number,
    String,
    /// An ordered record type. Member order is significant: it is the
    /// declaration order, and it is what member-index queries answer.
    Struct(Vec<(Symbol, TypeId)>),
    /// A fixed- or dynamic-size array. `size == 0` means dynamically sized.
    Array { element: TypeId, size: u32 },
    /// A closed enumeration of named alternatives.
    Enum(Vec<Symbol>),
    /// The type of an access-root expression (`Context`, and anything
    /// reached from it via `Data`/`Conf`/`Member`). Carries the owning
    /// module as an index rather than a pointer, per the arena-of-modules
    /// convention described in `SPEC_FULL.md`.
    Context(ModuleId),
}

impl TypeKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeKind::Integer | TypeKind::Number)
    }
}
