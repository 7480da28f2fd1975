//! Structured errors for the module symbol table and the type calculator.
//!
//! Grounded on `torc-spec::error::SpecError` and `torc-core::graph::GraphError`
//! (both `thiserror` enums with one variant per failure mode and no
//! catch-all `String` bucket).

use thiserror::Error;

use crate::position::Position;

/// Failures raised while populating or querying a [`crate::module::Module`]'s
/// symbol table.
#[derive(Debug, Clone, Error)]
pub enum TypeError {
    #[error("'{name}' is already declared at {position}")]
    Redeclared { name: String, position: Position },

    #[error("'{name}' is not declared at {position}")]
    Undeclared { name: String, position: Position },

    #[error("'{name}' is not a member of this type at {position}")]
    NotAMember { name: String, position: Position },

    #[error("member access on a non-composite type at {position}")]
    NotComposite { position: Position },

    #[error("index applied to a non-array type at {position}")]
    NotIndexable { position: Position },

    #[error("index expression is not of type integer at {position}")]
    IndexNotInteger { position: Position },

    #[error("bad operand type(s) for '{op}' at {position}: {detail}")]
    BadOperand {
        op: &'static str,
        detail: String,
        position: Position,
    },

    #[error("branches of '{op}' disagree in type at {position}: {detail}")]
    Mismatch {
        op: &'static str,
        detail: String,
        position: Position,
    },
}

impl TypeError {
    pub fn position(&self) -> Position {
        match self {
            TypeError::Redeclared { position, .. }
            | TypeError::Undeclared { position, .. }
            | TypeError::NotAMember { position, .. }
            | TypeError::NotComposite { position }
            | TypeError::NotIndexable { position }
            | TypeError::IndexNotInteger { position }
            | TypeError::BadOperand { position, .. }
            | TypeError::Mismatch { position, .. } => *position,
        }
    }
}

/// Raised when a pass encounters a node shape it was not built to handle.
/// Unlike [`TypeError`] this never originates from user input: it signals a
/// bug in the pipeline (a pass given an input some earlier pass should have
/// already eliminated).
#[derive(Debug, Clone, Error)]
#[error("internal error in '{pass}' at {position}: {detail}")]
pub struct InternalError {
    pub pass: &'static str,
    pub detail: String,
    pub position: Position,
}

/// The union of everything the public pipeline functions can fail with.
#[derive(Debug, Clone, Error)]
pub enum RefereeError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}
