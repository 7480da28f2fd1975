//! The type calculator: assigns every expression node a [`TypeId`] exactly
//! once, memoized through the store's single-assignment type slot.
//!
//! Grounded on `examples/original_source/core/visitors/typecalc.cpp`:
//! `TypeCalcImpl::make` checks `expr->type() == nullptr` before recursing
//! and computing, matching `Store::expr_type`/`set_expr_type`'s contract
//! here. The per-variant rules below (boolBool2Bool, bool2Bool,
//! nmbrNmbr2Bool, and the arithmetic integer/number promotion table) mirror
//! that file's visitor methods one for one.

use crate::ast::{ExprId, ExprKind};
use crate::error::TypeError;
use crate::module::Module;
use crate::position::Position;
use crate::store::Store;
use crate::types::{TypeId, TypeKind};

pub fn run(store: &mut Store, module: &Module, expr: ExprId) -> Result<TypeId, TypeError> {
    if let Some(ty) = store.expr_type(expr) {
        return Ok(ty);
    }
    let ty = compute(store, module, expr)?;
    store.set_expr_type(expr, ty);
    Ok(ty)
}

fn bool_ty(store: &mut Store) -> TypeId {
    store.type_boolean()
}

fn int_ty(store: &mut Store) -> TypeId {
    store.type_integer()
}

fn number_ty(store: &mut Store) -> TypeId {
    store.type_number()
}

fn string_ty(store: &mut Store) -> TypeId {
    store.type_string()
}

/// `Boolean -> Boolean -> Boolean`, e.g. `And`/`Or`/`Xor`/`Imp`/`Equ`.
fn bool_bool_to_bool(
    store: &mut Store,
    module: &Module,
    op: &'static str,
    l: ExprId,
    r: ExprId,
    position: Position,
) -> Result<TypeId, TypeError> {
    let lt = run(store, module, l)?;
    let rt = run(store, module, r)?;
    let boolean = bool_ty(store);
    if lt != boolean || rt != boolean {
        return Err(TypeError::BadOperand {
            op,
            detail: "both operands must be boolean".into(),
            position,
        });
    }
    Ok(boolean)
}

/// `Boolean -> Boolean`, e.g. `Not` and every temporal unary operator.
fn bool_to_bool(
    store: &mut Store,
    module: &Module,
    op: &'static str,
    x: ExprId,
    position: Position,
) -> Result<TypeId, TypeError> {
    let xt = run(store, module, x)?;
    let boolean = bool_ty(store);
    if xt != boolean {
        return Err(TypeError::BadOperand {
            op,
            detail: "operand must be boolean".into(),
            position,
        });
    }
    Ok(boolean)
}

/// `Boolean -> Boolean -> Boolean` for binary temporal operators (`Us`,
/// `Uw`, `Rs`, `Rw`, `Ss`, `Sw`, `Ts`, `Tw`): same shape as
/// `bool_bool_to_bool` but kept distinct since it has its own name in the
/// grounding source's visitor table.
fn bool_bool_to_bool_temporal(
    store: &mut Store,
    module: &Module,
    op: &'static str,
    l: ExprId,
    r: ExprId,
    position: Position,
) -> Result<TypeId, TypeError> {
    bool_bool_to_bool(store, module, op, l, r, position)
}

/// `(Number|Integer) -> (Number|Integer) -> Boolean`, or `String -> String ->
/// Boolean`, e.g. `Lt`/`Le`/`Gt`/`Ge` — strings compare lexicographically,
/// matching `nmbrNmbr2Bool`'s `string && string` case in the original.
fn numeric_numeric_to_bool(
    store: &mut Store,
    module: &Module,
    op: &'static str,
    l: ExprId,
    r: ExprId,
    position: Position,
) -> Result<TypeId, TypeError> {
    let lt = run(store, module, l)?;
    let rt = run(store, module, r)?;
    if lt == rt && lt == string_ty(store) {
        return Ok(bool_ty(store));
    }
    if !store.get_type(lt).is_numeric() || !store.get_type(rt).is_numeric() {
        return Err(TypeError::BadOperand {
            op,
            detail: "both operands must be numeric, or both string".into(),
            position,
        });
    }
    Ok(bool_ty(store))
}

/// `Number|Integer -> Number|Integer -> Number|Integer`, promoting to
/// `Number` if either side is `Number`, matching the original's implicit
/// integer-to-number promotion without ever reifying the conversion as an
/// expression node.
fn promote_numeric(
    store: &mut Store,
    module: &Module,
    op: &'static str,
    l: ExprId,
    r: ExprId,
    position: Position,
) -> Result<TypeId, TypeError> {
    let lt = run(store, module, l)?;
    let rt = run(store, module, r)?;
    let number = number_ty(store);
    let integer = int_ty(store);
    match (lt == number, rt == number, lt == integer, rt == integer) {
        (true, _, _, _) | (_, true, _, _) => Ok(number),
        (false, false, true, true) => Ok(integer),
        _ => Err(TypeError::BadOperand {
            op,
            detail: "both operands must be integer or number".into(),
            position,
        }),
    }
}

fn compute(store: &mut Store, module: &Module, expr: ExprId) -> Result<TypeId, TypeError> {
    let position = store.expr_position(expr);
    match store.expr_kind(expr) {
        ExprKind::True | ExprKind::False => Ok(bool_ty(store)),
        ExprKind::IntLit(_) => Ok(int_ty(store)),
        ExprKind::NumberLit(_) => Ok(number_ty(store)),
        ExprKind::StringLit(_) => Ok(string_ty(store)),

        ExprKind::Neg(x) => {
            let xt = run(store, module, x)?;
            if !store.get_type(xt).is_numeric() {
                return Err(TypeError::BadOperand {
                    op: "-",
                    detail: "operand must be numeric".into(),
                    position,
                });
            }
            Ok(xt)
        }
        ExprKind::Add(l, r) => promote_numeric(store, module, "+", l, r, position),
        ExprKind::Sub(l, r) => promote_numeric(store, module, "-", l, r, position),
        ExprKind::Mul(l, r) => promote_numeric(store, module, "*", l, r, position),
        ExprKind::Div(l, r) => promote_numeric(store, module, "/", l, r, position),
        ExprKind::Mod(l, r) => promote_numeric(store, module, "%", l, r, position),

        ExprKind::Eq(l, r) | ExprKind::Ne(l, r) => {
            let lt = run(store, module, l)?;
            let rt = run(store, module, r)?;
            let l_numeric = store.get_type(lt).is_numeric();
            let r_numeric = store.get_type(rt).is_numeric();
            if lt != rt && !(l_numeric && r_numeric) {
                return Err(TypeError::BadOperand {
                    op: "==",
                    detail: "operands must have the same type".into(),
                    position,
                });
            }
            Ok(bool_ty(store))
        }
        ExprKind::Lt(l, r) => numeric_numeric_to_bool(store, module, "<", l, r, position),
        ExprKind::Le(l, r) => numeric_numeric_to_bool(store, module, "<=", l, r, position),
        ExprKind::Gt(l, r) => numeric_numeric_to_bool(store, module, ">", l, r, position),
        ExprKind::Ge(l, r) => numeric_numeric_to_bool(store, module, ">=", l, r, position),

        ExprKind::Not(x) => bool_to_bool(store, module, "!", x, position),
        ExprKind::And(l, r) => bool_bool_to_bool(store, module, "&&", l, r, position),
        ExprKind::Or(l, r) => bool_bool_to_bool(store, module, "||", l, r, position),
        ExprKind::Xor(l, r) => bool_bool_to_bool(store, module, "xor", l, r, position),
        ExprKind::Imp(l, r) => bool_bool_to_bool(store, module, "=>", l, r, position),
        ExprKind::Equ(l, r) => bool_bool_to_bool(store, module, "<=>", l, r, position),

        ExprKind::Choice(cond, then, else_) => {
            let ct = run(store, module, cond)?;
            let boolean = bool_ty(store);
            if ct != boolean {
                return Err(TypeError::BadOperand {
                    op: "?:",
                    detail: "condition must be boolean".into(),
                    position,
                });
            }
            let tt = run(store, module, then)?;
            let et = run(store, module, else_)?;
            if tt == et {
                return Ok(tt);
            }
            let number = number_ty(store);
            let integer = int_ty(store);
            let promotes = (tt == number && et == integer) || (tt == integer && et == number);
            if promotes {
                Ok(number)
            } else {
                Err(TypeError::Mismatch {
                    op: "?:",
                    detail: "branches must agree in type".into(),
                    position,
                })
            }
        }

        ExprKind::Context(_) => Ok(store.type_context(module.id())),
        ExprKind::Data(ctx, name) => {
            check_context(store, module, ctx, position)?;
            module.get_data(name).ok_or_else(|| TypeError::Undeclared {
                name: store.resolve(name).to_string(),
                position,
            })
        }
        ExprKind::Conf(ctx, name) => {
            check_context(store, module, ctx, position)?;
            module.get_conf(name).ok_or_else(|| TypeError::Undeclared {
                name: store.resolve(name).to_string(),
                position,
            })
        }
        ExprKind::Member(base, name) => {
            let base_ty = run(store, module, base)?;
            match store.get_type(base_ty) {
                TypeKind::Struct(members) => members
                    .iter()
                    .find(|(m, _)| *m == name)
                    .map(|(_, ty)| *ty)
                    .ok_or_else(|| TypeError::NotAMember {
                        name: store.resolve(name).to_string(),
                        position,
                    }),
                TypeKind::Enum(items) => {
                    if items.contains(&name) {
                        Ok(bool_ty(store))
                    } else {
                        Err(TypeError::NotAMember {
                            name: store.resolve(name).to_string(),
                            position,
                        })
                    }
                }
                TypeKind::Context(module_id) => {
                    let module_id = *module_id;
                    debug_assert_eq!(module_id, module.id());
                    module
                        .resolve_context_member(name)
                        .ok_or_else(|| TypeError::NotAMember {
                            name: store.resolve(name).to_string(),
                            position,
                        })
                }
                _ => Err(TypeError::NotComposite { position }),
            }
        }
        ExprKind::Index(base, idx) => {
            let base_ty = run(store, module, base)?;
            let element = match store.get_type(base_ty) {
                TypeKind::Array { element, .. } => *element,
                _ => return Err(TypeError::NotIndexable { position }),
            };
            let idx_ty = run(store, module, idx)?;
            let integer = int_ty(store);
            if idx_ty != integer {
                return Err(TypeError::IndexNotInteger { position });
            }
            Ok(element)
        }
        ExprKind::Paren(x) => run(store, module, x),

        ExprKind::At(_, body) => run(store, module, body),

        ExprKind::F(_, x) | ExprKind::G(_, x) => bool_to_bool(store, module, "temporal", x, position),
        ExprKind::Xs(_, x) | ExprKind::Xw(_, x) => bool_to_bool(store, module, "temporal", x, position),
        ExprKind::O(_, x) | ExprKind::H(_, x) => bool_to_bool(store, module, "temporal", x, position),
        ExprKind::Ys(_, x) | ExprKind::Yw(_, x) => bool_to_bool(store, module, "temporal", x, position),

        ExprKind::Us(_, l, r)
        | ExprKind::Uw(_, l, r)
        | ExprKind::Rs(_, l, r)
        | ExprKind::Rw(_, l, r)
        | ExprKind::Ss(_, l, r)
        | ExprKind::Sw(_, l, r)
        | ExprKind::Ts(_, l, r)
        | ExprKind::Tw(_, l, r) => bool_bool_to_bool_temporal(store, module, "temporal", l, r, position),

        ExprKind::Integral(_, predicate, integrand) => {
            let pt = run(store, module, predicate)?;
            let boolean = bool_ty(store);
            if pt != boolean {
                return Err(TypeError::BadOperand {
                    op: "integral",
                    detail: "predicate must be boolean".into(),
                    position,
                });
            }
            let it = run(store, module, integrand)?;
            if !store.get_type(it).is_numeric() {
                return Err(TypeError::BadOperand {
                    op: "integral",
                    detail: "integrand must be numeric".into(),
                    position,
                });
            }
            Ok(it)
        }
    }
}

fn check_context(store: &mut Store, module: &Module, ctx: ExprId, position: Position) -> Result<(), TypeError> {
    let ctx_ty = run(store, module, ctx)?;
    match store.get_type(ctx_ty) {
        TypeKind::Context(_) => Ok(()),
        _ => Err(TypeError::NotComposite { position }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleId;
    use crate::position::Position;

    fn fresh() -> (Store, Module) {
        let mut store = Store::new();
        let module = Module::new(ModuleId(0), &mut store, "m");
        (store, module)
    }

    #[test]
    fn literals_get_their_primitive_type() {
        let (mut store, module) = fresh();
        let e = store.int_lit(1, Position::SYNTHETIC);
        let ty = run(&mut store, &module, e).unwrap();
        assert_eq!(ty, store.type_integer());
    }

    #[test]
    fn type_slot_is_memoized() {
        let (mut store, module) = fresh();
        let e = store.int_lit(1, Position::SYNTHETIC);
        let first = run(&mut store, &module, e).unwrap();
        let second = run(&mut store, &module, e).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn addition_promotes_to_number() {
        let (mut store, module) = fresh();
        let i = store.int_lit(1, Position::SYNTHETIC);
        let n = store.number_lit(2.0, Position::SYNTHETIC);
        let sum = store.add(i, n, Position::SYNTHETIC);
        let ty = run(&mut store, &module, sum).unwrap();
        assert_eq!(ty, store.type_number());
    }

    #[test]
    fn addition_of_two_integers_stays_integer() {
        let (mut store, module) = fresh();
        let a = store.int_lit(1, Position::SYNTHETIC);
        let b = store.int_lit(2, Position::SYNTHETIC);
        let sum = store.add(a, b, Position::SYNTHETIC);
        let ty = run(&mut store, &module, sum).unwrap();
        assert_eq!(ty, store.type_integer());
    }

    #[test]
    fn boolean_operator_rejects_non_boolean_operand() {
        let (mut store, module) = fresh();
        let i = store.int_lit(1, Position::SYNTHETIC);
        let t = store.true_lit(Position::SYNTHETIC);
        let and = store.and(i, t, Position::SYNTHETIC);
        let err = run(&mut store, &module, and).unwrap_err();
        assert!(matches!(err, TypeError::BadOperand { .. }));
    }

    #[test]
    fn context_data_access_resolves_declared_property() {
        let (mut store, mut module) = fresh();
        let int_ty = store.type_integer();
        module
            .add_data(&mut store, "speed", int_ty, Position::SYNTHETIC)
            .unwrap();
        let curr = store.intern("__curr__");
        let ctx = store.context(curr, Position::SYNTHETIC);
        let speed_sym = store.intern("speed");
        let access = store.data(ctx, speed_sym, Position::SYNTHETIC);
        let ty = run(&mut store, &module, access).unwrap();
        assert_eq!(ty, int_ty);
    }

    #[test]
    fn member_access_on_struct_type() {
        let (mut store, module) = fresh();
        let x = store.intern("x");
        let int_ty = store.type_integer();
        let struct_ty = store.type_struct(vec![(x, int_ty)]);
        // Simulate a struct-typed value by giving an opaque leaf node that
        // type.
        let leaf = store.int_lit(0, Position::SYNTHETIC);
        store.set_expr_type(leaf, struct_ty);
        let access = store.member(leaf, x, Position::SYNTHETIC);
        let ty = run(&mut store, &module, access).unwrap();
        assert_eq!(ty, int_ty);
    }

    #[test]
    fn choice_requires_matching_branch_types() {
        let (mut store, module) = fresh();
        let cond = store.true_lit(Position::SYNTHETIC);
        let then = store.int_lit(1, Position::SYNTHETIC);
        let else_ = store.true_lit(Position::SYNTHETIC);
        let choice = store.choice(cond, then, else_, Position::SYNTHETIC);
        let err = run(&mut store, &module, choice).unwrap_err();
        assert!(matches!(err, TypeError::Mismatch { .. }));
    }
}
