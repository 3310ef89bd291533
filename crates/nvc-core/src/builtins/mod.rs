//! Built-in operator catalogue and dispatch.
//!
//! Every call argument is assumed to already have been folded by the
//! caller (`eval::reduce_call`) to a literal node; this module only decides
//! which category's reducer, if any, the fully-folded argument list matches.

pub mod array;
pub mod integer;
pub mod logical;
pub mod mixed;
pub mod real;

use crate::fold::{folded_bool, folded_enum, folded_int, folded_real};
use nvc_common::{LiteralValue, Node};

/// Try each operand category in a fixed order — int, enum, logical, real,
/// string — and apply the first whose operands all fold and whose name is
/// recognized in that category. Mixed-universal and array names don't
/// collide with any of those five, so they're tried unconditionally
/// afterward.
///
/// Enum-position comparison is tried before logical: `eq`/`neq` are listed
/// under both "Integer/enum comparison" and the logical operator set, and a
/// multi-valued enumeration's comparison must be by ordinal (`state = IDLE`
/// comparing positions 3 and 0, say) rather than by `folded_bool`'s
/// any-nonzero-position-is-true reading, which would wrongly call any two
/// non-zero states equal.
pub fn apply(name: &str, args: &[Node]) -> Option<Node> {
    if integer::is_arithmetic_name(name) || integer::is_comparison_name(name) {
        if let Some(ints) = fold_all(args, folded_int) {
            if integer::is_arithmetic_name(name) {
                if let Some(n) = integer::reduce_arithmetic(name, &ints) {
                    return Some(n);
                }
            } else if let Some(n) = integer::reduce_comparison(name, &ints) {
                return Some(n);
            }
        }
    }

    if integer::is_comparison_name(name) {
        if let Some(positions) = fold_all(args, |n| folded_enum(n).map(i64::from)) {
            if let Some(n) = integer::reduce_comparison(name, &positions) {
                return Some(n);
            }
        }
    }

    if logical::is_logical_name(name) {
        if let Some(bools) = fold_all(args, folded_bool) {
            if let Some(n) = logical::reduce(name, &bools) {
                return Some(n);
            }
        }
    }

    if real::is_arithmetic_name(name) || real::is_comparison_name(name) {
        if let Some(reals) = fold_all(args, folded_real) {
            if real::is_arithmetic_name(name) {
                if let Some(n) = real::reduce_arithmetic(name, &reals) {
                    return Some(n);
                }
            } else if let Some(n) = real::reduce_comparison(name, &reals) {
                return Some(n);
            }
        }
    }

    if mixed::is_mixed_name(name) {
        if let Some(n) = apply_mixed(name, args) {
            return Some(n);
        }
    }

    if array::is_array_name(name) {
        if let Some(strs) = fold_all_strings(args) {
            if let Some(n) = array::reduce(name, &strs) {
                return Some(n);
            }
        }
    }

    None
}

fn fold_all<T>(args: &[Node], f: impl Fn(&Node) -> Option<T>) -> Option<Vec<T>> {
    args.iter().map(&f).collect()
}

fn fold_all_strings(args: &[Node]) -> Option<Vec<&str>> {
    args.iter()
        .map(|n| match n.literal.as_ref() {
            Some(LiteralValue::Str(s)) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

fn apply_mixed(name: &str, args: &[Node]) -> Option<Node> {
    let [a, b] = args else { return None };
    match name {
        "mulri" | "divri" => mixed::reduce(name, folded_real(a)?, folded_int(b)?),
        "mulir" => mixed::reduce(name, folded_real(b)?, folded_int(a)?),
        _ => None,
    }
}
