//! Per-node-kind bounds rules, other than case-statement coverage
//! (see `case_checks`).

use crate::ctx::Options;
use crate::eval::fold_expr;
use crate::fold::{folded_bounds, folded_enum, folded_int, folded_length};
use nvc_common::{Diagnostic, Loc, Node, Reporter, Type};

pub fn report(errors: &mut i32, reporter: &mut Reporter, loc: Loc, message: impl Into<String>) {
    *errors += 1;
    reporter(Diagnostic::error(loc, message));
}

fn display_name(node: &Node) -> &str {
    node.ident.map(|i| i.as_str()).unwrap_or("<anonymous>")
}

/// String literal length against a constrained subtype.
pub fn check_string_literal(node: &Node, errors: &mut i32, reporter: &mut Reporter) {
    if node.subkind != nvc_common::SubKind::StringLit {
        return;
    }
    let (Some(ty), Some(nvc_common::LiteralValue::Str(s))) = (node.ty.as_deref(), node.literal.as_ref()) else {
        return;
    };
    let Some(dims) = ty.array_dims() else { return };
    let Some(dim) = dims.first() else { return };
    let Some(n) = folded_length(dim) else { return };
    if s.chars().count() as i64 != n {
        report(
            errors,
            reporter,
            node.loc,
            format!("string literal length {} does not match constrained length {n}", s.chars().count()),
        );
    }
}

/// Call arguments: array-formal dimension matching
/// and integer-formal range membership.
pub fn check_call_args(call: &Node, opts: &Options, errors: &mut i32, reporter: &mut Reporter) {
    let Some(target) = call.reference.as_deref() else { return };
    for (formal, actual) in target.params.iter().zip(call.params.iter()) {
        let Some(formal_ty) = formal.ty.as_deref() else { continue };
        if formal_ty.is_array() {
            let (Some(actual_ty), Some(formal_dims)) = (actual.ty.as_deref(), formal_ty.array_dims()) else {
                continue;
            };
            let Some(actual_dims) = actual_ty.array_dims() else { continue };
            for (i, (fd, ad)) in formal_dims.iter().zip(actual_dims.iter()).enumerate() {
                if let (Some(flen), Some(alen)) = (folded_length(fd), folded_length(ad)) {
                    if flen != alen {
                        report(
                            errors,
                            reporter,
                            actual.loc,
                            format!(
                                "argument to {} dimension {} has length {alen}, formal expects {flen}",
                                display_name(target),
                                i + 1
                            ),
                        );
                    }
                }
            }
        } else if formal_ty.is_integer() {
            let folded = fold_expr(actual, opts);
            let (Some(v), Some(range)) = (folded_int(&folded), formal_ty.scalar_range()) else {
                continue;
            };
            if let Some((lo, hi)) = folded_bounds(range) {
                if v < lo || v > hi {
                    report(
                        errors,
                        reporter,
                        actual.loc,
                        format!("argument to {} is {v}, out of bounds {lo} to {hi}", display_name(target)),
                    );
                }
            }
        }
    }
}

/// Array reference: marks `elide_bounds` when every
/// index is static and in-range.
pub fn check_array_ref(node: &mut Node, opts: &Options, errors: &mut i32, reporter: &mut Reporter) {
    let Some(target) = node.target.as_deref() else { return };
    let Some(dims) = target.ty.as_deref().and_then(Type::array_dims).map(|d| d.to_vec()) else {
        return;
    };

    let mut all_static_in_bounds = true;
    for (i, index) in node.params.iter().enumerate() {
        let Some(dim) = dims.get(i) else { continue };
        let folded = fold_expr(index, opts);
        let ordinal = folded_int(&folded).or_else(|| folded_enum(&folded).map(i64::from));
        match (ordinal, folded_bounds(dim)) {
            (Some(v), Some((lo, hi))) => {
                if v < lo || v > hi {
                    all_static_in_bounds = false;
                    report(
                        errors,
                        reporter,
                        index.loc,
                        format!("array {} index {v} out of bounds {lo} to {hi}", display_name(target)),
                    );
                }
            }
            _ => all_static_in_bounds = false,
        }
    }

    if all_static_in_bounds && !node.params.is_empty() {
        node.mark_elide_bounds();
    }
}

/// Array slice: both endpoints within the dimension
/// range; a reverse-direction (null) slice is not an error.
pub fn check_array_slice(node: &Node, opts: &Options, errors: &mut i32, reporter: &mut Reporter) {
    let (Some(target), Some(slice_range)) = (node.target.as_deref(), node.range.as_deref().and_then(Node::as_range))
    else {
        return;
    };
    let Some(dim) = target.ty.as_deref().and_then(Type::array_dims).and_then(|d| d.first().cloned()) else {
        return;
    };
    let Some((dim_lo, dim_hi)) = folded_bounds(&dim) else { return };

    let left = fold_expr(&slice_range.left, opts);
    let right = fold_expr(&slice_range.right, opts);
    let (Some(l), Some(r)) = (folded_int(&left), folded_int(&right)) else { return };

    let is_null = match slice_range.dir {
        nvc_common::Dir::To => l > r,
        nvc_common::Dir::DownTo => l < r,
        nvc_common::Dir::NonNumeric => return,
    };
    if is_null {
        return;
    }
    for v in [l, r] {
        if v < dim_lo || v > dim_hi {
            report(
                errors,
                reporter,
                node.loc,
                format!("array {} slice bound {v} out of bounds {dim_lo} to {dim_hi}", display_name(target)),
            );
        }
    }
}

/// Declaration: array dimension ranges within the
/// index subtype's own range, skipped for null (reversed) ranges.
pub fn check_declaration(node: &Node, errors: &mut i32, reporter: &mut Reporter) {
    let Some(ty) = node.ty.as_deref() else { return };
    let Some(dims) = ty.array_dims() else { return };
    let Some(index_types) = ty.unconstrained_index_types() else { return };
    for (dim, index_ty) in dims.iter().zip(index_types.iter()) {
        let Some(index_range) = index_ty.scalar_range() else { continue };
        let Some((dim_lo, dim_hi)) = folded_bounds(dim) else { continue };
        if dim_lo > dim_hi {
            continue; // null range: direction reversal, not checked
        }
        let Some((idx_lo, idx_hi)) = folded_bounds(index_range) else { continue };
        if dim_lo < idx_lo || dim_hi > idx_hi {
            report(
                errors,
                reporter,
                node.loc,
                format!(
                    "declared range {dim_lo} to {dim_hi} falls outside index range {idx_lo} to {idx_hi}"
                ),
            );
        }
    }
}

/// Signal and variable assignment: target dimension/range bounds.
pub fn check_assignment(node: &Node, opts: &Options, errors: &mut i32, reporter: &mut Reporter) {
    let (Some(target), Some(value)) = (node.target.as_deref(), node.value.as_deref()) else {
        return;
    };
    let Some(target_ty) = target.ty.as_deref() else { return };

    if target_ty.is_array() {
        let (Some(target_dims), Some(value_ty)) = (target_ty.array_dims(), value.ty.as_deref()) else {
            return;
        };
        let Some(value_dims) = value_ty.array_dims() else { return };
        for (i, (td, vd)) in target_dims.iter().zip(value_dims.iter()).enumerate() {
            if let (Some(tlen), Some(vlen)) = (folded_length(td), folded_length(vd)) {
                if tlen != vlen {
                    report(
                        errors,
                        reporter,
                        node.loc,
                        format!("assignment dimension {} has length {vlen}, target expects {tlen}", i + 1),
                    );
                }
            }
        }
        return;
    }

    let Some(range) = target_ty.scalar_range() else { return };
    let Some((lo, hi)) = folded_bounds(range) else { return };
    let folded = fold_expr(value, opts);
    let ordinal = folded_int(&folded).or_else(|| folded_enum(&folded).map(i64::from));
    if let Some(v) = ordinal {
        if v < lo || v > hi {
            report(errors, reporter, node.loc, format!("assigned value {v} out of bounds {lo} to {hi}"));
        }
    }
}

/// Type conversion: integer target, real source
/// via truncation.
pub fn check_type_conversion(node: &Node, opts: &Options, errors: &mut i32, reporter: &mut Reporter) {
    let Some(target_ty) = node.ty.as_deref() else { return };
    if !target_ty.is_integer() {
        return;
    }
    let Some(range) = target_ty.scalar_range() else { return };
    let Some((lo, hi)) = folded_bounds(range) else { return };
    let folded = fold_expr(node, opts);
    let Some(v) = folded_int(&folded) else { return };
    if v < lo || v > hi {
        report(errors, reporter, node.loc, format!("converted value {v} out of bounds {lo} to {hi}"));
    }
}

const ATTR_NAMES_WITH_DIM: &[&str] = &["length", "low", "high", "left", "right"];

/// Attribute reference: an explicit dimension
/// argument must satisfy `1 <= d <= ndims`.
pub fn check_attribute_ref(node: &Node, errors: &mut i32, reporter: &mut Reporter) {
    let Some(name) = node.ident2.map(|i| i.as_str()) else { return };
    if !ATTR_NAMES_WITH_DIM.contains(&name) {
        return;
    }
    let (Some(dim_arg), Some(target)) = (node.params.first(), node.target.as_deref()) else {
        return;
    };
    let Some(d) = folded_int(dim_arg) else { return };
    let ndims = target
        .ty
        .as_deref()
        .and_then(Type::array_dims)
        .map(|dims| dims.len() as i64)
        .unwrap_or(1);
    if d < 1 || d > ndims {
        report(errors, reporter, node.loc, format!("dimension {d} out of range 1 to {ndims}"));
    }
}

/// Aggregate: bounds come from the constraint, or from
/// the index subtype when the target is unconstrained; element count must
/// match the expected length unless an `others` choice is present.
pub fn check_aggregate(node: &Node, errors: &mut i32, reporter: &mut Reporter) {
    let Some(ty) = node.ty.as_deref() else { return };
    let dim_range = ty
        .array_dims()
        .and_then(|d| d.first())
        .cloned()
        .or_else(|| ty.unconstrained_index_types().and_then(|t| t.first()).and_then(|t| t.scalar_range().cloned()));
    let Some(dim_range) = dim_range else { return };
    let Some((lo, hi)) = folded_bounds(&dim_range) else { return };

    let mut has_others = false;
    let mut count: i64 = 0;
    for assoc in &node.assocs {
        match assoc.subkind {
            nvc_common::SubKind::Others => has_others = true,
            nvc_common::SubKind::Named => {
                for choice in &assoc.params {
                    if let Some(v) = folded_int(choice) {
                        if v < lo || v > hi {
                            report(errors, reporter, choice.loc, format!("aggregate choice {v} out of bounds {lo} to {hi}"));
                        }
                    }
                    count += 1;
                }
            }
            nvc_common::SubKind::RangeChoice => {
                if let Some(range) = assoc.range.as_deref().and_then(Node::as_range) {
                    if let Some((rlo, rhi)) = folded_bounds(&range) {
                        if rlo < lo || rhi > hi {
                            report(
                                errors,
                                reporter,
                                assoc.loc,
                                format!("aggregate range choice {rlo} to {rhi} out of bounds {lo} to {hi}"),
                            );
                        }
                        count += (rhi - rlo + 1).max(0);
                    }
                }
            }
            _ => count += 1,
        }
    }

    if !has_others {
        if let Some(expected) = folded_length(&dim_range) {
            if count != expected {
                report(errors, reporter, node.loc, format!("aggregate has {count} elements, expected {expected}"));
            }
        }
    }

    if let Some(index_types) = ty.unconstrained_index_types() {
        if index_types.len() > 1 {
            let lens: Vec<usize> =
                node.assocs.iter().filter_map(|a| a.value.as_deref()).map(|v| v.assocs.len()).collect();
            if let Some(first) = lens.first() {
                if lens.iter().any(|l| l != first) {
                    report(errors, reporter, node.loc, "sub-aggregate lengths differ across dimension");
                }
            }
        }
    }
}
