//! Folding predicates: recognize values already reduced to a literal.
//!
//! Pure queries over a subtree that has already been reduced as far as the
//! evaluator can take it: they recognize literals and trivial references to
//! already-folded constants/enum literals, but never themselves invoke the
//! evaluator. Callers (the evaluator's own operand reduction, and the bounds
//! checker) are responsible for folding a subexpression first and consulting
//! these predicates on the result.

use nvc_common::{LiteralValue, Node, NodeKind, Range, SubKind};

const MAX_REFERENCE_CHASE: u32 = 64;

/// Follow a `Reference` node's `reference` back-link to whatever it was
/// resolved to by the (out-of-scope) name resolver, stopping at the first
/// non-reference node or after a depth bound so a malformed cyclic tree
/// can't hang folding.
fn resolve_trivial(node: &Node) -> &Node {
    let mut cur = node;
    for _ in 0..MAX_REFERENCE_CHASE {
        if cur.kind != NodeKind::Reference {
            return cur;
        }
        match &cur.reference {
            Some(target) => cur = target,
            None => return cur,
        }
    }
    cur
}

/// A declaration's folded value, if it carries one directly (enum literal
/// declarations store their position as an attribute; constant declarations
/// carry their folded initial value in `value`).
fn decl_literal(node: &Node) -> Option<&LiteralValue> {
    match node.kind {
        NodeKind::EnumLiteralDecl => None,
        NodeKind::ConstantDecl => node.value.as_deref().and_then(|v| v.literal.as_ref()),
        _ => None,
    }
}

fn recognize(node: &Node) -> Option<&LiteralValue> {
    let resolved = resolve_trivial(node);
    if resolved.kind == NodeKind::Literal {
        resolved.literal.as_ref()
    } else {
        decl_literal(resolved)
    }
}

pub fn folded_int(node: &Node) -> Option<i64> {
    match recognize(node)? {
        LiteralValue::Integer(v) => Some(*v),
        LiteralValue::Physical(v) => Some(*v),
        _ => None,
    }
}

pub fn folded_real(node: &Node) -> Option<f64> {
    match recognize(node)? {
        LiteralValue::Real(v) => Some(*v),
        _ => None,
    }
}

/// Recognizes `BOOLEAN`'s two literals positionally (`FALSE` = 0, `TRUE` =
/// 1), the same representation any other two-valued enumeration uses; a
/// caller that cares about the distinction checks `node.ty` itself.
pub fn folded_bool(node: &Node) -> Option<bool> {
    folded_enum(node).map(|pos| pos != 0)
}

pub fn folded_enum(node: &Node) -> Option<u32> {
    let resolved = resolve_trivial(node);
    if resolved.kind == NodeKind::EnumLiteralDecl {
        if let Some(pos) = resolved
            .attr(*nvc_common::attr_names::ENUM_POS)
            .and_then(nvc_common::AttrValue::as_int)
        {
            return Some(pos as u32);
        }
    }
    match recognize(node)? {
        LiteralValue::EnumPos(p) => Some(*p),
        _ => None,
    }
}

/// A range endpoint's ordinal value, trying integer, then physical (folded
/// as an integer magnitude), then enumeration position — the three scalar
/// kinds VHDL index ranges can be built from.
fn endpoint_ordinal(node: &Node) -> Option<i64> {
    folded_int(node).or_else(|| folded_enum(node).map(i64::from))
}

/// Normalizes direction, returning `(low, high)` with `low <= high`,
/// regardless of whether the range is stated `to` or `downto` — a range
/// declared backwards for its direction is simply null (`folded_length`
/// handles emptiness separately), not malformed, so both endpoints still
/// have a well-defined numeric span.
pub fn folded_bounds(range: &Range) -> Option<(i64, i64)> {
    let a = endpoint_ordinal(&range.left)?;
    let b = endpoint_ordinal(&range.right)?;
    Some((a.min(b), b.max(a)))
}

/// `right - left + 1` for `to`, `left - right + 1` for `downto`, `0` for a
/// null range, `None` if either endpoint doesn't fold to a recognized
/// scalar.
pub fn folded_length(range: &Range) -> Option<i64> {
    let left = endpoint_ordinal(&range.left)?;
    let right = endpoint_ordinal(&range.right)?;
    match range.dir {
        nvc_common::Dir::To => Some((right - left + 1).max(0)),
        nvc_common::Dir::DownTo => Some((left - right + 1).max(0)),
        nvc_common::Dir::NonNumeric => None,
    }
}
