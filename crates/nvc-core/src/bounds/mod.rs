//! Bounds & choice checker.
//!
//! A top-down tree visitor: each node kind's checks only need its already
//! (or newly) folded children, so one pass is sufficient. The visit is
//! idempotent and side-effect-free apart from the error counter and the
//! `elide_bounds` marker it writes on fully-static array references.

mod case_checks;
mod checks;
mod interval;

use crate::ctx::Options;
use nvc_common::{Node, NodeKind, Reporter};

/// Owns the error counter explicitly across one checking session, so
/// `errors()` has no hidden global to read from.
#[derive(Default)]
pub struct BoundsChecker {
    errors: i32,
}

impl BoundsChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `bounds_check(top)`: traverses the tree and emits diagnostics
    /// through `reporter`. Never panics on ill-formed input — a check that
    /// can't gather the data it needs (missing type, unfoldable operand)
    /// simply skips itself.
    pub fn check(&mut self, top: &mut Node, opts: &Options, reporter: &mut Reporter) {
        visit(top, self, opts, reporter);
    }

    /// `bounds_errors()`: the accumulated count since this checker was
    /// constructed or last `reset`.
    pub fn errors(&self) -> i32 {
        self.errors
    }

    pub fn reset(&mut self) {
        self.errors = 0;
    }
}

fn visit(node: &mut Node, bc: &mut BoundsChecker, opts: &Options, reporter: &mut Reporter) {
    visit_children(node, bc, opts, reporter);

    match node.kind {
        NodeKind::Literal => checks::check_string_literal(node, &mut bc.errors, reporter),
        NodeKind::FunctionCall => checks::check_call_args(node, opts, &mut bc.errors, reporter),
        NodeKind::ArrayRef => checks::check_array_ref(node, opts, &mut bc.errors, reporter),
        NodeKind::ArraySlice => checks::check_array_slice(node, opts, &mut bc.errors, reporter),
        NodeKind::Aggregate => checks::check_aggregate(node, &mut bc.errors, reporter),
        NodeKind::TypeConversion => checks::check_type_conversion(node, opts, &mut bc.errors, reporter),
        NodeKind::AttributeRef => checks::check_attribute_ref(node, &mut bc.errors, reporter),
        NodeKind::SignalDecl | NodeKind::VariableDecl | NodeKind::ConstantDecl | NodeKind::PortDecl => {
            checks::check_declaration(node, &mut bc.errors, reporter)
        }
        NodeKind::VarAssignStmt | NodeKind::SignalAssignStmt => {
            checks::check_assignment(node, opts, &mut bc.errors, reporter)
        }
        NodeKind::CaseStmt => check_case(node, &mut bc.errors, reporter),
        _ => {}
    }
}

fn check_case(node: &Node, errors: &mut i32, reporter: &mut Reporter) {
    let Some(scrutinee) = node.value.as_deref() else { return };
    let Some(ty) = scrutinee.ty.as_deref() else { return };
    if ty.is_array() {
        case_checks::check_array(node, ty, errors, reporter);
    } else if ty.is_enum() {
        case_checks::check_enumeration(node, ty, errors, reporter);
    } else if ty.is_integer() {
        case_checks::check_integer(node, ty, errors, reporter);
    }
}

/// Recurse into every named child slot. Declarations/statements carry
/// their own nested lists that need the same treatment.
fn visit_children(node: &mut Node, bc: &mut BoundsChecker, opts: &Options, reporter: &mut Reporter) {
    for child in [&mut node.value, &mut node.target, &mut node.range].into_iter().flatten() {
        visit(child, bc, opts, reporter);
    }
    for list in [
        &mut node.params,
        &mut node.ports,
        &mut node.decls,
        &mut node.stmts,
        &mut node.else_stmts,
        &mut node.assocs,
        &mut node.chars,
        &mut node.waveforms,
    ] {
        for child in list.iter_mut() {
            visit(child, bc, opts, reporter);
        }
    }
    // `reference` is a resolved back-link (to a declaration), not a
    // sub-expression of this node — it is not re-visited to avoid
    // re-checking shared declarations once per use site.
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvc_common::{Dir, Ident, Node, NodeKind, Range, SubKind, Type, TypeKind};
    use std::rc::Rc;

    fn bit_vector_0_to_7() -> Rc<Type> {
        Rc::new(Type::new(TypeKind::ConstrainedArray {
            dims: vec![Range::new(Node::integer_literal(0), Node::integer_literal(7), Dir::To)],
            element: Rc::new(Type::new(TypeKind::Integer {
                range: Range::new(Node::integer_literal(0), Node::integer_literal(1), Dir::To),
            })),
        }))
    }

    #[test]
    fn array_reference_out_of_bounds_reports_one_error() {
        let ty = bit_vector_0_to_7();
        let target = Node::new(NodeKind::Reference, SubKind::None).with_ident(Ident::new("a")).with_type(ty);
        let mut array_ref = Node::new(NodeKind::ArrayRef, SubKind::None)
            .with_target(target)
            .with_params(vec![Node::integer_literal(9)]);

        let mut checker = BoundsChecker::new();
        let opts = Options::default();
        let mut messages = Vec::new();
        let mut sink = |d: nvc_common::Diagnostic| messages.push(d.message);
        checker.check(&mut array_ref, &opts, &mut sink);

        assert_eq!(checker.errors(), 1);
        assert_eq!(messages[0], "array a index 9 out of bounds 0 to 7");
        assert!(!array_ref.is_elide_bounds());
    }

    #[test]
    fn array_reference_in_bounds_marks_elide_bounds() {
        let ty = bit_vector_0_to_7();
        let target = Node::new(NodeKind::Reference, SubKind::None).with_ident(Ident::new("a")).with_type(ty);
        let mut array_ref = Node::new(NodeKind::ArrayRef, SubKind::None)
            .with_target(target)
            .with_params(vec![Node::integer_literal(3)]);

        let mut checker = BoundsChecker::new();
        let opts = Options::default();
        let mut sink = |_: nvc_common::Diagnostic| {};
        checker.check(&mut array_ref, &opts, &mut sink);

        assert_eq!(checker.errors(), 0);
        assert!(array_ref.is_elide_bounds());
    }

    #[test]
    fn checking_twice_is_idempotent() {
        let ty = bit_vector_0_to_7();
        let target = Node::new(NodeKind::Reference, SubKind::None).with_ident(Ident::new("a")).with_type(ty);
        let mut array_ref = Node::new(NodeKind::ArrayRef, SubKind::None)
            .with_target(target)
            .with_params(vec![Node::integer_literal(9)]);

        let opts = Options::default();
        let mut sink = |_: nvc_common::Diagnostic| {};

        let mut first = BoundsChecker::new();
        first.check(&mut array_ref, &opts, &mut sink);
        let first_errors = first.errors();
        let first_elided = array_ref.is_elide_bounds();

        let mut second = BoundsChecker::new();
        second.check(&mut array_ref, &opts, &mut sink);

        assert_eq!(first_errors, second.errors());
        assert_eq!(first_elided, array_ref.is_elide_bounds());
    }
}
