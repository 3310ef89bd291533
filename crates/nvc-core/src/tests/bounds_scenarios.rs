//! End-to-end bounds-checking scenarios.

use crate::bounds::BoundsChecker;
use crate::ctx::Options;
use nvc_common::{Diagnostic, Dir, Ident, Node, NodeKind, Range, SubKind, Type, TypeKind};
use std::rc::Rc;

/// Scenario 5: `signal a: bit_vector(0 to 7); … a(9)` reports exactly one
/// error of the form "array a index 9 out of bounds 0 to 7".
#[test]
fn scenario_5_array_reference_out_of_bounds() {
    let element = Rc::new(Type::new(TypeKind::Enum {
        literals: vec![
            nvc_common::EnumLit { ident: Ident::new("'0'"), pos: 0 },
            nvc_common::EnumLit { ident: Ident::new("'1'"), pos: 1 },
        ],
    }));
    let array_ty = Rc::new(Type::new(TypeKind::ConstrainedArray {
        dims: vec![Range::new(Node::integer_literal(0), Node::integer_literal(7), Dir::To)],
        element,
    }));
    let target = Node::new(NodeKind::Reference, SubKind::None).with_ident(Ident::new("a")).with_type(array_ty);
    let mut array_ref = Node::new(NodeKind::ArrayRef, SubKind::None)
        .with_target(target)
        .with_params(vec![Node::integer_literal(9)]);

    let mut checker = BoundsChecker::new();
    let opts = Options::default();
    let mut messages: Vec<String> = Vec::new();
    let mut sink = |d: Diagnostic| messages.push(d.message);
    checker.check(&mut array_ref, &opts, &mut sink);

    assert_eq!(checker.errors(), 1);
    assert_eq!(messages, vec!["array a index 9 out of bounds 0 to 7".to_string()]);
}

/// Scenario 6: `case i is when 0 => …; when 2 to 5 => …; end case;` over
/// `integer range 0 to 7` reports one error listing missing choices "1"
/// and "6 to 7".
#[test]
fn scenario_6_case_coverage_missing_intervals() {
    let int_ty = Rc::new(Type::new(TypeKind::Integer {
        range: Range::new(Node::integer_literal(0), Node::integer_literal(7), Dir::To),
    }));
    let scrutinee = Node::new(NodeKind::Reference, SubKind::None).with_ident(Ident::new("i")).with_type(int_ty);

    let mut zero_branch = Node::new(NodeKind::CaseStmt, SubKind::Named);
    zero_branch.params = vec![Node::integer_literal(0)];

    let mut range_branch = Node::new(NodeKind::CaseStmt, SubKind::Named);
    range_branch.params = vec![Node::range_expr(Node::integer_literal(2), Node::integer_literal(5), Dir::To)];

    let mut case_stmt = Node::new(NodeKind::CaseStmt, SubKind::None)
        .with_value(scrutinee)
        .with_assocs(vec![zero_branch, range_branch]);

    let mut checker = BoundsChecker::new();
    let opts = Options::default();
    let mut messages: Vec<String> = Vec::new();
    let mut sink = |d: Diagnostic| messages.push(d.message);
    checker.check(&mut case_stmt, &opts, &mut sink);

    assert_eq!(checker.errors(), 1);
    assert!(messages[0].contains("1"));
    assert!(messages[0].contains("6 to 7"));
}
