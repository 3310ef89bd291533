//! End-to-end folding scenarios.

use crate::ctx::Options;
use crate::eval::eval;
use nvc_common::{AttrValue, Ident, LiteralValue, Node, NodeKind, SubKind};

fn builtin(name: &str) -> Node {
    Node::new(NodeKind::FunctionBody, SubKind::None)
        .with_attr(*nvc_common::attr_names::BUILTIN, AttrValue::Str(name.into()))
}

fn call(target: Node, args: Vec<Node>) -> Node {
    Node::new(NodeKind::FunctionCall, SubKind::None).with_reference(target).with_params(args)
}

fn reference(id: Ident) -> Node {
    Node::new(NodeKind::Reference, SubKind::None).with_ident(id)
}

fn formal(id: Ident) -> Node {
    Node::new(NodeKind::PortDecl, SubKind::None).with_ident(id)
}

fn var_decl(id: Ident, init: Node) -> Node {
    Node::new(NodeKind::VariableDecl, SubKind::None).with_ident(id).with_value(init)
}

fn var_assign(id: Ident, value: Node) -> Node {
    Node::new(NodeKind::VarAssignStmt, SubKind::None).with_target(reference(id)).with_value(value)
}

fn return_stmt(value: Node) -> Node {
    Node::new(NodeKind::ReturnStmt, SubKind::None).with_value(value)
}

/// Scenario 1: `function add1(x: integer) return integer is begin return x
/// + 1; end;` folded at `add1(5)` yields `6`.
#[test]
fn scenario_1_folded_function_call() {
    let x = Ident::new("x");
    let body = Node::new(NodeKind::FunctionBody, SubKind::None)
        .with_ident(Ident::new("add1"))
        .with_params(vec![formal(x)])
        .with_stmts(vec![return_stmt(call(builtin("add"), vec![reference(x), Node::integer_literal(1)]))]);
    let result = eval(&call(body, vec![Node::integer_literal(5)]), &Options::default());
    assert_eq!(result.literal, Some(LiteralValue::Integer(6)));
}

/// Scenario 2: an iterative `log2` definition, folded at `log2(11)` yields
/// `4`.
#[test]
fn scenario_2_iterative_fold() {
    let x = Ident::new("x");
    let r = Ident::new("r");
    let c = Ident::new("c");

    let while_loop = Node::new(NodeKind::WhileStmt, SubKind::None)
        .with_value(call(builtin("lt"), vec![reference(c), reference(x)]))
        .with_stmts(vec![
            var_assign(r, call(builtin("add"), vec![reference(r), Node::integer_literal(1)])),
            var_assign(c, call(builtin("mul"), vec![reference(c), Node::integer_literal(2)])),
        ]);

    let if_stmt = Node::new(NodeKind::IfStmt, SubKind::None)
        .with_value(call(builtin("leq"), vec![reference(x), Node::integer_literal(1)]))
        .with_stmts(vec![var_assign(r, Node::integer_literal(1))])
        .with_else_stmts(vec![while_loop]);

    let body = Node::new(NodeKind::FunctionBody, SubKind::None)
        .with_ident(Ident::new("log2"))
        .with_params(vec![formal(x)])
        .with_decls(vec![var_decl(r, Node::integer_literal(0)), var_decl(c, Node::integer_literal(1))])
        .with_stmts(vec![if_stmt, return_stmt(reference(r))]);

    let result = eval(&call(body, vec![Node::integer_literal(11)]), &Options::default());
    assert_eq!(result.literal, Some(LiteralValue::Integer(4)));
}

/// Scenario 3: `case x is when 1 => return 2; when 2 => return 3; when
/// others => return 5; end case;` folded at `x = 7` yields `5`.
#[test]
fn scenario_3_case_fold() {
    let x = Ident::new("x");

    fn named_branch(choice: i64, result: i64) -> Node {
        let mut assoc = Node::new(NodeKind::CaseStmt, SubKind::Named);
        assoc.params = vec![Node::integer_literal(choice)];
        assoc.stmts = vec![return_stmt(Node::integer_literal(result))];
        assoc
    }
    fn others_branch(result: i64) -> Node {
        let mut assoc = Node::new(NodeKind::CaseStmt, SubKind::Others);
        assoc.stmts = vec![return_stmt(Node::integer_literal(result))];
        assoc
    }

    let case_stmt = Node::new(NodeKind::CaseStmt, SubKind::None)
        .with_value(reference(x))
        .with_assocs(vec![named_branch(1, 2), named_branch(2, 3), others_branch(5)]);

    let body = Node::new(NodeKind::FunctionBody, SubKind::None)
        .with_params(vec![formal(x)])
        .with_stmts(vec![case_stmt]);

    let result = eval(&call(body, vec![Node::integer_literal(7)]), &Options::default());
    assert_eq!(result.literal, Some(LiteralValue::Integer(5)));
}

/// Scenario 4: `function adddef(x, y: integer := 5) return integer is
/// begin return x + y; end;` invoked with no actuals folds to `10`.
#[test]
fn scenario_4_default_argument_fold() {
    let x = Ident::new("x");
    let y = Ident::new("y");
    let body = Node::new(NodeKind::FunctionBody, SubKind::None)
        .with_params(vec![
            formal(x).with_value(Node::integer_literal(5)),
            formal(y).with_value(Node::integer_literal(5)),
        ])
        .with_stmts(vec![return_stmt(call(builtin("add"), vec![reference(x), reference(y)]))]);

    let result = eval(&call(body, vec![]), &Options::default());
    assert_eq!(result.literal, Some(LiteralValue::Integer(10)));
}
