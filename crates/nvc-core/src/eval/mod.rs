//! The constant evaluator.
//!
//! `eval(call)` is the only public entry point; everything else here is the
//! recursive machinery behind it — operand reduction, user-defined function
//! bodies, and statement execution.

use crate::builtins;
use crate::ctx::Options;
use crate::env::Env;
use crate::fold::{folded_bool, folded_int};
use nvc_common::{Ident, Node, NodeKind};

#[cfg(feature = "tracing")]
macro_rules! fold_debug {
    ($opts:expr, $($arg:tt)*) => {
        if $opts.debug {
            tracing::debug!($($arg)*);
        }
    };
}
#[cfg(not(feature = "tracing"))]
macro_rules! fold_debug {
    ($opts:expr, $($arg:tt)*) => {
        let _ = &$opts;
    };
}

/// A pending `exit`: `None` targets the nearest enclosing loop, `Some(l)`
/// targets the loop labeled `l`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ExitSignal {
    None,
    Pending(Option<Ident>),
}

/// Mutable state threaded through one top-level `eval` call, including
/// every user-defined function call it triggers along the way: the
/// binding environment, a fail flag, a pending `exit`, and the folded
/// return value once a `return` statement runs.
struct EvalState {
    env: Env,
    failed: bool,
    exit: ExitSignal,
    result: Option<Node>,
}

impl EvalState {
    fn new() -> Self {
        Self {
            env: Env::new(),
            failed: false,
            exit: ExitSignal::None,
            result: None,
        }
    }

    fn halted(&self) -> bool {
        self.failed || self.result.is_some() || self.exit != ExitSignal::None
    }
}

fn is_folded(n: &Node) -> bool {
    n.kind == NodeKind::Literal
}

/// Partial evaluator entry. Idempotent: folding an already-folded
/// literal is a no-op, and a call that refuses to fold is handed back
/// unchanged so a second attempt produces the same result.
pub fn eval(call: &Node, opts: &Options) -> Node {
    fold_expr(call, opts)
}

/// General expression folding, shared by `eval` (always a `FunctionCall`)
/// and the bounds checker (any expression subtree it needs reduced before
/// consulting a folding predicate).
pub fn fold_expr(node: &Node, opts: &Options) -> Node {
    if is_folded(node) {
        return node.clone();
    }
    let mut state = EvalState::new();
    let folded = reduce_expr(node, &mut state, opts);
    if state.failed {
        fold_debug!(opts, "fold refused at {}", node.loc);
        node.clone()
    } else {
        folded
    }
}

/// Reduce any expression subtree. Only literals, simple references, and
/// function calls are foldable; every other expression kind (array
/// references, aggregates, attribute references, …) is outside the
/// evaluator's vocabulary and is handed back unchanged with `failed` set,
/// per the entry contract.
fn reduce_expr(node: &Node, state: &mut EvalState, opts: &Options) -> Node {
    match node.kind {
        NodeKind::Literal => node.clone(),
        NodeKind::Reference => match node.ident.and_then(|id| state.env.lookup(id)) {
            Some(bound) => bound.clone(),
            None => node.clone(),
        },
        NodeKind::FunctionCall => match reduce_call(node, state, opts) {
            Some(folded) if !state.failed => folded,
            _ => {
                state.failed = true;
                node.clone()
            }
        },
        NodeKind::TypeConversion => reduce_type_conversion(node, state, opts),
        _ => {
            state.failed = true;
            node.clone()
        }
    }
}

fn reduce_type_conversion(node: &Node, state: &mut EvalState, opts: &Options) -> Node {
    let Some(operand) = node.value.as_deref() else {
        state.failed = true;
        return node.clone();
    };
    let folded = reduce_expr(operand, state, opts);
    if let Some(i) = crate::fold::folded_int(&folded) {
        if node.ty.as_deref().map(|t| !t.is_integer()).unwrap_or(false) {
            return Node::real_literal(i as f64);
        }
        return Node::integer_literal(i);
    }
    if let Some(r) = crate::fold::folded_real(&folded) {
        if node.ty.as_deref().map(|t| t.is_integer()).unwrap_or(true) {
            // real -> integer truncates toward zero.
            return Node::integer_literal(r.trunc() as i64);
        }
        return Node::real_literal(r);
    }
    state.failed = true;
    node.clone()
}

/// Dispatches a call to a built-in or a user-defined function body.
fn reduce_call(call: &Node, state: &mut EvalState, opts: &Options) -> Option<Node> {
    let target = call.reference.as_deref()?;

    let mut folded_args = Vec::with_capacity(call.params.len());
    for actual in &call.params {
        let folded = reduce_expr(actual, state, opts);
        if !is_folded(&folded) {
            state.failed = true;
            return None;
        }
        folded_args.push(folded);
    }
    if state.failed {
        return None;
    }

    if let Some(name) = target.builtin_name() {
        return builtins::apply(name, &folded_args);
    }

    if target.kind == NodeKind::FunctionBody {
        return call_user_function(target, &folded_args, state, opts);
    }

    state.failed = true;
    None
}

fn call_user_function(
    body: &Node,
    call_args: &[Node],
    state: &mut EvalState,
    opts: &Options,
) -> Option<Node> {
    let formals = &body.params;
    if call_args.len() > formals.len() {
        state.failed = true;
        return None;
    }

    let mut bound_args = Vec::with_capacity(formals.len());
    for (i, formal) in formals.iter().enumerate() {
        let value = if i < call_args.len() {
            call_args[i].clone()
        } else {
            let default = formal.value.as_deref()?;
            let folded = reduce_expr(default, state, opts);
            if !is_folded(&folded) {
                state.failed = true;
                return None;
            }
            folded
        };
        bound_args.push((formal.ident, value));
    }

    state.env.push();
    for (ident, value) in bound_args {
        if let Some(ident) = ident {
            state.env.bind(ident, value);
        }
    }

    let mut ok = true;
    for local in &body.decls {
        if let Some(init) = local.value.as_deref() {
            let folded = reduce_expr(init, state, opts);
            if !is_folded(&folded) {
                state.failed = true;
                ok = false;
                break;
            }
            if let Some(ident) = local.ident {
                state.env.bind(ident, folded);
            }
        }
    }

    if ok {
        exec_stmts(&body.stmts, state, opts);
    }

    state.env.pop();

    if state.failed {
        return None;
    }
    let result = state.result.take();
    state.exit = ExitSignal::None;
    match result {
        Some(v) if is_folded(&v) => Some(v),
        _ => None,
    }
}

/// Executes statements in order, halting early on `failed`, `result`, or
/// a pending `exit`.
fn exec_stmts(stmts: &[Node], state: &mut EvalState, opts: &Options) {
    for stmt in stmts {
        if state.halted() {
            return;
        }
        exec_stmt(stmt, state, opts);
    }
}

fn exec_stmt(stmt: &Node, state: &mut EvalState, opts: &Options) {
    match stmt.kind {
        NodeKind::ReturnStmt => exec_return(stmt, state, opts),
        NodeKind::IfStmt => exec_if(stmt, state, opts),
        NodeKind::CaseStmt => exec_case(stmt, state, opts),
        NodeKind::WhileStmt => exec_while(stmt, state, opts),
        NodeKind::ForStmt => exec_for(stmt, state, opts),
        NodeKind::ExitStmt => exec_exit(stmt, state, opts),
        NodeKind::VarAssignStmt => exec_var_assign(stmt, state, opts),
        NodeKind::BlockStmt => exec_stmts(&stmt.stmts, state, opts),
        _ => state.failed = true,
    }
}

fn exec_return(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let Some(value) = stmt.value.as_deref() else {
        state.failed = true;
        return;
    };
    let folded = reduce_expr(value, state, opts);
    if is_folded(&folded) {
        state.result = Some(folded);
    } else {
        state.failed = true;
    }
}

fn exec_if(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let Some(cond) = stmt.value.as_deref() else {
        state.failed = true;
        return;
    };
    let folded = reduce_expr(cond, state, opts);
    match folded_bool(&folded) {
        Some(true) => exec_stmts(&stmt.stmts, state, opts),
        Some(false) => exec_stmts(&stmt.else_stmts, state, opts),
        None => state.failed = true,
    }
}

/// `case v is …` — integer scrutinee only. Each association in `stmt.assocs` carries its
/// choice values in `params` (empty + `SubKind::Others` for the default
/// branch) and its branch body in `stmts`.
fn exec_case(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let Some(scrutinee) = stmt.value.as_deref() else {
        state.failed = true;
        return;
    };
    let folded = reduce_expr(scrutinee, state, opts);
    let Some(v) = folded_int(&folded) else {
        state.failed = true;
        return;
    };

    for assoc in &stmt.assocs {
        let matched = assoc.subkind == nvc_common::SubKind::Others
            || assoc.params.iter().any(|choice| choice_matches(choice, v));
        if matched {
            exec_stmts(&assoc.stmts, state, opts);
            return;
        }
    }
}

fn choice_matches(choice: &Node, v: i64) -> bool {
    if let Some(range) = choice.as_range() {
        match crate::fold::folded_bounds(&range) {
            Some((lo, hi)) => v >= lo && v <= hi,
            None => false,
        }
    } else {
        folded_int(choice) == Some(v)
    }
}

fn exec_while(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let label = stmt.ident;
    let mut iterations = 0u32;
    loop {
        if iterations >= opts.max_while_iterations {
            state.failed = true;
            return;
        }
        let keep_going = match stmt.value.as_deref() {
            Some(cond) => {
                let folded = reduce_expr(cond, state, opts);
                match folded_bool(&folded) {
                    Some(b) => b,
                    None => {
                        state.failed = true;
                        return;
                    }
                }
            }
            None => true,
        };
        if !keep_going {
            return;
        }
        iterations += 1;
        exec_stmts(&stmt.stmts, state, opts);
        if state.failed || state.result.is_some() {
            return;
        }
        if let ExitSignal::Pending(target) = state.exit {
            if target.is_none() || target == label {
                state.exit = ExitSignal::None;
            }
            return;
        }
    }
}

fn exec_for(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let (Some(loop_var), Some(range_node)) = (stmt.ident, stmt.range.as_deref()) else {
        state.failed = true;
        return;
    };
    let Some(range) = range_node.as_range() else {
        state.failed = true;
        return;
    };
    let left = reduce_expr(&range.left, state, opts);
    let right = reduce_expr(&range.right, state, opts);
    let (Some(left), Some(right)) = (folded_int(&left), folded_int(&right)) else {
        state.failed = true;
        return;
    };

    let label = stmt.ident2;
    let descending = matches!(range.dir, nvc_common::Dir::DownTo);
    if matches!(range.dir, nvc_common::Dir::NonNumeric) {
        state.failed = true;
        return;
    }
    let (lo, hi) = if left <= right { (left, right) } else { (right, left) };
    if lo > hi {
        return; // null range: zero iterations, not an error
    }

    let mut i = if descending { hi } else { lo };
    loop {
        state.env.push();
        state.env.bind(loop_var, Node::integer_literal(i));
        exec_stmts(&stmt.stmts, state, opts);
        state.env.pop();

        if state.failed || state.result.is_some() {
            return;
        }
        if let ExitSignal::Pending(target) = state.exit {
            if target.is_none() || target == label {
                state.exit = ExitSignal::None;
            }
            return;
        }

        if descending {
            if i == lo {
                return;
            }
            i -= 1;
        } else {
            if i == hi {
                return;
            }
            i += 1;
        }
    }
}

fn exec_exit(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let should_exit = match stmt.value.as_deref() {
        Some(cond) => {
            let folded = reduce_expr(cond, state, opts);
            match folded_bool(&folded) {
                Some(b) => b,
                None => {
                    state.failed = true;
                    return;
                }
            }
        }
        None => true,
    };
    if should_exit {
        state.exit = ExitSignal::Pending(stmt.ident);
    }
}

fn exec_var_assign(stmt: &Node, state: &mut EvalState, opts: &Options) {
    let (Some(target), Some(value)) = (stmt.target.as_deref(), stmt.value.as_deref()) else {
        state.failed = true;
        return;
    };
    if target.kind != NodeKind::Reference {
        state.failed = true;
        return;
    }
    let Some(name) = target.ident else {
        state.failed = true;
        return;
    };
    let folded = reduce_expr(value, state, opts);
    if is_folded(&folded) {
        state.env.bind(name, folded);
    } else {
        state.failed = true;
    }
}
