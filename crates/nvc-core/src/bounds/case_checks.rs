//! Case-statement coverage: three disjoint paths for enumeration, integer,
//! and array scrutinees.

use super::interval::{format_missing, CoveredIntervalList};
use crate::fold::{folded_bounds, folded_enum, folded_int, folded_length};
use nvc_common::{Diagnostic, Loc, Node, Reporter, Type};

/// Enumeration scrutinee: a presence bitmap over literal positions.
pub fn check_enumeration(stmt: &Node, ty: &Type, errors: &mut i32, reporter: &mut Reporter) {
    let Some(literals) = ty.enum_literals() else {
        return;
    };
    let mut seen = vec![false; literals.len()];
    let mut has_others = false;

    for assoc in &stmt.assocs {
        if assoc.subkind == nvc_common::SubKind::Others {
            has_others = true;
            continue;
        }
        for choice in &assoc.params {
            let Some(pos) = folded_enum(choice) else {
                continue;
            };
            let idx = pos as usize;
            if idx >= seen.len() {
                continue;
            }
            if seen[idx] {
                report(errors, reporter, choice.loc, "choice appears multiple times");
            } else {
                seen[idx] = true;
            }
        }
    }

    if !has_others {
        let missing: Vec<&str> = literals
            .iter()
            .zip(seen.iter())
            .filter(|(_, &covered)| !covered)
            .map(|(lit, _)| lit.ident.as_str())
            .collect();
        if !missing.is_empty() {
            report(
                errors,
                reporter,
                stmt.loc,
                &format!("case is missing choices: {}", missing.join(", ")),
            );
        }
    }
}

/// Integer scrutinee: the covered-interval list.
pub fn check_integer(stmt: &Node, ty: &Type, errors: &mut i32, reporter: &mut Reporter) {
    let Some(range) = ty.scalar_range() else {
        return;
    };
    let Some((tlow, thigh)) = folded_bounds(range) else {
        return;
    };

    let mut covered = CoveredIntervalList::new();
    let mut has_others = false;

    for assoc in &stmt.assocs {
        if assoc.subkind == nvc_common::SubKind::Others {
            has_others = true;
            continue;
        }
        for choice in &assoc.params {
            let span = if let Some(range) = choice.as_range() {
                folded_bounds(&range)
            } else {
                folded_int(choice).map(|v| (v, v))
            };
            let Some((lo, hi)) = span else { continue };
            if let Some((olo, ohi)) = covered.insert(lo, hi) {
                report(
                    errors,
                    reporter,
                    choice.loc,
                    &format!("choice overlaps previously covered range {olo} to {ohi}"),
                );
            }
        }
    }

    if !has_others {
        let missing = covered.missing(tlow, thigh);
        if !missing.is_empty() {
            report(
                errors,
                reporter,
                stmt.loc,
                &format!("case is missing choices:\n{}", format_missing(&missing)),
            );
        }
    }
}

/// Array scrutinee: `alphabet ^ length` possible values, saturating per the
/// policy documented in `DESIGN.md`.
pub fn check_array(stmt: &Node, ty: &Type, errors: &mut i32, reporter: &mut Reporter) {
    let Some(element) = ty.element_type() else {
        return;
    };
    let alphabet: i64 = if let Some(literals) = element.enum_literals() {
        literals.len() as i64
    } else if let Some(range) = element.scalar_range() {
        match folded_length(range) {
            Some(n) => n,
            None => return,
        }
    } else {
        return;
    };
    let length: i64 = match ty.array_dims().and_then(|dims| dims.first()).and_then(folded_length) {
        Some(n) => n,
        None => return,
    };

    let required = alphabet.checked_pow(length.clamp(0, u32::MAX as i64) as u32).unwrap_or(i64::MAX);

    let mut covered: i64 = 0;
    let mut has_others = false;
    for assoc in &stmt.assocs {
        if assoc.subkind == nvc_common::SubKind::Others {
            has_others = true;
        } else {
            covered += assoc.params.len().max(1) as i64;
        }
    }

    if !has_others && covered < required {
        report(
            errors,
            reporter,
            stmt.loc,
            &format!("choices cover only {covered} of {required} possible values"),
        );
    }
}

fn report(errors: &mut i32, reporter: &mut Reporter, loc: Loc, message: &str) {
    *errors += 1;
    reporter(Diagnostic::error(loc, message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvc_common::{Dir, EnumLit, Ident, NodeKind, Range, SubKind, TypeKind};

    fn int_type(lo: i64, hi: i64) -> Type {
        Type::new(TypeKind::Integer {
            range: Range::new(Node::integer_literal(lo), Node::integer_literal(hi), Dir::To),
        })
    }

    fn named_choice(v: i64) -> Node {
        Node::new(NodeKind::CaseStmt, SubKind::Named).with_assocs(vec![]).with_params(vec![Node::integer_literal(v)])
    }

    fn case_assoc(subkind: SubKind, choices: Vec<Node>, stmts: Vec<Node>) -> Node {
        let mut n = Node::new(NodeKind::CaseStmt, subkind);
        n.params = choices;
        n.stmts = stmts;
        n
    }

    #[test]
    fn integer_case_reports_missing_gap() {
        let ty = int_type(0, 7);
        let stmt = Node::new(NodeKind::CaseStmt, SubKind::None)
            .with_value(Node::integer_literal(0))
            .with_assocs(vec![
                case_assoc(SubKind::Named, vec![Node::integer_literal(0)], vec![]),
                case_assoc(
                    SubKind::Named,
                    vec![Node::range_expr(Node::integer_literal(2), Node::integer_literal(5), Dir::To)],
                    vec![],
                ),
            ]);
        let mut errors = 0;
        let mut collected: Vec<String> = Vec::new();
        let mut sink = |d: Diagnostic| collected.push(d.message.clone());
        check_integer(&stmt, &ty, &mut errors, &mut sink);
        assert_eq!(errors, 1);
        assert!(collected[0].contains('1'));
        assert!(collected[0].contains("6 to 7"));
        let _ = named_choice(0); // silence unused helper in minimal test builds
        let _ = Ident::new("unused");
        let _ = EnumLit { ident: Ident::new("x"), pos: 0 };
    }

    #[test]
    fn integer_case_with_others_has_no_missing_report() {
        let ty = int_type(0, 7);
        let stmt = Node::new(NodeKind::CaseStmt, SubKind::None)
            .with_value(Node::integer_literal(0))
            .with_assocs(vec![case_assoc(SubKind::Others, vec![], vec![])]);
        let mut errors = 0;
        let mut sink = |_: Diagnostic| {};
        check_integer(&stmt, &ty, &mut errors, &mut sink);
        assert_eq!(errors, 0);
    }
}
