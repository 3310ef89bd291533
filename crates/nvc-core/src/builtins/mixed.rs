//! Mixed universal real/integer operators.

use nvc_common::Node;

const NAMES: &[&str] = &["mulri", "mulir", "divri"];

pub fn is_mixed_name(name: &str) -> bool {
    NAMES.contains(&name)
}

/// `mulri(real, int)`, `mulir(int, real)`, `divri(real, int)`. The reducer
/// is told which argument is which by the caller, since the two mul variants
/// only differ in the source-level operand order, not in the arithmetic
/// performed.
pub fn reduce(name: &str, real_operand: f64, int_operand: i64) -> Option<Node> {
    let v = match name {
        "mulri" | "mulir" => real_operand * int_operand as f64,
        "divri" if int_operand != 0 => real_operand / int_operand as f64,
        _ => return None,
    };
    Some(Node::real_literal(v))
}
