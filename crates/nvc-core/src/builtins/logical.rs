//! Boolean/bit logical operators.

use nvc_common::Node;

const NAMES: &[&str] = &["not", "and", "nand", "or", "nor", "xor", "xnor", "eq", "neq"];

pub fn is_logical_name(name: &str) -> bool {
    NAMES.contains(&name)
}

pub fn reduce(name: &str, args: &[bool]) -> Option<Node> {
    let v = match (name, args) {
        ("not", [a]) => !a,
        ("and", [a, b]) => *a && *b,
        ("nand", [a, b]) => !(*a && *b),
        ("or", [a, b]) => *a || *b,
        ("nor", [a, b]) => !(*a || *b),
        ("xor", [a, b]) => a != b,
        ("xnor", [a, b]) => a == b,
        ("eq", [a, b]) => a == b,
        ("neq", [a, b]) => a != b,
        _ => return None,
    };
    Some(Node::bool_literal(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nand_and_xor() {
        assert_eq!(reduce("nand", &[true, true]).unwrap().literal, Some(nvc_common::LiteralValue::EnumPos(0)));
        assert_eq!(reduce("xor", &[true, false]).unwrap().literal, Some(nvc_common::LiteralValue::EnumPos(1)));
    }

    #[test]
    fn not_is_unary() {
        assert_eq!(reduce("not", &[false]).unwrap().literal, Some(nvc_common::LiteralValue::EnumPos(1)));
    }
}
