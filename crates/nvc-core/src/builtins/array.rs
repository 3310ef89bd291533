//! Array (string-literal) equality.

use nvc_common::Node;

const NAMES: &[&str] = &["aeq", "aneq"];

pub fn is_array_name(name: &str) -> bool {
    NAMES.contains(&name)
}

pub fn reduce(name: &str, args: &[&str]) -> Option<Node> {
    let (a, b) = match args {
        [a, b] => (*a, *b),
        _ => return None,
    };
    let v = match name {
        "aeq" => a == b,
        "aneq" => a != b,
        _ => return None,
    };
    Some(Node::bool_literal(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aeq_compares_characters() {
        assert_eq!(reduce("aeq", &["101", "101"]).unwrap().literal, Some(nvc_common::LiteralValue::EnumPos(1)));
        assert_eq!(reduce("aneq", &["101", "110"]).unwrap().literal, Some(nvc_common::LiteralValue::EnumPos(1)));
    }
}
