//! The evaluator's binding environment: a stack of scopes for function-call
//! and loop-local variables.
//!
//! Uses `rustc_hash::FxHashMap` per frame rather than a fixed-size array;
//! the only observable contract is lexical shadowing, so any growable map
//! that preserves top-to-bottom lookup order works.

use nvc_common::{Ident, Node};
use rustc_hash::FxHashMap;

/// One lexical scope: the formals/locals bound by a single function call or
/// block.
#[derive(Default)]
pub struct Frame {
    bindings: FxHashMap<Ident, Node>,
}

impl Frame {
    fn new() -> Self {
        Self::default()
    }

    /// Bind `name` in this frame, shadowing/replacing any existing entry for
    /// the same identifier in this frame.
    fn bind(&mut self, name: Ident, value: Node) {
        self.bindings.insert(name, value);
    }

    fn get(&self, name: Ident) -> Option<&Node> {
        self.bindings.get(&name)
    }
}

/// A stack of frames, searched top-to-bottom on lookup.
#[derive(Default)]
pub struct Env {
    frames: Vec<Frame>,
}

impl Env {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Push a new frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Bind in the *current* (topmost) frame.
    pub fn bind(&mut self, name: Ident, value: Node) {
        if let Some(top) = self.frames.last_mut() {
            top.bind(name, value);
        }
    }

    /// Walk the stack from top to bottom.
    pub fn lookup(&self, name: Ident) -> Option<&Node> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvc_common::Node;

    #[test]
    fn lookup_walks_frames_top_down_with_shadowing() {
        let mut env = Env::new();
        let x = Ident::new("x");
        env.push();
        env.bind(x, Node::integer_literal(1));
        env.push();
        env.bind(x, Node::integer_literal(2));
        assert_eq!(env.lookup(x).unwrap().literal, Some(nvc_common::LiteralValue::Integer(2)));
        env.pop();
        assert_eq!(env.lookup(x).unwrap().literal, Some(nvc_common::LiteralValue::Integer(1)));
        env.pop();
        assert!(env.lookup(x).is_none());
    }

    #[test]
    fn rebind_in_same_frame_replaces_not_appends() {
        let mut env = Env::new();
        let x = Ident::new("y");
        env.push();
        env.bind(x, Node::integer_literal(1));
        env.bind(x, Node::integer_literal(7));
        assert_eq!(env.lookup(x).unwrap().literal, Some(nvc_common::LiteralValue::Integer(7)));
    }
}
