//! The tagged tree node.
//!
//! A kind-plus-subkind two-level discriminant on one flat node struct,
//! rather than a Rust enum-per-node-shape class hierarchy: callers match on
//! `(node.kind, node.subkind)`, and every named child slot is a real struct
//! field so accesses are O(1) and statically typed instead of stringly-keyed.

use crate::ident::Ident;
use crate::ty::Type;
use smallvec::SmallVec;
use std::rc::Rc;

/// Primary discriminant. Declarations, statements, and expressions share one
/// enumeration exactly as describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    // Declarations
    SignalDecl,
    VariableDecl,
    ConstantDecl,
    PortDecl,
    EnumLiteralDecl,
    FunctionBody,
    AliasDecl,
    TypeDecl,
    SubtypeDecl,
    // Statements
    IfStmt,
    CaseStmt,
    ForStmt,
    WhileStmt,
    ReturnStmt,
    ExitStmt,
    VarAssignStmt,
    SignalAssignStmt,
    ProcedureCallStmt,
    BlockStmt,
    // Expressions
    Literal,
    Reference,
    FunctionCall,
    ArrayRef,
    ArraySlice,
    Aggregate,
    TypeConversion,
    AttributeRef,
    /// An expression-level range (`left (to|downto) right`), as used by
    /// `for` loops, array slices, and range choices in case/aggregate
    /// associations — distinct from a type's own constraining `Range`,
    /// which constrains a declaration rather than appearing as a subtree.
    RangeExpr,
}

/// Secondary discriminant. Which variants
/// are meaningful depends on `kind`; e.g. only `Literal` nodes use the
/// `*Lit` variants, only `FunctionCall`/`Aggregate` associations use the
/// choice-kind variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    None,
    IntegerLit,
    RealLit,
    StringLit,
    PhysicalLit,
    EnumLit,
    Named,
    RangeChoice,
    Others,
    Positional,
}

/// An attribute value: integer or string.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Str(String),
}

impl AttrValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A folded literal's value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Real(f64),
    Str(String),
    Physical(i64),
    /// Position within the enumeration type's literal list. Covers
    /// `BOOLEAN` (`FALSE` = 0, `TRUE` = 1) as an ordinary two-valued enum.
    EnumPos(u32),
}

/// Well-known attribute names, interned once via `once_cell`-backed statics
/// so every node that needs one of these keys shares the same `Ident`.
pub mod attr_names {
    use super::Ident;
    use once_cell::sync::Lazy;

    pub static BUILTIN: Lazy<Ident> = Lazy::new(|| Ident::new("builtin"));
    pub static ENUM_POS: Lazy<Ident> = Lazy::new(|| Ident::new("enum_pos"));
    pub static SIMPLE_NAME: Lazy<Ident> = Lazy::new(|| Ident::new("simple_name"));
    pub static ELIDE_BOUNDS: Lazy<Ident> = Lazy::new(|| Ident::new("elide_bounds"));
    /// Direction of a `RangeExpr` node: `0` for `to`, `1` for `downto`.
    pub static DIR: Lazy<Ident> = Lazy::new(|| Ident::new("dir"));
}

/// The tree node itself. Every named child slot from is present as a
/// field; most are empty/`None` for any given `kind`.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub subkind: SubKind,
    pub loc: crate::diagnostic::Loc,
    pub ident: Option<Ident>,
    pub ident2: Option<Ident>,
    pub ty: Option<Rc<Type>>,
    pub attrs: SmallVec<[(Ident, AttrValue); 4]>,
    pub literal: Option<LiteralValue>,

    pub value: Option<Box<Node>>,
    pub target: Option<Box<Node>>,
    pub range: Option<Box<Node>>,
    pub reference: Option<Box<Node>>,
    pub params: Vec<Node>,
    pub ports: Vec<Node>,
    pub decls: Vec<Node>,
    pub stmts: Vec<Node>,
    pub else_stmts: Vec<Node>,
    pub assocs: Vec<Node>,
    pub chars: Vec<Node>,
    pub waveforms: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, subkind: SubKind) -> Self {
        Self {
            kind,
            subkind,
            loc: crate::diagnostic::Loc::UNKNOWN,
            ident: None,
            ident2: None,
            ty: None,
            attrs: SmallVec::new(),
            literal: None,
            value: None,
            target: None,
            range: None,
            reference: None,
            params: Vec::new(),
            ports: Vec::new(),
            decls: Vec::new(),
            stmts: Vec::new(),
            else_stmts: Vec::new(),
            assocs: Vec::new(),
            chars: Vec::new(),
            waveforms: Vec::new(),
        }
    }

    /* ----------------------------- builders ---------------------------- */

    pub fn with_loc(mut self, loc: crate::diagnostic::Loc) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_ident(mut self, ident: Ident) -> Self {
        self.ident = Some(ident);
        self
    }

    pub fn with_ident2(mut self, ident: Ident) -> Self {
        self.ident2 = Some(ident);
        self
    }

    pub fn with_type(mut self, ty: Rc<Type>) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_attr(mut self, name: Ident, value: AttrValue) -> Self {
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
        self
    }

    pub fn with_value(mut self, value: Node) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    pub fn with_target(mut self, target: Node) -> Self {
        self.target = Some(Box::new(target));
        self
    }

    pub fn with_range(mut self, range: Node) -> Self {
        self.range = Some(Box::new(range));
        self
    }

    pub fn with_reference(mut self, reference: Node) -> Self {
        self.reference = Some(Box::new(reference));
        self
    }

    pub fn with_params(mut self, params: Vec<Node>) -> Self {
        self.params = params;
        self
    }

    pub fn with_stmts(mut self, stmts: Vec<Node>) -> Self {
        self.stmts = stmts;
        self
    }

    pub fn with_else_stmts(mut self, stmts: Vec<Node>) -> Self {
        self.else_stmts = stmts;
        self
    }

    pub fn with_decls(mut self, decls: Vec<Node>) -> Self {
        self.decls = decls;
        self
    }

    pub fn with_assocs(mut self, assocs: Vec<Node>) -> Self {
        self.assocs = assocs;
        self
    }

    /* ------------------------- convenience literals ---------------------- */

    pub fn integer_literal(v: i64) -> Self {
        let mut n = Node::new(NodeKind::Literal, SubKind::IntegerLit);
        n.literal = Some(LiteralValue::Integer(v));
        n
    }

    pub fn real_literal(v: f64) -> Self {
        let mut n = Node::new(NodeKind::Literal, SubKind::RealLit);
        n.literal = Some(LiteralValue::Real(v));
        n
    }

    pub fn string_literal(v: impl Into<String>) -> Self {
        let mut n = Node::new(NodeKind::Literal, SubKind::StringLit);
        n.literal = Some(LiteralValue::Str(v.into()));
        n
    }

    pub fn enum_literal(pos: u32) -> Self {
        let mut n = Node::new(NodeKind::Literal, SubKind::EnumLit);
        n.literal = Some(LiteralValue::EnumPos(pos));
        n
    }

    pub fn bool_literal(v: bool) -> Self {
        Node::enum_literal(if v { 1 } else { 0 })
    }

    /// An expression-level range, as used by `for` loops, array slices, and
    /// range choices. `left`/`right` are stored in the existing `value`/
    /// `target` slots; direction rides along as the `dir` attribute.
    pub fn range_expr(left: Node, right: Node, dir: crate::ty::Dir) -> Self {
        let code = match dir {
            crate::ty::Dir::To => 0,
            crate::ty::Dir::DownTo => 1,
            crate::ty::Dir::NonNumeric => 2,
        };
        Node::new(NodeKind::RangeExpr, SubKind::None)
            .with_value(left)
            .with_target(right)
            .with_attr(*attr_names::DIR, AttrValue::Int(code))
    }

    pub fn range_dir(&self) -> crate::ty::Dir {
        match self.attr(*attr_names::DIR).and_then(AttrValue::as_int) {
            Some(1) => crate::ty::Dir::DownTo,
            Some(2) => crate::ty::Dir::NonNumeric,
            _ => crate::ty::Dir::To,
        }
    }

    /// Bridges a `RangeExpr` node into the `Range` struct the folding
    /// predicates consume, so a range that appears as a subtree (a `for`
    /// bound, a slice bound, a case range choice) and a range that
    /// constrains a declared type share the same predicate code.
    pub fn as_range(&self) -> Option<crate::ty::Range> {
        if self.kind != NodeKind::RangeExpr {
            return None;
        }
        let left = self.value.as_deref()?.clone();
        let right = self.target.as_deref()?.clone();
        Some(crate::ty::Range::new(left, right, self.range_dir()))
    }

    /* ------------------------------ queries ------------------------------ */

    pub fn attr(&self, name: Ident) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn builtin_name(&self) -> Option<&str> {
        self.attr(*attr_names::BUILTIN).and_then(AttrValue::as_str)
    }

    pub fn is_elide_bounds(&self) -> bool {
        self.attr(*attr_names::ELIDE_BOUNDS)
            .and_then(AttrValue::as_int)
            .map(|v| v != 0)
            .unwrap_or(false)
    }

    pub fn mark_elide_bounds(&mut self) {
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == *attr_names::ELIDE_BOUNDS) {
            slot.1 = AttrValue::Int(1);
        } else {
            self.attrs.push((*attr_names::ELIDE_BOUNDS, AttrValue::Int(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_round_trip() {
        let n = Node::integer_literal(6).with_loc(crate::diagnostic::Loc::new(3, 4));
        assert_eq!(n.literal, Some(LiteralValue::Integer(6)));
        assert_eq!(n.loc, crate::diagnostic::Loc::new(3, 4));
    }

    #[test]
    fn elide_bounds_marker_round_trips() {
        let mut n = Node::new(NodeKind::ArrayRef, SubKind::None);
        assert!(!n.is_elide_bounds());
        n.mark_elide_bounds();
        assert!(n.is_elide_bounds());
    }
}
