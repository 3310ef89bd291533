//! The type model.

use crate::ident::Ident;
use crate::tree::Node;
use std::rc::Rc;

/// Direction of a range. `NonNumeric` is the sentinel used for ranges whose
/// endpoints aren't orderable numerically (e.g. an enumeration range given
/// only as a subtype name) — folding predicates simply refuse those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    To,
    DownTo,
    NonNumeric,
}

/// `(left, right, kind)`. Endpoints are expressions, not values: they
/// may themselves need folding before `folded_bounds`/`folded_length` can
/// say anything about them.
#[derive(Debug, Clone)]
pub struct Range {
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub dir: Dir,
}

impl Range {
    pub fn new(left: Node, right: Node, dir: Dir) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            dir,
        }
    }
}

/// One literal in an enumeration type's ordered declaration list, carrying
/// its position.
#[derive(Debug, Clone)]
pub struct EnumLit {
    pub ident: Ident,
    pub pos: u32,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Integer {
        range: Range,
    },
    Real {
        range: Range,
    },
    Physical {
        range: Range,
    },
    Enum {
        literals: Vec<EnumLit>,
    },
    Access {
        target: Rc<Type>,
    },
    File {
        target: Rc<Type>,
    },
    Record {
        fields: Vec<(Ident, Rc<Type>)>,
    },
    /// Ordered dimension ranges plus an element type.
    ConstrainedArray {
        dims: Vec<Range>,
        element: Rc<Type>,
    },
    /// Ordered index-constraint types plus an element type; the index
    /// ranges themselves are deferred to the object declaration.
    UnconstrainedArray {
        index_types: Vec<Rc<Type>>,
        element: Rc<Type>,
    },
    /// A base type plus one or more dimension ranges (index or scalar
    /// constraint).
    Subtype {
        base: Rc<Type>,
        constraints: Vec<Range>,
    },
}

#[derive(Debug, Clone)]
pub struct Type {
    pub kind: TypeKind,
    pub name: Option<Ident>,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind, name: None }
    }

    pub fn named(mut self, name: Ident) -> Self {
        self.name = Some(name);
        self
    }

    /// Follow `Subtype` wrappers down to the first non-subtype ancestor.
    pub fn base(&self) -> &Type {
        match &self.kind {
            TypeKind::Subtype { base, .. } => base.base(),
            _ => self,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.base().kind,
            TypeKind::ConstrainedArray { .. } | TypeKind::UnconstrainedArray { .. }
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.base().kind, TypeKind::Integer { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.base().kind, TypeKind::Enum { .. })
    }

    /// The scalar range that constrains this type, if it has exactly one
    /// (integer/real/physical base, or a scalar subtype of one).
    pub fn scalar_range(&self) -> Option<&Range> {
        match &self.kind {
            TypeKind::Integer { range } | TypeKind::Real { range } | TypeKind::Physical { range } => {
                Some(range)
            }
            TypeKind::Subtype { base, constraints } => {
                constraints.first().or_else(|| base.scalar_range())
            }
            _ => None,
        }
    }

    /// The enum literal list of the base type, if this is (a subtype of) an
    /// enumeration.
    pub fn enum_literals(&self) -> Option<&[EnumLit]> {
        match &self.base().kind {
            TypeKind::Enum { literals } => Some(literals),
            _ => None,
        }
    }

    /// Per-dimension ranges for a constrained array (or a subtype thereof).
    pub fn array_dims(&self) -> Option<&[Range]> {
        match &self.kind {
            TypeKind::ConstrainedArray { dims, .. } => Some(dims),
            TypeKind::Subtype { base, constraints } => {
                if !constraints.is_empty() {
                    Some(constraints)
                } else {
                    base.array_dims()
                }
            }
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&Rc<Type>> {
        match &self.base().kind {
            TypeKind::ConstrainedArray { element, .. } => Some(element),
            TypeKind::UnconstrainedArray { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Index-subtype bases for an unconstrained array, used when an
    /// aggregate's bounds must be derived from the index subtype itself
    ///.
    pub fn unconstrained_index_types(&self) -> Option<&[Rc<Type>]> {
        match &self.base().kind {
            TypeKind::UnconstrainedArray { index_types, .. } => Some(index_types),
            _ => None,
        }
    }
}
