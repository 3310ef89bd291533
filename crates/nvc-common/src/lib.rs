pub mod diagnostic;
pub mod ident;
pub mod tree;
pub mod ty;

pub use diagnostic::{Diagnostic, Loc, Reporter, Severity};
pub use ident::Ident;
pub use tree::{attr_names, AttrValue, LiteralValue, Node, NodeKind, SubKind};
pub use ty::{Dir, EnumLit, Range, Type, TypeKind};
