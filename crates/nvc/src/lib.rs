//! Embeddable facade re-exporting the public surface of the nvc semantic
//! core for front ends that parse VHDL into the
//! tree model `nvc_common` defines and want folding/bounds-checking without
//! depending on `nvc-core` directly.

pub use nvc_common::{
    attr_names, AttrValue, Diagnostic, Dir, EnumLit, Ident, LiteralValue, Loc, Node, NodeKind,
    Range, Reporter, Severity, SubKind, Type, TypeKind,
};
pub use nvc_core::{eval, BoundsChecker, Options};
