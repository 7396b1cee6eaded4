//! Database schema compilers.
//!
//! Each compiler converts `SchemaRelation` definitions into a target
//! representation: Cozo Datalog for storage, Graphviz DOT for the diagram.

pub mod cozo;
pub mod dot;

pub use cozo::CozoCompiler;
pub use dot::DotCompiler;
