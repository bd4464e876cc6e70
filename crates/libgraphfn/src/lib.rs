//! Operation-graph resolution and type projection for GraphQL documents.
//!
//! `libgraphfn` takes a GraphQL [`Schema`](schema::Schema) and an operations
//! document and produces the resolved model that client-function generators
//! consume:
//!
//! * [`operation::OperationGraphBuilder`] parses a document into a
//!   dependency-ordered list of [`operation::OperationData`] entries.
//! * [`projection::TypeProjector`] and [`projection::SelectionProjector`]
//!   turn GraphQL types and selection sets into [`projection::TypeShape`]s
//!   that render as TypeScript.
//! * [`extract::DirectiveMetadataExtractor`] picks out the operations
//!   annotated with `@netlify(id: ..., doc: ...)`.

pub mod ast;
mod diagnostics;
pub mod extract;
pub mod file_reader;
pub mod loc;
mod named_ref;
pub mod operation;
pub mod projection;
pub mod schema;
pub mod types;

pub use diagnostics::CollectingSink;
pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::LogSink;
pub use diagnostics::SilentSink;
pub use diagnostics::TeeSink;
pub use schema::Schema;
