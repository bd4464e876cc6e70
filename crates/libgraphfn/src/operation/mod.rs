mod document_cache;
mod operation_data;
mod operation_graph;
mod operation_graph_build_error;
mod operation_graph_builder;
mod operation_kind;
mod visit;

pub use document_cache::DocumentCache;
pub use operation_data::OperationData;
pub use operation_data::format_variable_name;
pub use operation_graph::FragmentTable;
pub use operation_graph::OperationGraph;
pub use operation_graph_build_error::OperationGraphBuildError;
pub use operation_graph_builder::OperationGraphBuilder;
pub use operation_kind::OperationKind;
pub use visit::AstNode;
pub use visit::DefinitionDetails;
pub(crate) use visit::operation_directives_mut;

#[cfg(test)]
mod tests;
