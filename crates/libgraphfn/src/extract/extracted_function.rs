use crate::ast;
use crate::operation::OperationKind;
use serde::Serialize;

/// An operation definition annotated for client-function generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractedFunction {
    pub(crate) description: String,
    pub(crate) id: String,
    pub(crate) kind: OperationKind,
    pub(crate) operation_name: Option<String>,
    pub(crate) operation_string: String,
    pub(crate) operation_string_without_netlify_directive: String,
    #[serde(skip)]
    pub(crate) parsed_operation: ast::query::OperationDefinition,
}
impl ExtractedFunction {
    /// The directive's `doc:` argument, or empty.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// The directive's `id:` argument, or a freshly minted id.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// The printed operation, directive included.
    pub fn operation_string(&self) -> &str {
        self.operation_string.as_str()
    }

    /// The printed operation with the annotating directive removed; this is
    /// the text sent to a GraphQL endpoint.
    pub fn operation_string_without_netlify_directive(&self) -> &str {
        self.operation_string_without_netlify_directive.as_str()
    }

    pub fn parsed_operation(&self) -> &ast::query::OperationDefinition {
        &self.parsed_operation
    }
}
