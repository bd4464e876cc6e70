use crate::ast;
use crate::loc;
use crate::operation::OperationKind;
use serde::Serialize;

/// The resolved view of one operation or fragment definition within an
/// [`OperationGraph`](crate::operation::OperationGraph).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OperationData {
    #[serde(skip)]
    pub(crate) definition: ast::query::Definition,
    pub(crate) def_location: loc::FilePosition,
    pub(crate) display_name: String,
    pub(crate) document_string: String,
    pub(crate) fragment_dependencies: Vec<String>,
    pub(crate) kind: OperationKind,
    pub(crate) name: Option<String>,
    pub(crate) operation_string: String,
    pub(crate) type_condition: Option<String>,
    pub(crate) variable_name: String,
    pub(crate) variables: serde_json::Map<String, serde_json::Value>,
}
impl OperationData {
    pub fn def_location(&self) -> &loc::FilePosition {
        &self.def_location
    }

    /// The AST node this entry was built from.
    pub fn definition(&self) -> &ast::query::Definition {
        &self.definition
    }

    /// The definition's name, or `<Unnamed:kind>` for anonymous operations.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// This definition followed by every fragment it transitively spreads,
    /// printed as a single document that a server can execute as-is.
    pub fn document_string(&self) -> &str {
        self.document_string.as_str()
    }

    /// Names of every fragment reachable from this definition's selection
    /// set, dependencies before dependents.
    pub fn fragment_dependencies(&self) -> &[String] {
        self.fragment_dependencies.as_slice()
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// This definition alone, printed.
    pub fn operation_string(&self) -> &str {
        self.operation_string.as_str()
    }

    /// The fragment's type condition (`None` for operations).
    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }

    /// [`display_name`](Self::display_name) in `SCREAMING_SNAKE_CASE`, as
    /// produced by [`format_variable_name`].
    pub fn variable_name(&self) -> &str {
        self.variable_name.as_str()
    }

    /// The caller-supplied variable values whose names this operation
    /// declares, in declaration order.
    pub fn variables(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.variables
    }
}

/// Normalize a definition name for constant-style naming schemes.
///
/// The first letter is upper-cased, each lowercase-to-uppercase boundary
/// gets an underscore, and the result is upper-cased:
/// `fetchUserById` becomes `FETCH_USER_BY_ID`.
pub fn format_variable_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len() + 4);
    let mut prev_is_lowercase = false;
    for (idx, ch) in name.chars().enumerate() {
        if idx > 0 && prev_is_lowercase && ch.is_uppercase() {
            formatted.push('_');
        }
        formatted.extend(ch.to_uppercase());
        prev_is_lowercase = ch.is_lowercase();
    }
    formatted
}
