use crate::ast;
use crate::operation::OperationData;
use crate::operation::OperationGraphBuilder;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// The fragment table projectors resolve spreads against, keyed by fragment
/// name.
pub type FragmentTable = IndexMap<String, ast::query::FragmentDefinition>;

/// The resolved form of one operations document: its definitions split by
/// kind plus per-definition [`OperationData`], both in document order and in
/// dependency order.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationGraph {
    pub(crate) document: Option<Arc<ast::query::Document>>,
    pub(crate) fragment_definitions: FragmentTable,
    pub(crate) name_index: HashMap<String, usize>,
    pub(crate) operation_data_list: Vec<OperationData>,
    pub(crate) operation_definitions: Vec<ast::query::OperationDefinition>,
    pub(crate) raw_operation_data_list: Vec<OperationData>,
}
impl OperationGraph {
    /// Helper function that just delegates to
    /// [`OperationGraphBuilder::new()`].
    pub fn builder<'a>() -> OperationGraphBuilder<'a> {
        OperationGraphBuilder::new()
    }

    /// The parsed document this graph was built from (`None` if it could
    /// not be parsed).
    pub fn document(&self) -> Option<&ast::query::Document> {
        self.document.as_deref()
    }

    pub(crate) fn empty() -> Self {
        Self {
            document: None,
            fragment_definitions: IndexMap::new(),
            name_index: HashMap::new(),
            operation_data_list: vec![],
            operation_definitions: vec![],
            raw_operation_data_list: vec![],
        }
    }

    /// Fragment definitions keyed by name, in document order.
    pub fn fragment_definitions(&self) -> &FragmentTable {
        &self.fragment_definitions
    }

    pub fn is_empty(&self) -> bool {
        self.raw_operation_data_list.is_empty()
    }

    /// Find the entry for a named operation or fragment.
    pub fn lookup(&self, name: &str) -> Option<&OperationData> {
        self.name_index.get(name).map(|idx| &self.operation_data_list[*idx])
    }

    /// Every operation and fragment, ordered so that each fragment precedes
    /// everything that spreads it. Definitions are visited in document
    /// order, so a document without spreads keeps its order exactly.
    pub fn operation_data_list(&self) -> &[OperationData] {
        self.operation_data_list.as_slice()
    }

    /// Operation (non-fragment) definitions, in document order.
    pub fn operation_definitions(&self) -> &[ast::query::OperationDefinition] {
        self.operation_definitions.as_slice()
    }

    /// Every operation and fragment, in document order.
    pub fn raw_operation_data_list(&self) -> &[OperationData] {
        self.raw_operation_data_list.as_slice()
    }
}
