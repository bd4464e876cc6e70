use crate::ast;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::SilentSink;
use crate::loc;
use crate::operation::DocumentCache;
use crate::operation::OperationData;
use crate::operation::OperationGraph;
use crate::operation::OperationGraphBuildError;
use crate::operation::format_variable_name;
use crate::operation::visit::AstNode;
use crate::operation::visit::DefinitionDetails;
use crate::operation::visit::direct_fragment_spreads;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

type Result<T> = std::result::Result<T, OperationGraphBuildError>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum VisitState {
    Done,
    InProgress,
    Unvisited,
}

/// Builds an [`OperationGraph`] from an operations document.
///
/// ```
/// use libgraphfn::operation::OperationGraphBuilder;
///
/// let graph = OperationGraphBuilder::new().build_from_str(
///     "query Q { ...F } fragment F on Query { a }",
///     &serde_json::Map::new(),
/// ).unwrap();
///
/// let names = graph.operation_data_list()
///     .iter()
///     .map(|data| data.display_name())
///     .collect::<Vec<_>>();
/// assert_eq!(names, vec!["F", "Q"]);
/// ```
pub struct OperationGraphBuilder<'a> {
    cache: Option<&'a mut DocumentCache>,
    diagnostics: &'a dyn DiagnosticSink,
    file_path: Option<PathBuf>,
}
impl<'a> OperationGraphBuilder<'a> {
    /// Build from an already-parsed document.
    pub fn build(
        self,
        document: &ast::query::Document,
        variable_values: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<OperationGraph> {
        self.build_from_document(Arc::new(document.clone()), variable_values)
    }

    /// Parse `content` (through the cache, if one was given) and build from
    /// it.
    ///
    /// A document that fails to parse produces an empty graph and a
    /// [`Diagnostic::DocumentParseFailure`] rather than an error.
    pub fn build_from_str(
        mut self,
        content: &str,
        variable_values: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<OperationGraph> {
        let parsed = match self.cache.take() {
            Some(cache) => cache.get_or_parse(content),
            None => ast::query::parse(content).map(Arc::new),
        };

        match parsed {
            Ok(document) => self.build_from_document(document, variable_values),
            Err(err) => {
                self.diagnostics.report(Diagnostic::DocumentParseFailure {
                    error: err.to_string(),
                });
                Ok(OperationGraph::empty())
            },
        }
    }

    /// Reuse the parsed document when the same text is built again.
    pub fn cache(mut self, cache: &'a mut DocumentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Where non-fatal problems are reported. Defaults to a
    /// [`SilentSink`].
    pub fn diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// The file the document was read from; used for definition locations.
    pub fn file_path(mut self, file_path: impl AsRef<Path>) -> Self {
        self.file_path = Some(file_path.as_ref().to_path_buf());
        self
    }

    pub fn new() -> Self {
        Self {
            cache: None,
            diagnostics: &SilentSink,
            file_path: None,
        }
    }

    fn build_from_document(
        self,
        document: Arc<ast::query::Document>,
        variable_values: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<OperationGraph> {
        let definitions = &document.definitions;
        let details = definitions.iter()
            .map(DefinitionDetails::from_definition)
            .collect::<Vec<_>>();
        let def_locations = details.iter()
            .map(|detail| loc::FilePosition::from_pos(self.file_path.as_deref(), detail.pos))
            .collect::<Vec<_>>();

        let mut named_defs = HashMap::<&str, usize>::new();
        let mut fragment_definitions = IndexMap::new();
        let mut operation_definitions = vec![];
        for (idx, def) in definitions.iter().enumerate() {
            if let Some(name) = details[idx].name {
                if let Some(first_idx) = named_defs.get(name) {
                    return Err(OperationGraphBuildError::DuplicateDefinitionName {
                        name: name.to_string(),
                        first_def_location: def_locations[*first_idx].clone(),
                        second_def_location: def_locations[idx].clone(),
                    });
                }
                named_defs.insert(name, idx);
            }

            match def {
                ast::query::Definition::Fragment(frag_def) => {
                    fragment_definitions.insert(frag_def.name.to_string(), frag_def.clone());
                },
                ast::query::Definition::Operation(op_def) => {
                    operation_definitions.push(op_def.clone());
                },
            }
        }

        // Edges point only at fragments; spreads of undefined fragments are
        // dropped here.
        let edges = definitions.iter().map(|def| {
            direct_fragment_spreads(AstNode::from_definition(def))
                .into_iter()
                .filter_map(|fragment_name| {
                    let target = named_defs.get(fragment_name)
                        .copied()
                        .filter(|idx| details[*idx].type_condition.is_some());
                    if target.is_none() {
                        log::debug!(
                            "Ignoring spread of undefined fragment `{fragment_name}`.",
                        );
                    }
                    target
                })
                .collect::<Vec<_>>()
        }).collect::<Vec<_>>();

        let raw_operation_data_list = definitions.iter().enumerate().map(|(idx, def)| {
            let detail = &details[idx];
            let dependencies = transitive_dependencies(idx, &edges);
            let display_name = detail.display_name();

            OperationData {
                definition: def.clone(),
                def_location: def_locations[idx].clone(),
                document_string: ast::query::print_definitions(
                    std::iter::once(def)
                        .chain(dependencies.iter().map(|dep_idx| &definitions[*dep_idx])),
                ),
                fragment_dependencies: dependencies.iter()
                    .map(|dep_idx| details[*dep_idx].display_name())
                    .collect(),
                kind: detail.kind,
                name: detail.name.map(|name| name.to_string()),
                operation_string: ast::query::print_definitions([def]),
                type_condition: detail.type_condition.map(|name| name.to_string()),
                variable_name: format_variable_name(display_name.as_str()),
                variables: detail.variable_definitions.iter()
                    .filter_map(|var_def| {
                        variable_values.get(var_def.name.as_str())
                            .map(|value| (var_def.name.to_string(), value.clone()))
                    })
                    .collect(),
                display_name,
            }
        }).collect::<Vec<_>>();

        let operation_data_list = self.topological_order(&details, &edges)
            .into_iter()
            .map(|idx| raw_operation_data_list[idx].clone())
            .collect::<Vec<_>>();

        let name_index = operation_data_list.iter()
            .enumerate()
            .filter_map(|(idx, data)| data.name.clone().map(|name| (name, idx)))
            .collect();

        Ok(OperationGraph {
            fragment_definitions,
            name_index,
            operation_data_list,
            operation_definitions,
            raw_operation_data_list,
            document: Some(Arc::clone(&document)),
        })
    }

    /// Depth-first post-order over the definitions (visited in document
    /// order) with three-colour marking. An edge back into an in-progress
    /// definition is a cycle: it is reported and skipped.
    fn topological_order(
        &self,
        details: &[DefinitionDetails<'_>],
        edges: &[Vec<usize>],
    ) -> Vec<usize> {
        let mut states = vec![VisitState::Unvisited; edges.len()];
        let mut stack = vec![];
        let mut order = Vec::with_capacity(edges.len());
        for idx in 0..edges.len() {
            self.visit(idx, details, edges, &mut states, &mut stack, &mut order);
        }
        order
    }

    fn visit(
        &self,
        idx: usize,
        details: &[DefinitionDetails<'_>],
        edges: &[Vec<usize>],
        states: &mut [VisitState],
        stack: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) {
        match states[idx] {
            VisitState::Done => return,
            VisitState::InProgress => {
                let cycle_start = stack.iter()
                    .position(|stack_idx| *stack_idx == idx)
                    .unwrap_or(0);
                let mut cycle_path = stack[cycle_start..].iter()
                    .map(|stack_idx| details[*stack_idx].display_name())
                    .collect::<Vec<_>>();
                cycle_path.push(details[idx].display_name());
                self.diagnostics.report(Diagnostic::FragmentCycle { cycle_path });
                return;
            },
            VisitState::Unvisited => (),
        }

        states[idx] = VisitState::InProgress;
        stack.push(idx);
        for dep_idx in &edges[idx] {
            self.visit(*dep_idx, details, edges, states, stack, order);
        }
        stack.pop();
        states[idx] = VisitState::Done;
        order.push(idx);
    }
}
impl Default for OperationGraphBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every definition reachable from `root` over fragment edges (excluding
/// `root` itself), dependencies before dependents.
fn transitive_dependencies(root: usize, edges: &[Vec<usize>]) -> Vec<usize> {
    fn collect(
        idx: usize,
        edges: &[Vec<usize>],
        visited: &mut [bool],
        order: &mut Vec<usize>,
    ) {
        for dep_idx in &edges[idx] {
            if !visited[*dep_idx] {
                visited[*dep_idx] = true;
                collect(*dep_idx, edges, visited, order);
                order.push(*dep_idx);
            }
        }
    }

    let mut visited = vec![false; edges.len()];
    visited[root] = true;
    let mut order = vec![];
    collect(root, edges, &mut visited, &mut order);
    order
}
