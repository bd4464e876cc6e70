use crate::ast;
use crate::extract::ExtractError;
use crate::extract::ExtractedFunction;
use crate::extract::IdProvider;
use crate::extract::UuidV4IdProvider;
use crate::operation::DefinitionDetails;
use crate::operation::operation_directives_mut;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, ExtractError>;

pub const DEFAULT_DIRECTIVE_NAME: &str = "netlify";

/// Picks out the operations annotated with `@netlify(id: "...", doc: "...")`
/// (or whichever directive name is configured).
///
/// ```
/// use libgraphfn::extract::DirectiveMetadataExtractor;
///
/// let functions = DirectiveMetadataExtractor::new().extract_str(
///     r#"query Me @netlify(id: "me", doc: "Who am I") { me } query Other { me }"#,
/// ).unwrap();
///
/// assert_eq!(functions.len(), 1);
/// assert_eq!(functions["me"].description(), "Who am I");
/// assert_eq!(
///     functions["me"].operation_string_without_netlify_directive().trim(),
///     "query Me {\n  me\n}",
/// );
/// ```
pub struct DirectiveMetadataExtractor<'a> {
    directive_name: String,
    id_provider: &'a dyn IdProvider,
}
impl<'a> DirectiveMetadataExtractor<'a> {
    pub fn directive_name(mut self, directive_name: impl Into<String>) -> Self {
        self.directive_name = directive_name.into();
        self
    }

    /// Extract every annotated top-level operation, keyed by id.
    ///
    /// Operations without the directive are skipped. When two operations
    /// end up with the same id, the later one replaces the earlier one.
    pub fn extract(
        &self,
        document: &ast::query::Document,
    ) -> IndexMap<String, ExtractedFunction> {
        let mut functions = IndexMap::new();
        for def in &document.definitions {
            let ast::query::Definition::Operation(op_def) = def else {
                continue;
            };
            if let Some(function) = self.extract_operation(op_def) {
                if functions.contains_key(function.id()) {
                    log::debug!(
                        "Extracted function id `{}` was already taken; replacing it.",
                        function.id(),
                    );
                }
                functions.insert(function.id.to_string(), function);
            }
        }
        functions
    }

    pub fn extract_str(
        &self,
        content: &str,
    ) -> Result<IndexMap<String, ExtractedFunction>> {
        let document = ast::query::parse(content).map_err(|err| {
            ExtractError::DocumentParseError {
                err: err.to_string(),
            }
        })?;
        Ok(self.extract(&document))
    }

    /// Where ids are minted for operations whose directive carries no `id:`.
    /// Defaults to [`UuidV4IdProvider`].
    pub fn id_provider(mut self, id_provider: &'a dyn IdProvider) -> Self {
        self.id_provider = id_provider;
        self
    }

    pub fn new() -> Self {
        Self {
            directive_name: DEFAULT_DIRECTIVE_NAME.to_string(),
            id_provider: &UuidV4IdProvider,
        }
    }

    fn extract_operation(
        &self,
        op_def: &ast::query::OperationDefinition,
    ) -> Option<ExtractedFunction> {
        let details = DefinitionDetails::from_operation(op_def);
        let directive = details.directives
            .iter()
            .find(|directive| directive.name == self.directive_name)?;

        let id = match string_argument(directive, "id") {
            Some(id) => id.to_string(),
            None => self.id_provider.next_id(),
        };
        let description = string_argument(directive, "doc")
            .unwrap_or_default()
            .to_string();

        let mut stripped = op_def.clone();
        if let Some(directives) = operation_directives_mut(&mut stripped) {
            directives.retain(|directive| directive.name != self.directive_name);
        }

        Some(ExtractedFunction {
            description,
            id,
            kind: details.kind,
            operation_name: details.name.map(|name| name.to_string()),
            operation_string: ast::query::print_operation(op_def),
            operation_string_without_netlify_directive: ast::query::print_operation(&stripped),
            parsed_operation: op_def.clone(),
        })
    }
}
impl Default for DirectiveMetadataExtractor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// The value of a string-typed directive argument. Arguments of any other
/// value kind are treated as absent.
fn string_argument<'d>(directive: &'d ast::query::Directive, name: &str) -> Option<&'d str> {
    directive.arguments
        .iter()
        .find(|(arg_name, _)| arg_name == name)
        .and_then(|(_, value)| match value {
            ast::query::Value::String(value) => Some(value.as_str()),
            _ => None,
        })
}
