use crate::ast;
use crate::operation::OperationKind;

/// The closed set of executable-document nodes the graph builder and the
/// projectors traverse.
#[derive(Clone, Copy, Debug)]
pub enum AstNode<'ast> {
    Field(&'ast ast::query::Field),
    FragmentDefinition(&'ast ast::query::FragmentDefinition),
    FragmentSpread(&'ast ast::query::FragmentSpread),
    InlineFragment(&'ast ast::query::InlineFragment),
    OperationDefinition(&'ast ast::query::OperationDefinition),
}
impl<'ast> AstNode<'ast> {
    pub fn from_definition(def: &'ast ast::query::Definition) -> Self {
        match def {
            ast::query::Definition::Fragment(frag_def) => Self::FragmentDefinition(frag_def),
            ast::query::Definition::Operation(op_def) => Self::OperationDefinition(op_def),
        }
    }

    fn from_selection(selection: &'ast ast::query::Selection) -> Self {
        match selection {
            ast::query::Selection::Field(field) => Self::Field(field),
            ast::query::Selection::FragmentSpread(spread) => Self::FragmentSpread(spread),
            ast::query::Selection::InlineFragment(inline) => Self::InlineFragment(inline),
        }
    }

    /// The selection set directly owned by this node. Fragment spreads own
    /// none; a leaf field owns an empty one.
    pub fn selection_set(&self) -> Option<&'ast ast::query::SelectionSet> {
        match self {
            Self::Field(field) => Some(&field.selection_set),
            Self::FragmentDefinition(frag_def) => Some(&frag_def.selection_set),
            Self::FragmentSpread(_) => None,
            Self::InlineFragment(inline) => Some(&inline.selection_set),
            Self::OperationDefinition(op_def) =>
                Some(DefinitionDetails::from_operation(op_def).selection_set),
        }
    }

    /// Visit this node and then every node beneath it, depth-first in
    /// document order. Fragment spreads are visited but not followed.
    pub fn walk(self, visitor: &mut impl FnMut(AstNode<'ast>)) {
        visitor(self);
        if let Some(selection_set) = self.selection_set() {
            for selection in &selection_set.items {
                Self::from_selection(selection).walk(visitor);
            }
        }
    }
}

/// Names of the fragments spread directly within a definition's selection
/// set (including spreads nested inside fields and inline fragments), in
/// first-occurrence order and without repeats.
pub fn direct_fragment_spreads<'ast>(node: AstNode<'ast>) -> Vec<&'ast str> {
    let mut names: Vec<&'ast str> = vec![];
    node.walk(&mut |node| {
        if let AstNode::FragmentSpread(spread) = node {
            let name = spread.fragment_name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    });
    names
}

/// A uniform view over the parts of an operation or fragment definition
/// that the rest of the crate cares about.
#[derive(Clone, Copy, Debug)]
pub struct DefinitionDetails<'ast> {
    pub directives: &'ast [ast::query::Directive],
    pub kind: OperationKind,
    pub name: Option<&'ast str>,
    pub pos: graphql_parser::Pos,
    pub selection_set: &'ast ast::query::SelectionSet,
    pub type_condition: Option<&'ast str>,
    pub variable_definitions: &'ast [ast::query::VariableDefinition],
}
impl<'ast> DefinitionDetails<'ast> {
    pub fn from_definition(def: &'ast ast::query::Definition) -> Self {
        match def {
            ast::query::Definition::Fragment(frag_def) => Self::from_fragment(frag_def),
            ast::query::Definition::Operation(op_def) => Self::from_operation(op_def),
        }
    }

    pub fn from_fragment(frag_def: &'ast ast::query::FragmentDefinition) -> Self {
        let ast::query::TypeCondition::On(type_condition) = &frag_def.type_condition;
        Self {
            directives: &frag_def.directives,
            kind: OperationKind::Fragment,
            name: Some(frag_def.name.as_str()),
            pos: frag_def.position,
            selection_set: &frag_def.selection_set,
            type_condition: Some(type_condition.as_str()),
            variable_definitions: &[],
        }
    }

    pub fn from_operation(op_def: &'ast ast::query::OperationDefinition) -> Self {
        use ast::query::OperationDefinition;

        match op_def {
            OperationDefinition::SelectionSet(selection_set) => Self {
                directives: &[],
                kind: OperationKind::Query,
                name: None,
                pos: selection_set.span.0,
                selection_set,
                type_condition: None,
                variable_definitions: &[],
            },

            OperationDefinition::Query(ast::query::Query {
                directives,
                name,
                position,
                selection_set,
                variable_definitions,
                ..
            }) => Self {
                directives,
                kind: OperationKind::Query,
                name: name.as_deref(),
                pos: *position,
                selection_set,
                type_condition: None,
                variable_definitions,
            },

            OperationDefinition::Mutation(ast::query::Mutation {
                directives,
                name,
                position,
                selection_set,
                variable_definitions,
                ..
            }) => Self {
                directives,
                kind: OperationKind::Mutation,
                name: name.as_deref(),
                pos: *position,
                selection_set,
                type_condition: None,
                variable_definitions,
            },

            OperationDefinition::Subscription(ast::query::Subscription {
                directives,
                name,
                position,
                selection_set,
                variable_definitions,
                ..
            }) => Self {
                directives,
                kind: OperationKind::Subscription,
                name: name.as_deref(),
                pos: *position,
                selection_set,
                type_condition: None,
                variable_definitions,
            },
        }
    }

    /// The definition's name, or `<Unnamed:kind>` when it has none.
    pub fn display_name(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => self.kind.unnamed_display_name(),
        }
    }
}

/// Mutable access to the directive list of an operation definition. Bare
/// selection-set shorthand queries carry no directives and yield `None`.
pub(crate) fn operation_directives_mut(
    op_def: &mut ast::query::OperationDefinition,
) -> Option<&mut Vec<ast::query::Directive>> {
    use ast::query::OperationDefinition;

    match op_def {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => Some(&mut query.directives),
        OperationDefinition::Mutation(mutation) => Some(&mut mutation.directives),
        OperationDefinition::Subscription(subscription) => Some(&mut subscription.directives),
    }
}
