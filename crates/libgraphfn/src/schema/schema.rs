use crate::operation::OperationKind;
use crate::schema::SchemaBuilder;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use std::collections::HashMap;

/// Represents a fully built and immutable GraphQL schema.
///
/// This is the schema accessor the projectors work against: root operation
/// types, lookup of named types, and (through the returned
/// [`GraphQLType`]s) field and enum-value introspection.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) query_type: NamedGraphQLTypeRef,
    pub(crate) mutation_type: Option<NamedGraphQLTypeRef>,
    pub(crate) subscription_type: Option<NamedGraphQLTypeRef>,
    pub(crate) types: HashMap<String, GraphQLType>,
}
impl Schema {
    /// Returns a [`HashMap<String, GraphQLType>`] containing all types defined
    /// within this [`Schema`], including the built-in scalars.
    pub fn all_types(&self) -> &HashMap<String, GraphQLType> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up a named type.
    pub fn lookup_type(&self, type_name: &str) -> Option<&GraphQLType> {
        self.types.get(type_name)
    }

    /// Returns this [`Schema`]'s Mutation root operation type (if one was
    /// defined).
    ///
    /// Prefer this over looking for a type named `"Mutation"`: a
    /// `schema { mutation: ... }` block may
    /// [override the default name](https://spec.graphql.org/October2021/#RootOperationTypeDefinition).
    pub fn mutation_type(&self) -> Option<&GraphQLType> {
        self.mutation_type.as_ref().and_then(|named_ref| named_ref.deref(self).ok())
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// [`SchemaBuilder::build()`] refuses to produce a schema without one, so
    /// this only returns `None` for a hand-assembled [`Schema`].
    pub fn query_type(&self) -> Option<&GraphQLType> {
        self.query_type.deref(self).ok()
    }

    /// The root type an operation of the given kind selects against.
    /// Fragments have no root type; their type condition is used instead.
    pub fn root_type(&self, kind: &OperationKind) -> Option<&GraphQLType> {
        match kind {
            OperationKind::Fragment => None,
            OperationKind::Mutation => self.mutation_type(),
            OperationKind::Query => self.query_type(),
            OperationKind::Subscription => self.subscription_type(),
        }
    }

    /// Returns this [`Schema`]'s Subscription root operation type (if one was
    /// defined).
    pub fn subscription_type(&self) -> Option<&GraphQLType> {
        self.subscription_type.as_ref().and_then(|named_ref| named_ref.deref(self).ok())
    }
}
