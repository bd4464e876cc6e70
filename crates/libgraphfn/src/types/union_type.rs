use crate::loc;
use crate::types::NamedGraphQLTypeRef;

/// Represents a
/// [union type](https://spec.graphql.org/October2021/#sec-Unions).
#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) members: Vec<NamedGraphQLTypeRef>,
    pub(crate) name: String,
}
impl UnionType {
    /// Names of the member types, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|member| member.name())
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
