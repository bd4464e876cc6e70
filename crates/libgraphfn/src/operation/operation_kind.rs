use serde::Serialize;

/// The kind of an executable definition: one of the three operation types,
/// or a fragment.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Fragment,
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }

    /// The display name given to a definition that has no name of its own,
    /// e.g. `<Unnamed:query>`.
    pub fn unnamed_display_name(&self) -> String {
        format!("<Unnamed:{}>", self.as_str())
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
