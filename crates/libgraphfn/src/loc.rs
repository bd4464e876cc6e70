use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes the path of the file (if any) the position points into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos(
        file: Option<&Path>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "<str>:{}:{}", self.line, self.col),
        }
    }
}

/// Where a schema element was defined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SchemaDefLocation {
    /// One of the built-in scalars (`Boolean`, `Float`, `ID`, `Int`,
    /// `String`).
    GraphQLBuiltIn,

    /// Loaded from an introspection result, which carries no positions.
    Introspection,

    /// Defined in SDL text.
    Schema(FilePosition),
}
