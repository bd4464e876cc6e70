use crate::loc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OperationGraphBuildError {
    /// Operations and fragments share one namespace; every named definition
    /// in a document must have a distinct name.
    #[error(
        "`{name}` is defined more than once ({first_def_location} and \
        {second_def_location})"
    )]
    DuplicateDefinitionName {
        name: String,
        first_def_location: loc::FilePosition,
        second_def_location: loc::FilePosition,
    },
}
