use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("Failure to parse the operations document: {err}")]
    DocumentParseError {
        err: String,
    },
}
