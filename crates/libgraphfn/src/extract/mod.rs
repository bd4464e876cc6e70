mod directive_metadata_extractor;
mod extract_error;
mod extracted_function;
mod id_provider;

pub use directive_metadata_extractor::DEFAULT_DIRECTIVE_NAME;
pub use directive_metadata_extractor::DirectiveMetadataExtractor;
pub use extract_error::ExtractError;
pub use extracted_function::ExtractedFunction;
pub use id_provider::IdProvider;
pub use id_provider::SequentialIdProvider;
pub use id_provider::UuidV4IdProvider;
