use crate::file_reader;
use crate::loc;
use crate::operation::OperationKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("Multiple definitions of the `{field_name}` field on the `{type_name}` type")]
    DuplicateFieldDefinition {
        field_name: String,
        location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("Multiple definitions of the `{value_name}` value on the `{enum_name}` enum")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        location: loc::SchemaDefLocation,
        value_name: String,
    },

    #[error("Multiple `{operation:?}` root operation types defined")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: loc::SchemaDefLocation,
        location2: loc::SchemaDefLocation,
    },

    #[error("Multiple definitions of the `{type_name}` type")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("Attempted to extend the `{type_name}` type, which is not defined")]
    ExtensionOfUndefinedType {
        location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error(
        "Attempted to extend the `{type_name}` type as a(n) {extension_kind} \
        type, but it is defined as a different kind of type"
    )]
    ExtensionTypeMismatch {
        extension_kind: String,
        location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("Names starting with `__` are reserved: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("Malformed introspection result: {reason}")]
    MalformedIntrospection {
        reason: String,
    },

    #[error("No Query root operation type is defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The `{operation:?}` root operation type must be an object type, but \
        `{type_name}` is not"
    )]
    NonObjectRootOperationType {
        operation: OperationKind,
        type_name: String,
    },

    #[error("Union `{union_name}` lists `{member_name}`, which is not an object type")]
    NonObjectUnionMember {
        member_name: String,
        union_name: String,
    },

    #[error("Error parsing schema document {file:?}: {err}")]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("Failure while trying to read a schema file from disk: {0}")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error("The `{operation:?}` root operation type `{type_name}` is not defined")]
    UndefinedRootOperationType {
        operation: OperationKind,
        type_name: String,
    },

    #[error("Union `{union_name}` lists `{member_name}`, which is not defined")]
    UndefinedUnionMember {
        member_name: String,
        union_name: String,
    },
}
