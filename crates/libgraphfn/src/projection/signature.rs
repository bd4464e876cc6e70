use crate::Schema;
use crate::operation::DefinitionDetails;
use crate::operation::FragmentTable;
use crate::operation::OperationData;
use crate::operation::OperationKind;
use crate::projection::FieldShape;
use crate::projection::OperationShape;
use crate::projection::SelectionProjector;
use crate::projection::TypeShape;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

type Result<T> = std::result::Result<T, SignatureError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SignatureError {
    #[error("A function cannot be generated for an anonymous {kind}")]
    MissingOperationName {
        kind: OperationKind,
    },

    #[error("`{name}` is a fragment, not an operation")]
    NotAnOperation {
        name: String,
    },

    #[error("`{name}` is an operation, not a fragment")]
    NotAFragment {
        name: String,
    },
}

/// The signature of the client function generated for one named operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionSignature {
    /// e.g. `fetchUserById` for `query userById`.
    pub function_name: String,
    pub kind: OperationKind,
    pub operation_name: String,
    pub return_shape: OperationShape,
    /// The rendered `{ data: ...; errors: ... }` type.
    pub return_signature: String,
    pub variable_shape: TypeShape,
    /// The rendered variables object type. Nullable variables, and variables
    /// with a default value, are optional.
    pub variable_signature: String,
}
impl FunctionSignature {
    pub fn for_operation(
        schema: &Schema,
        operation_data: &OperationData,
        fragments: &FragmentTable,
    ) -> Result<Self> {
        Self::for_operation_with(&SelectionProjector::new(schema, fragments), operation_data)
    }

    /// Like [`for_operation`](Self::for_operation), but with a
    /// caller-configured projector (e.g. one reporting diagnostics).
    pub fn for_operation_with(
        projector: &SelectionProjector<'_>,
        operation_data: &OperationData,
    ) -> Result<Self> {
        let details = DefinitionDetails::from_definition(operation_data.definition());
        if details.kind == OperationKind::Fragment {
            return Err(SignatureError::NotAnOperation {
                name: operation_data.display_name().to_string(),
            });
        }
        let Some(operation_name) = details.name else {
            return Err(SignatureError::MissingOperationName {
                kind: details.kind,
            });
        };

        let mut variables = IndexMap::new();
        for var_def in details.variable_definitions {
            let var_annot = TypeAnnotation::from_ast_type(&var_def.var_type);
            variables.insert(var_def.name.to_string(), FieldShape {
                description: None,
                nullable: var_annot.nullable() || var_def.default_value.is_some(),
                shape: projector.type_projector().project(&var_annot),
            });
        }
        let variable_shape = TypeShape::Object(variables);
        let return_shape = projector.project_operation_data(operation_data);

        Ok(Self {
            function_name: function_name(details.kind, operation_name),
            kind: details.kind,
            operation_name: operation_name.to_string(),
            return_signature: return_shape.to_string(),
            return_shape,
            variable_signature: variable_shape.to_string(),
            variable_shape,
        })
    }
}

/// The type aliases generated for a fragment: the full type its condition
/// names, and the part of it the fragment selects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FragmentSignature {
    pub full_type_signature: String,
    pub name: String,
    pub selection_signature: String,
    pub type_condition: String,
}
impl FragmentSignature {
    pub fn for_fragment(
        schema: &Schema,
        fragment_data: &OperationData,
        fragments: &FragmentTable,
    ) -> Result<Self> {
        Self::for_fragment_with(&SelectionProjector::new(schema, fragments), fragment_data)
    }

    pub fn for_fragment_with(
        projector: &SelectionProjector<'_>,
        fragment_data: &OperationData,
    ) -> Result<Self> {
        let details = DefinitionDetails::from_definition(fragment_data.definition());
        let (Some(name), Some(type_condition)) = (details.name, details.type_condition) else {
            return Err(SignatureError::NotAFragment {
                name: fragment_data.display_name().to_string(),
            });
        };

        let type_projector = projector.type_projector();
        let full_type = match type_projector.schema().lookup_type(type_condition) {
            Some(type_) => type_projector.project_type(type_),
            None => TypeShape::any(),
        };

        Ok(Self {
            full_type_signature: full_type.to_string(),
            name: name.to_string(),
            selection_signature: projector.project_operation_data(fragment_data).data.to_string(),
            type_condition: type_condition.to_string(),
        })
    }
}

/// `fetch`, `execute` or `subscribeTo` (by kind) followed by the operation
/// name with its first letter upper-cased.
pub fn function_name(kind: OperationKind, operation_name: &str) -> String {
    let prefix = match kind {
        OperationKind::Mutation => "execute",
        OperationKind::Subscription => "subscribeTo",
        OperationKind::Query | OperationKind::Fragment => "fetch",
    };

    let mut chars = operation_name.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
