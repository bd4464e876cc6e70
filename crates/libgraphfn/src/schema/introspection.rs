use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ListTypeAnnotation;
use crate::types::NamedGraphQLTypeRef;
use crate::types::NamedTypeAnnotation;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use serde::Deserialize;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

#[derive(Debug)]
pub(super) struct IntrospectedSchema {
    pub mutation_type: Option<String>,
    pub query_type: Option<String>,
    pub subscription_type: Option<String>,
    pub types: Vec<GraphQLType>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntrospectionEnvelope {
    Response { data: SchemaWrapper },
    Bare(SchemaWrapper),
}

#[derive(Deserialize)]
struct SchemaWrapper {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    mutation_type: Option<RootTypeRef>,
    query_type: Option<RootTypeRef>,
    subscription_type: Option<RootTypeRef>,
    types: Vec<FullType>,
}

#[derive(Deserialize)]
struct RootTypeRef {
    name: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TypeKind {
    Enum,
    InputObject,
    Interface,
    List,
    NonNull,
    Object,
    Scalar,
    Union,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullType {
    description: Option<String>,
    enum_values: Option<Vec<IntrospectionEnumValue>>,
    fields: Option<Vec<IntrospectionField>>,
    input_fields: Option<Vec<IntrospectionInputValue>>,
    kind: TypeKind,
    name: String,
    possible_types: Option<Vec<TypeRef>>,
    interfaces: Option<Vec<TypeRef>>,
}

#[derive(Deserialize)]
struct IntrospectionEnumValue {
    description: Option<String>,
    name: String,
}

#[derive(Deserialize)]
struct IntrospectionField {
    description: Option<String>,
    name: String,
    #[serde(rename = "type")]
    type_ref: TypeRef,
}

#[derive(Deserialize)]
struct IntrospectionInputValue {
    description: Option<String>,
    name: String,
    #[serde(rename = "type")]
    type_ref: TypeRef,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<TypeRef>>,
}
impl TypeRef {
    fn to_type_annotation(&self) -> Result<TypeAnnotation> {
        self.to_type_annotation_impl(/* nullable = */ true)
    }

    fn to_type_annotation_impl(&self, nullable: bool) -> Result<TypeAnnotation> {
        match self.kind {
            TypeKind::NonNull => self.inner()?.to_type_annotation_impl(false),
            TypeKind::List => Ok(TypeAnnotation::List(ListTypeAnnotation {
                inner_type_annotation: Box::new(self.inner()?.to_type_annotation()?),
                nullable,
            })),
            _ => Ok(TypeAnnotation::Named(NamedTypeAnnotation {
                nullable,
                type_name: self.name.to_owned().ok_or_else(
                    || malformed(format!("a `{:?}` type reference has no name", self.kind)),
                )?,
            })),
        }
    }

    fn inner(&self) -> Result<&TypeRef> {
        self.of_type.as_deref().ok_or_else(
            || malformed(format!("a `{:?}` type reference has no `ofType`", self.kind)),
        )
    }
}

fn malformed(reason: impl Into<String>) -> SchemaBuildError {
    SchemaBuildError::MalformedIntrospection {
        reason: reason.into(),
    }
}

/// Decode an introspection result into the pieces a
/// [`SchemaBuilder`](crate::schema::SchemaBuilder) needs. Introspection
/// meta-types (`__Type`, ...) and the built-in scalars are skipped.
pub(super) fn parse_introspection_json(json: &str) -> Result<IntrospectedSchema> {
    let envelope: IntrospectionEnvelope = serde_json::from_str(json)
        .map_err(|err| malformed(err.to_string()))?;
    let schema = match envelope {
        IntrospectionEnvelope::Response { data } => data.schema,
        IntrospectionEnvelope::Bare(wrapper) => wrapper.schema,
    };

    let mut types = vec![];
    for full_type in schema.types {
        if full_type.name.starts_with("__") {
            continue;
        }
        if full_type.kind == TypeKind::Scalar
            && BUILTIN_SCALAR_NAMES.contains(&full_type.name.as_str()) {
            continue;
        }
        types.push(convert_type(full_type)?);
    }

    Ok(IntrospectedSchema {
        mutation_type: schema.mutation_type.map(|t| t.name),
        query_type: schema.query_type.map(|t| t.name),
        subscription_type: schema.subscription_type.map(|t| t.name),
        types,
    })
}

fn convert_fields(
    fields: Option<Vec<IntrospectionField>>,
) -> Result<indexmap::IndexMap<String, Field>> {
    let mut converted = indexmap::IndexMap::new();
    for field in fields.unwrap_or_default() {
        converted.insert(field.name.to_string(), Field {
            def_location: loc::SchemaDefLocation::Introspection,
            description: field.description,
            type_annotation: field.type_ref.to_type_annotation()?,
            name: field.name,
        });
    }
    Ok(converted)
}

fn interface_names(interfaces: Option<Vec<TypeRef>>) -> Vec<String> {
    interfaces.unwrap_or_default()
        .into_iter()
        .filter_map(|type_ref| type_ref.name)
        .collect()
}

fn convert_type(full_type: FullType) -> Result<GraphQLType> {
    let def_location = loc::SchemaDefLocation::Introspection;
    Ok(match full_type.kind {
        TypeKind::Enum => GraphQLType::Enum(EnumType {
            def_location,
            description: full_type.description,
            values: full_type.enum_values.unwrap_or_default()
                .into_iter()
                .map(|value| (value.name.to_string(), EnumValue {
                    def_location: loc::SchemaDefLocation::Introspection,
                    description: value.description,
                    name: value.name,
                }))
                .collect(),
            name: full_type.name,
        }),

        TypeKind::InputObject => {
            let mut fields = indexmap::IndexMap::new();
            for input_value in full_type.input_fields.unwrap_or_default() {
                fields.insert(input_value.name.to_string(), InputField {
                    def_location: loc::SchemaDefLocation::Introspection,
                    description: input_value.description,
                    type_annotation: input_value.type_ref.to_type_annotation()?,
                    name: input_value.name,
                });
            }
            GraphQLType::InputObject(InputObjectType {
                def_location,
                description: full_type.description,
                fields,
                name: full_type.name,
            })
        },

        TypeKind::Interface => GraphQLType::Interface(InterfaceType {
            def_location,
            description: full_type.description,
            fields: convert_fields(full_type.fields)?,
            interfaces: interface_names(full_type.interfaces),
            name: full_type.name,
        }),

        TypeKind::Object => GraphQLType::Object(ObjectType {
            def_location,
            description: full_type.description,
            fields: convert_fields(full_type.fields)?,
            interfaces: interface_names(full_type.interfaces),
            name: full_type.name,
        }),

        TypeKind::Scalar => GraphQLType::Scalar(ScalarType {
            def_location,
            description: full_type.description,
            name: full_type.name,
        }),

        TypeKind::Union => GraphQLType::Union(UnionType {
            def_location,
            description: full_type.description,
            members: full_type.possible_types.unwrap_or_default()
                .into_iter()
                .filter_map(|type_ref| type_ref.name)
                .map(|member_name| NamedGraphQLTypeRef::new(
                    member_name,
                    loc::SchemaDefLocation::Introspection,
                ))
                .collect(),
            name: full_type.name,
        }),

        TypeKind::List | TypeKind::NonNull => return Err(malformed(format!(
            "`{}` is declared with the wrapper kind `{:?}`",
            full_type.name,
            full_type.kind,
        ))),
    })
}
