use crate::ast;
use crate::file_reader;
use crate::loc;
use crate::operation::OperationKind;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::introspection;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::NamedGraphQLTypeRef;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::TypesMapBuilder;
use crate::types::UnionType;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Clone, Debug, PartialEq)]
struct NamedTypeDefLocation {
    def_location: loc::SchemaDefLocation,
    type_name: String,
}

/// Utility for building a [`Schema`] from SDL text, SDL files, or an
/// introspection result.
///
/// ```
/// use libgraphfn::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::from_str(
///     None,
///     "type Query { hello: String }",
/// ).unwrap().build().unwrap();
///
/// assert!(schema.lookup_type("Query").is_some());
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    mutation_type: Option<NamedTypeDefLocation>,
    pending_extensions: Vec<(PathBuf, ast::schema::TypeExtension)>,
    query_type: Option<NamedTypeDefLocation>,
    str_load_counter: u16,
    subscription_type: Option<NamedTypeDefLocation>,
    types_map_builder: TypesMapBuilder,
}
impl SchemaBuilder {
    /// Consume this builder to produce a [`Schema`].
    ///
    /// Type extensions are applied here (after every definition has been
    /// loaded) so that an `extend type` may appear before the type it
    /// extends.
    pub fn build(mut self) -> Result<Schema> {
        for (file_path, type_ext) in std::mem::take(&mut self.pending_extensions) {
            self.apply_type_extension(file_path.as_path(), type_ext)?;
        }

        let types = self.types_map_builder.into_types_map()?;

        let query_type = Self::resolve_root_type(
            &types,
            OperationKind::Query,
            self.query_type.take(),
        )?.ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;

        let mutation_type = Self::resolve_root_type(
            &types,
            OperationKind::Mutation,
            self.mutation_type.take(),
        )?;

        let subscription_type = Self::resolve_root_type(
            &types,
            OperationKind::Subscription,
            self.subscription_type.take(),
        )?;

        Ok(Schema {
            query_type,
            mutation_type,
            subscription_type,
            types,
        })
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        Self::new().load_file(file_path)
    }

    pub fn from_files(file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        Self::new().load_files(file_paths)
    }

    /// Load an introspection query result. Both the bare `{"__schema": ...}`
    /// form and the full `{"data": {"__schema": ...}}` response are accepted.
    pub fn from_introspection_json(json: &str) -> Result<Self> {
        let mut builder = Self::new();
        let introspected = introspection::parse_introspection_json(json)?;

        if let Some(query_type) = introspected.query_type {
            builder.query_type = Some(NamedTypeDefLocation {
                def_location: loc::SchemaDefLocation::Introspection,
                type_name: query_type,
            });
        }
        if let Some(mutation_type) = introspected.mutation_type {
            builder.mutation_type = Some(NamedTypeDefLocation {
                def_location: loc::SchemaDefLocation::Introspection,
                type_name: mutation_type,
            });
        }
        if let Some(subscription_type) = introspected.subscription_type {
            builder.subscription_type = Some(NamedTypeDefLocation {
                def_location: loc::SchemaDefLocation::Introspection,
                type_name: subscription_type,
            });
        }

        for type_ in introspected.types {
            let type_name = type_.name().to_string();
            builder.types_map_builder.add_new_type(
                type_name.as_str(),
                &loc::SchemaDefLocation::Introspection,
                type_,
            )?;
        }

        Ok(builder)
    }

    pub fn from_str(
        file_path: Option<&Path>,
        content: impl AsRef<str>,
    ) -> Result<Self> {
        Self::new().load_str(file_path, content)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(&[file_path])
    }

    pub fn load_files(mut self, file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(
                    Box::new(err),
                ))?;
            self = self.load_str(Some(file_path), file_content)?;
        }
        Ok(self)
    }

    pub fn load_str(
        mut self,
        file_path: Option<&Path>,
        content: impl AsRef<str>,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path.to_path_buf()
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content.as_ref())
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def)?;
        }

        Ok(self)
    }

    pub fn new() -> Self {
        Self {
            mutation_type: None,
            pending_extensions: vec![],
            query_type: None,
            str_load_counter: 0,
            subscription_type: None,
            types_map_builder: TypesMapBuilder::new(),
        }
    }

    fn apply_type_extension(
        &mut self,
        file_path: &Path,
        type_ext: ast::schema::TypeExtension,
    ) -> Result<()> {
        use ast::schema::TypeExtension;

        let (type_name, position, extension_kind) = match &type_ext {
            TypeExtension::Enum(ext) => (ext.name.as_str(), ext.position, "enum"),
            TypeExtension::InputObject(ext) => (ext.name.as_str(), ext.position, "input object"),
            TypeExtension::Interface(ext) => (ext.name.as_str(), ext.position, "interface"),
            TypeExtension::Object(ext) => (ext.name.as_str(), ext.position, "object"),
            TypeExtension::Scalar(ext) => (ext.name.as_str(), ext.position, "scalar"),
            TypeExtension::Union(ext) => (ext.name.as_str(), ext.position, "union"),
        };
        let ext_location = schema_def_location(file_path, position);
        let type_name = type_name.to_string();

        let Some(existing_type) = self.types_map_builder.get_type_mut(type_name.as_str()) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                location: ext_location,
                type_name,
            });
        };

        let mismatch = || SchemaBuildError::ExtensionTypeMismatch {
            extension_kind: extension_kind.to_string(),
            location: ext_location.clone(),
            type_name: type_name.clone(),
        };

        match (existing_type, type_ext) {
            (GraphQLType::Enum(enum_type), TypeExtension::Enum(ext)) => {
                for value in ext.values {
                    add_enum_value(file_path, enum_type, value)?;
                }
            },

            (GraphQLType::InputObject(input_type), TypeExtension::InputObject(ext)) => {
                for input_value in ext.fields {
                    add_input_field(
                        file_path,
                        input_type.name.as_str(),
                        &mut input_type.fields,
                        input_value,
                    )?;
                }
            },

            (GraphQLType::Interface(iface_type), TypeExtension::Interface(ext)) => {
                iface_type.interfaces.extend(ext.implements_interfaces);
                for field in ext.fields {
                    add_field(file_path, iface_type.name.as_str(), &mut iface_type.fields, field)?;
                }
            },

            (GraphQLType::Object(obj_type), TypeExtension::Object(ext)) => {
                obj_type.interfaces.extend(ext.implements_interfaces);
                for field in ext.fields {
                    add_field(file_path, obj_type.name.as_str(), &mut obj_type.fields, field)?;
                }
            },

            (GraphQLType::Scalar(_), TypeExtension::Scalar(_)) => (),

            (GraphQLType::Union(union_type), TypeExtension::Union(ext)) => {
                union_type.members.extend(ext.types.iter().map(|member_name| {
                    NamedGraphQLTypeRef::new(member_name, ext_location.clone())
                }));
            },

            _ => return Err(mismatch()),
        }

        Ok(())
    }

    fn resolve_root_type(
        types: &std::collections::HashMap<String, GraphQLType>,
        operation: OperationKind,
        explicit: Option<NamedTypeDefLocation>,
    ) -> Result<Option<NamedGraphQLTypeRef>> {
        let default_name = match operation {
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
            OperationKind::Query | OperationKind::Fragment => "Query",
        };

        let typedef_loc = match explicit {
            Some(typedef_loc) => typedef_loc,
            None => match types.get(default_name) {
                Some(GraphQLType::Object(obj_type)) => NamedTypeDefLocation {
                    def_location: obj_type.def_location.clone(),
                    type_name: default_name.to_string(),
                },
                _ => return Ok(None),
            },
        };

        match types.get(typedef_loc.type_name.as_str()) {
            Some(GraphQLType::Object(_)) => Ok(Some(NamedGraphQLTypeRef::new(
                typedef_loc.type_name,
                typedef_loc.def_location,
            ))),
            Some(_) => Err(SchemaBuildError::NonObjectRootOperationType {
                operation,
                type_name: typedef_loc.type_name,
            }),
            None => Err(SchemaBuildError::UndefinedRootOperationType {
                operation,
                type_name: typedef_loc.type_name,
            }),
        }
    }

    fn set_root_type(
        slot: &mut Option<NamedTypeDefLocation>,
        operation: OperationKind,
        typedef_loc: NamedTypeDefLocation,
    ) -> Result<()> {
        if let Some(existing_typedef_loc) = slot {
            return Err(SchemaBuildError::DuplicateOperationDefinition {
                operation,
                location1: existing_typedef_loc.def_location.clone(),
                location2: typedef_loc.def_location,
            });
        }
        *slot = Some(typedef_loc);
        Ok(())
    }

    fn visit_ast_def(
        &mut self,
        file_path: &Path,
        def: ast::schema::Definition,
    ) -> Result<()> {
        use ast::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) =>
                self.visit_ast_schemablock_def(file_path, schema_def),
            Definition::TypeDefinition(type_def) =>
                self.visit_ast_type_def(file_path, type_def),
            Definition::TypeExtension(type_ext) => {
                self.pending_extensions.push((file_path.to_path_buf(), type_ext));
                Ok(())
            },
            Definition::DirectiveDefinition(directive_def) => {
                log::trace!(
                    "Ignoring definition of the `@{}` directive.",
                    directive_def.name,
                );
                Ok(())
            },
        }
    }

    fn visit_ast_schemablock_def(
        &mut self,
        file_path: &Path,
        schema_def: ast::schema::SchemaDefinition,
    ) -> Result<()> {
        let def_location = schema_def_location(file_path, schema_def.position);

        if let Some(type_name) = schema_def.query {
            Self::set_root_type(&mut self.query_type, OperationKind::Query, NamedTypeDefLocation {
                def_location: def_location.clone(),
                type_name,
            })?;
        }

        if let Some(type_name) = schema_def.mutation {
            Self::set_root_type(&mut self.mutation_type, OperationKind::Mutation, NamedTypeDefLocation {
                def_location: def_location.clone(),
                type_name,
            })?;
        }

        if let Some(type_name) = schema_def.subscription {
            Self::set_root_type(&mut self.subscription_type, OperationKind::Subscription, NamedTypeDefLocation {
                def_location,
                type_name,
            })?;
        }

        Ok(())
    }

    fn visit_ast_type_def(
        &mut self,
        file_path: &Path,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        use ast::schema::TypeDefinition;

        let (type_name, def_location, type_) = match type_def {
            TypeDefinition::Enum(def) => {
                let def_location = schema_def_location(file_path, def.position);
                let mut enum_type = EnumType {
                    def_location: def_location.clone(),
                    description: def.description,
                    name: def.name.to_string(),
                    values: IndexMap::new(),
                };
                for value in def.values {
                    add_enum_value(file_path, &mut enum_type, value)?;
                }
                (def.name, def_location, GraphQLType::Enum(enum_type))
            },

            TypeDefinition::InputObject(def) => {
                let def_location = schema_def_location(file_path, def.position);
                let mut fields = IndexMap::new();
                for input_value in def.fields {
                    add_input_field(file_path, def.name.as_str(), &mut fields, input_value)?;
                }
                (def.name.to_string(), def_location.clone(), GraphQLType::InputObject(InputObjectType {
                    def_location,
                    description: def.description,
                    fields,
                    name: def.name,
                }))
            },

            TypeDefinition::Interface(def) => {
                let def_location = schema_def_location(file_path, def.position);
                let mut fields = IndexMap::new();
                for field in def.fields {
                    add_field(file_path, def.name.as_str(), &mut fields, field)?;
                }
                (def.name.to_string(), def_location.clone(), GraphQLType::Interface(InterfaceType {
                    def_location,
                    description: def.description,
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            TypeDefinition::Object(def) => {
                let def_location = schema_def_location(file_path, def.position);
                let mut fields = IndexMap::new();
                for field in def.fields {
                    add_field(file_path, def.name.as_str(), &mut fields, field)?;
                }
                (def.name.to_string(), def_location.clone(), GraphQLType::Object(ObjectType {
                    def_location,
                    description: def.description,
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            TypeDefinition::Scalar(def) => {
                let def_location = schema_def_location(file_path, def.position);
                (def.name.to_string(), def_location.clone(), GraphQLType::Scalar(ScalarType {
                    def_location,
                    description: def.description,
                    name: def.name,
                }))
            },

            TypeDefinition::Union(def) => {
                let def_location = schema_def_location(file_path, def.position);
                let members = def.types.iter().map(|member_name| {
                    NamedGraphQLTypeRef::new(member_name, def_location.clone())
                }).collect();
                (def.name.to_string(), def_location.clone(), GraphQLType::Union(UnionType {
                    def_location,
                    description: def.description,
                    members,
                    name: def.name,
                }))
            },
        };

        self.types_map_builder.add_new_type(type_name.as_str(), &def_location, type_)
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn schema_def_location(
    file_path: &Path,
    pos: graphql_parser::Pos,
) -> loc::SchemaDefLocation {
    loc::SchemaDefLocation::Schema(loc::FilePosition::from_pos(Some(file_path), pos))
}

fn add_enum_value(
    file_path: &Path,
    enum_type: &mut EnumType,
    value: ast::schema::EnumValue,
) -> Result<()> {
    let location = schema_def_location(file_path, value.position);
    if enum_type.values.contains_key(value.name.as_str()) {
        return Err(SchemaBuildError::DuplicateEnumValueDefinition {
            enum_name: enum_type.name.to_string(),
            location,
            value_name: value.name,
        });
    }
    enum_type.values.insert(value.name.to_string(), EnumValue {
        def_location: location,
        description: value.description,
        name: value.name,
    });
    Ok(())
}

fn add_field(
    file_path: &Path,
    type_name: &str,
    fields: &mut IndexMap<String, Field>,
    field: ast::schema::Field,
) -> Result<()> {
    let location = schema_def_location(file_path, field.position);
    if fields.contains_key(field.name.as_str()) {
        return Err(SchemaBuildError::DuplicateFieldDefinition {
            field_name: field.name,
            location,
            type_name: type_name.to_string(),
        });
    }
    fields.insert(field.name.to_string(), Field {
        def_location: location,
        description: field.description,
        type_annotation: TypeAnnotation::from_ast_type(&field.field_type),
        name: field.name,
    });
    Ok(())
}

fn add_input_field(
    file_path: &Path,
    type_name: &str,
    fields: &mut IndexMap<String, InputField>,
    input_value: ast::schema::InputValue,
) -> Result<()> {
    let location = schema_def_location(file_path, input_value.position);
    if fields.contains_key(input_value.name.as_str()) {
        return Err(SchemaBuildError::DuplicateFieldDefinition {
            field_name: input_value.name,
            location,
            type_name: type_name.to_string(),
        });
    }
    fields.insert(input_value.name.to_string(), InputField {
        def_location: location,
        description: input_value.description,
        type_annotation: TypeAnnotation::from_ast_type(&input_value.value_type),
        name: input_value.name,
    });
    Ok(())
}
