use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::GraphQLType;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
pub(crate) struct TypesMapBuilder {
    types: HashMap<String, GraphQLType>,
}
impl TypesMapBuilder {
    pub fn new() -> Self {
        Self {
            types: HashMap::from([
                ("Boolean".to_string(), GraphQLType::Bool),
                ("Float".to_string(), GraphQLType::Float),
                ("ID".to_string(), GraphQLType::ID),
                ("Int".to_string(), GraphQLType::Int),
                ("String".to_string(), GraphQLType::String),
            ]),
        }
    }

    pub fn add_new_type(
        &mut self,
        type_name: &str,
        type_loc: &loc::SchemaDefLocation,
        type_: GraphQLType,
    ) -> Result<()> {
        if type_name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedTypeName {
                def_location: type_loc.to_owned(),
                type_name: type_name.to_string(),
            });
        }

        if let Some(conflicting_type) = self.types.get(type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: type_name.to_string(),
                def1: conflicting_type.def_location().to_owned(),
                def2: type_loc.to_owned(),
            });
        }

        self.types.insert(type_name.to_string(), type_);
        Ok(())
    }

    pub fn get_type_mut(
        &mut self,
        type_name: &str,
    ) -> Option<&mut GraphQLType> {
        self.types.get_mut(type_name)
    }

    pub fn into_types_map(self) -> Result<HashMap<String, GraphQLType>> {
        for type_ in self.types.values() {
            if let GraphQLType::Union(union_type) = type_ {
                for member in &union_type.members {
                    match self.types.get(member.name()) {
                        Some(GraphQLType::Object(_)) => (),
                        Some(_) => return Err(
                            SchemaBuildError::NonObjectUnionMember {
                                member_name: member.name().to_string(),
                                union_name: union_type.name.to_string(),
                            }
                        ),
                        None => return Err(
                            SchemaBuildError::UndefinedUnionMember {
                                member_name: member.name().to_string(),
                                union_name: union_type.name.to_string(),
                            }
                        ),
                    }
                }
            }
        }

        Ok(self.types)
    }
}
