use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::GraphQLType;
use crate::types::ScalarType;
use crate::types::TypesMapBuilder;

fn scalar(name: &str) -> GraphQLType {
    GraphQLType::Scalar(ScalarType {
        def_location: loc::SchemaDefLocation::Introspection,
        description: None,
        name: name.to_string(),
    })
}

#[test]
fn starts_with_builtin_scalars() {
    let types = TypesMapBuilder::new().into_types_map().unwrap();

    let mut names = types.keys().map(|name| name.as_str()).collect::<Vec<_>>();
    names.sort();
    assert_eq!(names, vec!["Boolean", "Float", "ID", "Int", "String"]);
    assert!(types.values().all(|t| {
        t.def_location() == &loc::SchemaDefLocation::GraphQLBuiltIn
    }));
}

#[test]
fn rejects_duplicates() {
    let mut builder = TypesMapBuilder::new();
    let type_loc = loc::SchemaDefLocation::Introspection;
    builder.add_new_type("JSON", &type_loc, scalar("JSON")).unwrap();

    let result = builder.add_new_type("JSON", &type_loc, scalar("JSON"));
    assert!(matches!(
        result,
        Err(SchemaBuildError::DuplicateTypeDefinition { .. }),
    ));
}

#[test]
fn rejects_dunder_prefixed_names() {
    let mut builder = TypesMapBuilder::new();
    let result = builder.add_new_type(
        "__JSON",
        &loc::SchemaDefLocation::Introspection,
        scalar("__JSON"),
    );
    assert!(matches!(
        result,
        Err(SchemaBuildError::InvalidDunderPrefixedTypeName { .. }),
    ));
}
