use crate::loc;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::types::GraphQLType;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const INTROSPECTION_RESPONSE: &str = r#"{
  "data": {
    "__schema": {
      "queryType": { "name": "Query" },
      "mutationType": null,
      "subscriptionType": null,
      "types": [
        {
          "kind": "OBJECT",
          "name": "Query",
          "description": null,
          "fields": [
            {
              "name": "scores",
              "description": "All scores",
              "args": [],
              "type": {
                "kind": "NON_NULL",
                "name": null,
                "ofType": {
                  "kind": "LIST",
                  "name": null,
                  "ofType": { "kind": "SCALAR", "name": "Int", "ofType": null }
                }
              },
              "isDeprecated": false,
              "deprecationReason": null
            },
            {
              "name": "color",
              "description": null,
              "args": [],
              "type": { "kind": "ENUM", "name": "Color", "ofType": null },
              "isDeprecated": false,
              "deprecationReason": null
            }
          ],
          "inputFields": null,
          "interfaces": [],
          "enumValues": null,
          "possibleTypes": null
        },
        {
          "kind": "ENUM",
          "name": "Color",
          "description": null,
          "fields": null,
          "inputFields": null,
          "interfaces": null,
          "enumValues": [
            { "name": "RED", "description": null, "isDeprecated": false, "deprecationReason": null },
            { "name": "BLUE", "description": null, "isDeprecated": false, "deprecationReason": null }
          ],
          "possibleTypes": null
        },
        {
          "kind": "SCALAR",
          "name": "Int",
          "description": "Built-in Int",
          "fields": null,
          "inputFields": null,
          "interfaces": null,
          "enumValues": null,
          "possibleTypes": null
        },
        {
          "kind": "OBJECT",
          "name": "__Type",
          "description": null,
          "fields": [],
          "inputFields": null,
          "interfaces": [],
          "enumValues": null,
          "possibleTypes": null
        }
      ],
      "directives": []
    }
  }
}"#;

#[test]
fn loads_a_full_introspection_response() -> Result<()> {
    let schema = SchemaBuilder::from_introspection_json(INTROSPECTION_RESPONSE)?
        .build()?;

    assert!(schema.lookup_type("__Type").is_none());
    assert!(matches!(schema.lookup_type("Int"), Some(GraphQLType::Int)));

    let query_type = schema.query_type().unwrap();
    assert_eq!(query_type.def_location(), &loc::SchemaDefLocation::Introspection);

    let scores = query_type.fields().unwrap().get("scores").unwrap();
    assert_eq!(scores.description(), Some("All scores"));
    assert_eq!(scores.type_annotation().to_string(), "[Int]!");

    let color = schema.lookup_type("Color").unwrap().as_enum().unwrap();
    assert_eq!(color.value_names().collect::<Vec<_>>(), vec!["RED", "BLUE"]);

    Ok(())
}

#[test]
fn loads_a_bare_schema_object() -> Result<()> {
    let json = r#"{
      "__schema": {
        "queryType": { "name": "Root" },
        "types": [
          {
            "kind": "OBJECT",
            "name": "Root",
            "fields": [
              {
                "name": "ok",
                "type": { "kind": "SCALAR", "name": "Boolean", "ofType": null }
              }
            ]
          }
        ]
      }
    }"#;

    let schema = SchemaBuilder::from_introspection_json(json)?.build()?;
    assert_eq!(schema.query_type().map(|t| t.name()), Some("Root"));

    Ok(())
}

#[test]
fn malformed_json_is_an_error() {
    let result = SchemaBuilder::from_introspection_json(r#"{"data": {}}"#);

    assert!(matches!(
        result,
        Err(SchemaBuildError::MalformedIntrospection { .. }),
    ));
}

#[test]
fn wrapper_type_without_of_type_is_an_error() {
    let json = r#"{
      "__schema": {
        "queryType": { "name": "Query" },
        "types": [
          {
            "kind": "OBJECT",
            "name": "Query",
            "fields": [
              { "name": "broken", "type": { "kind": "LIST", "name": null, "ofType": null } }
            ]
          }
        ]
      }
    }"#;

    let result = SchemaBuilder::from_introspection_json(json);
    assert!(matches!(
        result,
        Err(SchemaBuildError::MalformedIntrospection { .. }),
    ));
}
