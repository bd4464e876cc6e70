use crate::projection::FieldShape;
use crate::projection::ScalarShape;
use crate::projection::TypeShape;
use indexmap::IndexMap;

fn field(nullable: bool, shape: TypeShape) -> FieldShape {
    FieldShape {
        description: None,
        nullable,
        shape,
    }
}

fn string() -> TypeShape {
    TypeShape::Scalar(ScalarShape::String)
}

#[test]
fn renders_leaves() {
    assert_eq!(TypeShape::any().to_string(), "any");
    assert_eq!(TypeShape::Scalar(ScalarShape::Boolean).to_string(), "boolean");
    assert_eq!(TypeShape::Infinite.to_string(), "\"infinite\"");
    assert_eq!(TypeShape::EnumLiteral(vec![]).to_string(), "never");
    assert_eq!(TypeShape::EnumLiteral(vec!["ONLY".to_string()]).to_string(), "\"ONLY\"");
    assert_eq!(
        TypeShape::List(Box::new(TypeShape::EnumLiteral(vec!["ONLY".to_string()]))).to_string(),
        "\"ONLY\"[]",
    );
}

#[test]
fn renders_nested_objects_with_descriptions() {
    let shape = TypeShape::Object(IndexMap::from([
        ("id".to_string(), FieldShape {
            description: Some("Globally unique".to_string()),
            nullable: false,
            shape: string(),
        }),
        ("tags".to_string(), field(true, TypeShape::List(Box::new(TypeShape::Object(
            IndexMap::from([("label".to_string(), field(false, string()))]),
        ))))),
        ("meta".to_string(), field(true, TypeShape::Object(IndexMap::new()))),
    ]));

    assert_eq!(shape.to_typescript(), concat!(
        "{\n",
        "  /** Globally unique */\n",
        "  id: string;\n",
        "  tags?: {\n",
        "    label: string;\n",
        "  }[];\n",
        "  meta?: {};\n",
        "}",
    ));
}

#[test]
fn merge_combines_objects_through_lists() {
    let first = TypeShape::List(Box::new(TypeShape::Object(IndexMap::from([
        ("a".to_string(), field(true, string())),
        ("b".to_string(), field(true, string())),
    ]))));
    let second = TypeShape::List(Box::new(TypeShape::Object(IndexMap::from([
        ("c".to_string(), field(false, string())),
        ("a".to_string(), field(false, TypeShape::any())),
    ]))));

    assert_eq!(first.merge(second), TypeShape::List(Box::new(TypeShape::Object(
        IndexMap::from([
            ("a".to_string(), field(false, TypeShape::any())),
            ("b".to_string(), field(true, string())),
            ("c".to_string(), field(false, string())),
        ]),
    ))));
}

#[test]
fn merge_of_mismatched_shapes_takes_the_later_one() {
    assert_eq!(string().merge(TypeShape::Infinite), TypeShape::Infinite);
    assert_eq!(
        TypeShape::Object(IndexMap::new()).merge(TypeShape::List(Box::new(string()))),
        TypeShape::List(Box::new(string())),
    );
}

#[test]
fn serializes_with_kind_tags() {
    let shape = TypeShape::Object(IndexMap::from([
        ("kind".to_string(), field(false, TypeShape::EnumLiteral(vec!["A".to_string()]))),
        ("items".to_string(), field(true, TypeShape::List(Box::new(TypeShape::Infinite)))),
    ]));

    assert_eq!(serde_json::to_value(&shape).unwrap(), serde_json::json!({
        "kind": "object",
        "value": {
            "kind": {
                "description": null,
                "nullable": false,
                "shape": { "kind": "enumLiteral", "value": ["A"] },
            },
            "items": {
                "description": null,
                "nullable": true,
                "shape": {
                    "kind": "list",
                    "value": { "kind": "infinite" },
                },
            },
        },
    }));
}
