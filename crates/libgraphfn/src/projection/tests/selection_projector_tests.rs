use crate::CollectingSink;
use crate::Diagnostic;
use crate::Schema;
use crate::operation::OperationGraph;
use crate::operation::OperationGraphBuilder;
use crate::projection::FieldShape;
use crate::projection::OperationShape;
use crate::projection::ScalarShape;
use crate::projection::SelectionProjector;
use crate::projection::TypeShape;
use crate::schema::SchemaBuilder;
use indexmap::IndexMap;

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(None, concat!(
        "type Query {\n",
        "  \"The viewer\"\n",
        "  me: User\n",
        "  users(first: Int): [User!]!\n",
        "  search(term: String!): [SearchResult!]!\n",
        "  node(id: ID!): Node\n",
        "  matrix: [[Int!]!]!\n",
        "}\n",
        "interface Node { id: ID! }\n",
        "type User implements Node { id: ID!, name: String, role: Role!, friends: [User!] }\n",
        "type Post implements Node { id: ID!, title: String! }\n",
        "union SearchResult = User | Post\n",
        "enum Role { ADMIN VIEWER }\n",
        "type Mutation { rename(name: String!): User }\n",
    )).unwrap().build().unwrap()
}

fn build_graph(content: &str) -> OperationGraph {
    OperationGraphBuilder::new()
        .build_from_str(content, &serde_json::Map::new())
        .unwrap()
}

fn project_named(
    schema: &Schema,
    graph: &OperationGraph,
    name: &str,
    sink: &CollectingSink,
) -> OperationShape {
    SelectionProjector::new(schema, graph.fragment_definitions())
        .diagnostics(sink)
        .project_operation_data(graph.lookup(name).unwrap())
}

fn data_fields(shape: &OperationShape) -> &IndexMap<String, FieldShape> {
    match &shape.data {
        TypeShape::Object(fields) => fields,
        other => panic!("Expected an object, found {other:?}"),
    }
}

fn object_keys(shape: &TypeShape) -> Vec<&str> {
    match shape.innermost() {
        TypeShape::Object(fields) => fields.keys().map(|key| key.as_str()).collect(),
        other => panic!("Expected an object, found {other:?}"),
    }
}

#[test]
fn meta_fields_bypass_the_schema() {
    let schema = setup_schema();
    let graph = build_graph("query Foo { __typename }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Foo", &sink);

    assert_eq!(shape.data, TypeShape::Object(IndexMap::from([
        ("__typename".to_string(), FieldShape {
            description: None,
            nullable: false,
            shape: TypeShape::any(),
        }),
    ])));
    assert_eq!(shape.errors, TypeShape::List(Box::new(TypeShape::any())));
    assert_eq!(shape.errors.to_string(), "any[]");
    assert_eq!(
        shape.to_string(),
        "{\n  data: {\n    __typename: any;\n  };\n  errors: any[];\n}",
    );
    assert!(sink.is_empty());
}

#[test]
fn selection_limits_object_fields_and_aliases_rename_keys() {
    let schema = setup_schema();
    let graph = build_graph("query Q { viewer: me { name role } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);
    let viewer = data_fields(&shape).get("viewer").unwrap();

    assert!(viewer.nullable);
    assert_eq!(viewer.description.as_deref(), Some("The viewer"));
    assert_eq!(viewer.shape, TypeShape::Object(IndexMap::from([
        ("name".to_string(), FieldShape {
            description: None,
            nullable: true,
            shape: TypeShape::Scalar(ScalarShape::String),
        }),
        ("role".to_string(), FieldShape {
            description: None,
            nullable: false,
            shape: TypeShape::EnumLiteral(vec!["ADMIN".to_string(), "VIEWER".to_string()]),
        }),
    ])));
}

#[test]
fn list_fields_keep_their_nesting_depth() {
    let schema = setup_schema();
    let graph = build_graph("query Q { matrix users { id } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);
    let fields = data_fields(&shape);

    let matrix = &fields.get("matrix").unwrap().shape;
    assert_eq!(matrix.list_nesting_depth(), 2);
    assert_eq!(matrix.innermost(), &TypeShape::Scalar(ScalarShape::Number));

    let users = &fields.get("users").unwrap().shape;
    assert_eq!(users.list_nesting_depth(), 1);
    assert_eq!(object_keys(users), vec!["id"]);
}

#[test]
fn inline_fragments_are_flattened_into_the_parent() {
    let schema = setup_schema();
    let graph = build_graph(concat!(
        "query Q {\n",
        "  search(term: \"x\") {\n",
        "    __typename\n",
        "    ... on User { name }\n",
        "    ... on Post { title }\n",
        "  }\n",
        "  node(id: \"1\") { id ... { id } ... on User { role } }\n",
        "}",
    ));
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);
    let fields = data_fields(&shape);

    assert_eq!(
        object_keys(&fields.get("search").unwrap().shape),
        vec!["__typename", "name", "title"],
    );
    assert_eq!(object_keys(&fields.get("node").unwrap().shape), vec!["id", "role"]);
    assert!(sink.is_empty());
}

#[test]
fn fragment_spreads_are_spliced_in() {
    let schema = setup_schema();
    let graph = build_graph(concat!(
        "query Q { me { ...UserBits id } }\n",
        "fragment UserBits on User { name ...Friends }\n",
        "fragment Friends on User { friends { name } }\n",
    ));
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);
    let me = &data_fields(&shape).get("me").unwrap().shape;

    assert_eq!(object_keys(me), vec!["name", "friends", "id"]);
    assert!(sink.is_empty());
}

#[test]
fn repeated_fields_are_merged() {
    let schema = setup_schema();
    let graph = build_graph("query Q { me { name } me { id friends { id } } me { friends { name } } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);
    let me = &data_fields(&shape).get("me").unwrap().shape;

    assert_eq!(object_keys(me), vec!["name", "id", "friends"]);
    match me {
        TypeShape::Object(fields) =>
            assert_eq!(object_keys(&fields.get("friends").unwrap().shape), vec!["id", "name"]),
        other => panic!("Expected an object, found {other:?}"),
    }
}

#[test]
fn unknown_fields_are_dropped_with_a_diagnostic() {
    let schema = setup_schema();
    let graph = build_graph("query Q { me { nope name } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);

    assert_eq!(object_keys(&data_fields(&shape).get("me").unwrap().shape), vec!["name"]);
    assert_eq!(sink.diagnostics(), vec![Diagnostic::UnknownField {
        field_name: "nope".to_string(),
        parent_type_name: "User".to_string(),
    }]);
}

#[test]
fn missing_root_type_drops_every_schema_field() {
    let schema = setup_schema();
    let graph = build_graph("subscription S { tick __typename }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "S", &sink);

    assert_eq!(object_keys(&shape.data), vec!["__typename"]);
    assert_eq!(sink.diagnostics(), vec![
        Diagnostic::UndefinedRootType {
            operation_kind: "subscription".to_string(),
            operation_name: "S".to_string(),
        },
        Diagnostic::UnresolvedParentType {
            field_name: "tick".to_string(),
            type_name: "subscription".to_string(),
        },
    ]);
}

#[test]
fn nothing_resolvable_yields_open_data() {
    let schema = setup_schema();
    let graph = build_graph("query Q { nope }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);

    assert_eq!(shape.data, TypeShape::any());
    assert_eq!(sink.diagnostics().len(), 1);
}

#[test]
fn unknown_spreads_and_type_conditions_are_skipped() {
    let schema = setup_schema();
    let graph = build_graph("query Q { me { ...Missing name ... on Ghost { id } } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Q", &sink);

    assert_eq!(object_keys(&data_fields(&shape).get("me").unwrap().shape), vec!["name"]);
    assert_eq!(sink.diagnostics(), vec![Diagnostic::UnresolvedTypeCondition {
        type_name: "Ghost".to_string(),
    }]);
}

#[test]
fn cyclic_fragments_terminate() {
    let schema = setup_schema();
    let graph = build_graph(concat!(
        "fragment A on User { name ...B }\n",
        "fragment B on User { id ...A }\n",
    ));
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "A", &sink);

    assert_eq!(object_keys(&shape.data), vec!["name", "id"]);
}

#[test]
fn mutations_resolve_against_the_mutation_root() {
    let schema = setup_schema();
    let graph = build_graph("mutation Rename($n: String!) { rename(name: $n) { id } }");
    let sink = CollectingSink::new();

    let shape = project_named(&schema, &graph, "Rename", &sink);

    assert_eq!(object_keys(&data_fields(&shape).get("rename").unwrap().shape), vec!["id"]);
    assert!(sink.is_empty());
}

#[test]
fn projection_is_deterministic() {
    let schema = setup_schema();
    let content = "query Q { me { ...F } search(term: \"x\") { ... on Post { title } } }\nfragment F on User { name role }";

    let first = {
        let graph = build_graph(content);
        project_named(&schema, &graph, "Q", &CollectingSink::new()).to_string()
    };
    let second = {
        let graph = build_graph(content);
        project_named(&schema, &graph, "Q", &CollectingSink::new()).to_string()
    };

    assert_eq!(first, second);
}
