use crate::Schema;
use crate::operation::OperationGraph;
use crate::operation::OperationGraphBuilder;
use crate::operation::OperationKind;
use crate::projection::FragmentSignature;
use crate::projection::FunctionSignature;
use crate::projection::SignatureError;
use crate::projection::function_name;
use crate::schema::SchemaBuilder;

type Result<T> = std::result::Result<T, SignatureError>;

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(None, concat!(
        "type Query { user(id: ID!): User }\n",
        "type Mutation { rename(id: ID!, name: String!): User }\n",
        "type Subscription { renamed: User! }\n",
        "type User { id: ID!, name: String }\n",
    )).unwrap().build().unwrap()
}

fn build_graph(content: &str) -> OperationGraph {
    OperationGraphBuilder::new()
        .build_from_str(content, &serde_json::Map::new())
        .unwrap()
}

#[test]
fn function_names_are_prefixed_by_kind() {
    assert_eq!(function_name(OperationKind::Query, "userById"), "fetchUserById");
    assert_eq!(function_name(OperationKind::Mutation, "rename"), "executeRename");
    assert_eq!(function_name(OperationKind::Subscription, "Renamed"), "subscribeToRenamed");
    assert_eq!(function_name(OperationKind::Query, ""), "fetch");
}

#[test]
fn query_signature() -> Result<()> {
    let schema = setup_schema();
    let graph = build_graph(concat!(
        "query userById($id: ID!, $limit: Int = 5, $tag: String) {\n",
        "  user(id: $id) { name }\n",
        "}",
    ));

    let signature = FunctionSignature::for_operation(
        &schema,
        graph.lookup("userById").unwrap(),
        graph.fragment_definitions(),
    )?;

    assert_eq!(signature.function_name, "fetchUserById");
    assert_eq!(signature.kind, OperationKind::Query);
    assert_eq!(signature.operation_name, "userById");
    assert_eq!(
        signature.variable_signature,
        "{\n  id: string;\n  limit?: number;\n  tag?: string;\n}",
    );
    assert_eq!(
        signature.return_signature,
        concat!(
            "{\n",
            "  data: {\n",
            "    user?: {\n",
            "      name?: string;\n",
            "    };\n",
            "  };\n",
            "  errors: any[];\n",
            "}",
        ),
    );
    Ok(())
}

#[test]
fn operations_without_variables_take_an_empty_object() -> Result<()> {
    let schema = setup_schema();
    let graph = build_graph("subscription Renamed { renamed { id } }");

    let signature = FunctionSignature::for_operation(
        &schema,
        graph.lookup("Renamed").unwrap(),
        graph.fragment_definitions(),
    )?;

    assert_eq!(signature.function_name, "subscribeToRenamed");
    assert_eq!(signature.variable_signature, "{}");
    Ok(())
}

#[test]
fn anonymous_operations_have_no_function() {
    let schema = setup_schema();
    let graph = build_graph("{ user(id: \"1\") { id } }");

    let result = FunctionSignature::for_operation(
        &schema,
        &graph.operation_data_list()[0],
        graph.fragment_definitions(),
    );

    assert_eq!(result, Err(SignatureError::MissingOperationName {
        kind: OperationKind::Query,
    }));
}

#[test]
fn fragments_are_not_operations() {
    let schema = setup_schema();
    let graph = build_graph("fragment Bits on User { id }");

    let result = FunctionSignature::for_operation(
        &schema,
        graph.lookup("Bits").unwrap(),
        graph.fragment_definitions(),
    );

    assert_eq!(result, Err(SignatureError::NotAnOperation {
        name: "Bits".to_string(),
    }));
}

#[test]
fn fragment_signature() -> Result<()> {
    let schema = setup_schema();
    let graph = build_graph("fragment Bits on User { name }");

    let signature = FragmentSignature::for_fragment(
        &schema,
        graph.lookup("Bits").unwrap(),
        graph.fragment_definitions(),
    )?;

    assert_eq!(signature.name, "Bits");
    assert_eq!(signature.type_condition, "User");
    assert_eq!(signature.full_type_signature, "{\n  id: string;\n  name?: string;\n}");
    assert_eq!(signature.selection_signature, "{\n  name?: string;\n}");
    Ok(())
}

#[test]
fn operations_are_not_fragments() {
    let schema = setup_schema();
    let graph = build_graph("mutation Rename { rename(id: \"1\", name: \"x\") { id } }");

    let result = FragmentSignature::for_fragment(
        &schema,
        graph.lookup("Rename").unwrap(),
        graph.fragment_definitions(),
    );

    assert_eq!(result, Err(SignatureError::NotAFragment {
        name: "Rename".to_string(),
    }));
}
