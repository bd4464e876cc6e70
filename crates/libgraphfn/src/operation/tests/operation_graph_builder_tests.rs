use crate::CollectingSink;
use crate::Diagnostic;
use crate::ast;
use crate::operation::DocumentCache;
use crate::operation::OperationGraph;
use crate::operation::OperationGraphBuildError;
use crate::operation::OperationGraphBuilder;
use crate::operation::OperationKind;

type Result<T> = std::result::Result<T, OperationGraphBuildError>;

fn no_variables() -> serde_json::Map<String, serde_json::Value> {
    serde_json::Map::new()
}

fn ordered_names(graph: &OperationGraph) -> Vec<&str> {
    graph.operation_data_list()
        .iter()
        .map(|data| data.display_name())
        .collect()
}

fn position_of(graph: &OperationGraph, name: &str) -> usize {
    graph.operation_data_list()
        .iter()
        .position(|data| data.display_name() == name)
        .unwrap()
}

mod ordering {
    use super::*;

    #[test]
    fn fragment_precedes_the_query_spreading_it() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            "query Q { ...F }\nfragment F on T { a }",
            &no_variables(),
        )?;

        assert_eq!(ordered_names(&graph), vec!["F", "Q"]);
        assert_eq!(
            graph.raw_operation_data_list()
                .iter()
                .map(|data| data.display_name())
                .collect::<Vec<_>>(),
            vec!["Q", "F"],
        );

        Ok(())
    }

    #[test]
    fn unrelated_definitions_keep_document_order() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            concat!(
                "query C { a }\n",
                "mutation A { b }\n",
                "fragment B on T { c }\n",
                "subscription D { d }\n",
            ),
            &no_variables(),
        )?;

        assert_eq!(ordered_names(&graph), vec!["C", "A", "B", "D"]);

        Ok(())
    }

    #[test]
    fn transitive_dependencies_come_first() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            concat!(
                "query Q { user { ...UserFields } }\n",
                "fragment UserFields on User { name ...Avatar }\n",
                "fragment Avatar on User { avatar { ...Image } }\n",
                "fragment Image on Image { url }\n",
                "query Other { ...Image }\n",
            ),
            &no_variables(),
        )?;

        for (dependency, dependent) in [
            ("UserFields", "Q"),
            ("Avatar", "Q"),
            ("Image", "Q"),
            ("Avatar", "UserFields"),
            ("Image", "UserFields"),
            ("Image", "Avatar"),
            ("Image", "Other"),
        ] {
            assert!(
                position_of(&graph, dependency) < position_of(&graph, dependent),
                "expected {dependency} before {dependent} in {:?}",
                ordered_names(&graph),
            );
        }

        assert_eq!(
            graph.lookup("Q").unwrap().fragment_dependencies(),
            &["Image".to_string(), "Avatar".to_string(), "UserFields".to_string()],
        );

        Ok(())
    }

    #[test]
    fn building_twice_is_deterministic() -> Result<()> {
        let content = concat!(
            "query B { ...F2 }\n",
            "query A { ...F1 ...F2 }\n",
            "fragment F1 on T { a ...F2 }\n",
            "fragment F2 on T { b }\n",
        );

        let first = OperationGraphBuilder::new().build_from_str(content, &no_variables())?;
        let second = OperationGraphBuilder::new().build_from_str(content, &no_variables())?;

        assert_eq!(first, second);
        assert_eq!(ordered_names(&first), vec!["F2", "B", "F1", "A"]);

        Ok(())
    }
}

mod cycles {
    use super::*;

    #[test]
    fn two_fragment_cycle_is_reported_and_both_are_kept() -> Result<()> {
        let sink = CollectingSink::new();
        let graph = OperationGraphBuilder::new()
            .diagnostics(&sink)
            .build_from_str(
                "fragment A on T { ...B }\nfragment B on T { ...A }",
                &no_variables(),
            )?;

        assert_eq!(sink.diagnostics(), vec![Diagnostic::FragmentCycle {
            cycle_path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        }]);
        assert_eq!(ordered_names(&graph), vec!["B", "A"]);

        Ok(())
    }

    #[test]
    fn self_spread_is_a_cycle() -> Result<()> {
        let sink = CollectingSink::new();
        let graph = OperationGraphBuilder::new()
            .diagnostics(&sink)
            .build_from_str("fragment A on T { a ...A }", &no_variables())?;

        assert_eq!(sink.diagnostics(), vec![Diagnostic::FragmentCycle {
            cycle_path: vec!["A".to_string(), "A".to_string()],
        }]);
        assert_eq!(ordered_names(&graph), vec!["A"]);
        assert!(graph.lookup("A").unwrap().fragment_dependencies().is_empty());

        Ok(())
    }

    #[test]
    fn operation_spreading_a_cycle_still_gets_ordered() -> Result<()> {
        let sink = CollectingSink::new();
        let graph = OperationGraphBuilder::new()
            .diagnostics(&sink)
            .build_from_str(
                concat!(
                    "query Q { ...A }\n",
                    "fragment A on T { ...B }\n",
                    "fragment B on T { ...C }\n",
                    "fragment C on T { ...A }\n",
                ),
                &no_variables(),
            )?;

        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(ordered_names(&graph), vec!["C", "B", "A", "Q"]);

        Ok(())
    }
}

mod metadata {
    use super::*;

    #[test]
    fn anonymous_operations_get_a_display_name() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            "{ a }\nmutation { b }",
            &no_variables(),
        )?;

        let data = graph.operation_data_list();
        assert_eq!(data[0].display_name(), "<Unnamed:query>");
        assert_eq!(data[0].name(), None);
        assert_eq!(data[1].display_name(), "<Unnamed:mutation>");
        assert_eq!(data[1].kind(), OperationKind::Mutation);

        Ok(())
    }

    #[test]
    fn variables_are_the_declared_subset() -> Result<()> {
        let variable_values = serde_json::json!({
            "limit": 10,
            "id": "abc",
            "unused": true,
        });
        let variable_values = variable_values.as_object().unwrap();

        let graph = OperationGraphBuilder::new().build_from_str(
            "query getUserPosts($id: ID!, $limit: Int, $offset: Int) { a }",
            variable_values,
        )?;

        let data = graph.lookup("getUserPosts").unwrap();
        assert_eq!(data.variable_name(), "GET_USER_POSTS");
        assert_eq!(
            serde_json::Value::Object(data.variables().clone()),
            serde_json::json!({ "id": "abc", "limit": 10 }),
        );
        assert_eq!(
            data.variables().keys().collect::<Vec<_>>(),
            vec!["id", "limit"],
        );

        Ok(())
    }

    #[test]
    fn document_string_includes_required_fragments() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            concat!(
                "query Q { ...F }\n",
                "fragment F on T { a ...G }\n",
                "fragment G on T { b }\n",
                "fragment Unused on T { c }\n",
            ),
            &no_variables(),
        )?;

        let data = graph.lookup("Q").unwrap();
        let reparsed = ast::query::parse(data.document_string()).unwrap();
        let names = reparsed.definitions.iter().map(|def| match def {
            ast::query::Definition::Fragment(frag_def) => frag_def.name.to_string(),
            ast::query::Definition::Operation(_) => "<operation>".to_string(),
        }).collect::<Vec<_>>();

        assert_eq!(names, vec!["<operation>", "G", "F"]);
        assert!(!data.operation_string().contains("fragment"));
        assert_eq!(graph.lookup("F").unwrap().type_condition(), Some("T"));

        Ok(())
    }

    #[test]
    fn definitions_are_partitioned_by_kind() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            "query Q { a }\nfragment F on T { b }\nmutation M { c }",
            &no_variables(),
        )?;

        assert_eq!(graph.operation_definitions().len(), 2);
        assert_eq!(
            graph.fragment_definitions().keys().collect::<Vec<_>>(),
            vec!["F"],
        );

        Ok(())
    }

    #[test]
    fn spreads_of_undefined_fragments_are_ignored() -> Result<()> {
        let sink = CollectingSink::new();
        let graph = OperationGraphBuilder::new()
            .diagnostics(&sink)
            .build_from_str("query Q { ...Missing }", &no_variables())?;

        assert!(sink.is_empty());
        assert!(graph.lookup("Q").unwrap().fragment_dependencies().is_empty());

        Ok(())
    }
}

mod failures {
    use super::*;

    #[test]
    fn parse_failure_yields_an_empty_graph() -> Result<()> {
        let sink = CollectingSink::new();
        let graph = OperationGraphBuilder::new()
            .diagnostics(&sink)
            .build_from_str("query Q {", &no_variables())?;

        assert!(graph.is_empty());
        assert!(graph.document().is_none());
        assert!(matches!(
            sink.diagnostics().as_slice(),
            [Diagnostic::DocumentParseFailure { .. }],
        ));

        Ok(())
    }

    #[test]
    fn duplicate_fragment_names_are_an_error() {
        let result = OperationGraphBuilder::new().build_from_str(
            "fragment F on T { a }\nfragment F on T { b }",
            &no_variables(),
        );

        match result {
            Err(OperationGraphBuildError::DuplicateDefinitionName {
                name,
                first_def_location,
                second_def_location,
            }) => {
                assert_eq!(name, "F");
                assert_eq!(first_def_location.line, 1);
                assert_eq!(second_def_location.line, 2);
            },
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn operation_and_fragment_share_a_namespace() {
        let result = OperationGraphBuilder::new().build_from_str(
            "query X { a }\nfragment X on T { b }",
            &no_variables(),
        );

        assert!(matches!(
            result,
            Err(OperationGraphBuildError::DuplicateDefinitionName { .. }),
        ));
    }

    #[test]
    fn multiple_anonymous_operations_do_not_collide() -> Result<()> {
        let graph = OperationGraphBuilder::new().build_from_str(
            "{ a }\n{ b }",
            &no_variables(),
        )?;

        assert_eq!(graph.operation_data_list().len(), 2);

        Ok(())
    }
}

#[test]
fn cache_is_reused_across_builds() -> Result<()> {
    let mut cache = DocumentCache::new();
    let content = "query Q { ...F }\nfragment F on T { a }";

    let first = OperationGraphBuilder::new()
        .cache(&mut cache)
        .build_from_str(content, &no_variables())?;
    let second = OperationGraphBuilder::new()
        .cache(&mut cache)
        .build_from_str(content, &no_variables())?;

    assert_eq!(cache.hits(), 1);
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn build_from_parsed_document_matches_build_from_str() -> Result<()> {
    let content = "query Q { ...F }\nfragment F on T { a }";
    let document = ast::query::parse(content).unwrap();

    let from_doc = OperationGraphBuilder::new().build(&document, &no_variables())?;
    let from_str = OperationGraphBuilder::new().build_from_str(content, &no_variables())?;

    assert_eq!(ordered_names(&from_doc), ordered_names(&from_str));

    Ok(())
}
