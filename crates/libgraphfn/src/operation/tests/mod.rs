mod operation_graph_builder_tests;
