mod types_map_builder_tests;
