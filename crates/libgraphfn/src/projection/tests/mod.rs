mod selection_projector_tests;
mod signature_tests;
mod type_shape_tests;
