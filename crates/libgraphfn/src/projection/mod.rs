mod selection_projector;
mod signature;
mod type_projector;
mod type_shape;

pub use selection_projector::OperationShape;
pub use selection_projector::SelectionProjector;
pub use signature::FragmentSignature;
pub use signature::FunctionSignature;
pub use signature::SignatureError;
pub use signature::function_name;
pub use type_projector::MAX_DEPTH;
pub use type_projector::MAX_OBJECT_DEPTH;
pub use type_projector::TypeProjector;
pub use type_projector::list_nesting_depth;
pub use type_shape::FieldShape;
pub use type_shape::ScalarShape;
pub use type_shape::TypeShape;

#[cfg(test)]
mod tests;
