use crate::Schema;
use crate::ast;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::SilentSink;
use crate::projection::FieldShape;
use crate::projection::ScalarShape;
use crate::projection::TypeShape;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// How many list/non-null wrappers are followed before projecting to
/// [`TypeShape::Infinite`].
pub const MAX_DEPTH: usize = 30;

/// How many object types deep a full projection expands. A composite field
/// below this depth projects to [`TypeShape::Infinite`].
pub const MAX_OBJECT_DEPTH: usize = 3;

/// Number of list layers on a declared type, capped at [`MAX_DEPTH`].
pub fn list_nesting_depth(annot: &TypeAnnotation) -> usize {
    annot.list_depth().min(MAX_DEPTH)
}

/// Wrapper layers an annotation layer stands for: one for the list (if it
/// is one) plus one for a non-null wrapper.
fn wrapper_layers(annot: &TypeAnnotation) -> usize {
    let list_layer = usize::from(annot.as_list_annotation().is_some());
    let non_null_layer = usize::from(!annot.nullable());
    list_layer + non_null_layer
}

/// Projects GraphQL types into [`TypeShape`]s without regard to any
/// selection: objects, interfaces and input objects expand to their full
/// field sets, down to [`MAX_OBJECT_DEPTH`] object types.
///
/// A type nested inside itself, and any composite type below the depth
/// limit, projects to [`TypeShape::Infinite`]. Each projection reports the
/// truncations it made once (see [`Diagnostic::RecursiveTypeTruncated`] and
/// [`Diagnostic::ObjectDepthExceeded`]).
///
/// ```
/// use libgraphfn::projection::TypeProjector;
/// use libgraphfn::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::from_str(
///     None,
///     "type Query { a: Int } enum Color { RED GREEN }",
/// ).unwrap().build().unwrap();
///
/// let projector = TypeProjector::new(&schema);
/// let color = schema.lookup_type("Color").unwrap();
/// assert_eq!(projector.project_type(color).to_string(), "\"RED\" | \"GREEN\"");
/// ```
pub struct TypeProjector<'a> {
    diagnostics: &'a dyn DiagnosticSink,
    schema: &'a Schema,
}
impl<'a> TypeProjector<'a> {
    pub fn diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn new(schema: &'a Schema) -> Self {
        Self {
            diagnostics: &SilentSink,
            schema,
        }
    }

    /// Project a type reference, following its list and non-null wrappers.
    /// Non-null only affects field-level nullability, never the shape.
    pub fn project(&self, annot: &TypeAnnotation) -> TypeShape {
        let mut expansion = Expansion::default();
        let shape = self.project_annotation(annot, 0, &mut expansion);
        self.report_truncations(expansion);
        shape
    }

    /// Project a type reference as written in an operations document (e.g.
    /// a variable's declared type).
    pub fn project_ast_type(&self, ast_type: &ast::query::Type) -> TypeShape {
        self.project(&TypeAnnotation::from_ast_type(ast_type))
    }

    /// Project a named type.
    pub fn project_type(&self, type_: &GraphQLType) -> TypeShape {
        let mut expansion = Expansion::default();
        let shape = self.project_type_impl(type_, &mut expansion);
        self.report_truncations(expansion);
        shape
    }

    /// The shape of a leaf (scalar or enum) type, or `None` for composite
    /// and input object types.
    pub fn project_leaf_type(&self, type_: &GraphQLType) -> Option<TypeShape> {
        Some(match type_ {
            GraphQLType::Bool => TypeShape::Scalar(ScalarShape::Boolean),
            GraphQLType::Float | GraphQLType::Int => TypeShape::Scalar(ScalarShape::Number),
            GraphQLType::ID | GraphQLType::String => TypeShape::Scalar(ScalarShape::String),
            GraphQLType::Scalar(_) => TypeShape::any(),
            GraphQLType::Enum(enum_type) => TypeShape::EnumLiteral(
                enum_type.value_names().map(|name| name.to_string()).collect(),
            ),
            GraphQLType::InputObject(_)
                | GraphQLType::Interface(_)
                | GraphQLType::Object(_)
                | GraphQLType::Union(_) => return None,
        })
    }

    pub(crate) fn report_depth_exceeded(&self) -> TypeShape {
        self.diagnostics.report(Diagnostic::WrapperDepthExceeded {
            max_depth: MAX_DEPTH,
        });
        TypeShape::Infinite
    }

    pub(crate) fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub(crate) fn sink(&self) -> &'a dyn DiagnosticSink {
        self.diagnostics
    }

    fn project_annotation(
        &self,
        annot: &TypeAnnotation,
        depth: usize,
        expansion: &mut Expansion,
    ) -> TypeShape {
        let depth = depth + wrapper_layers(annot);
        if depth > MAX_DEPTH {
            return self.report_depth_exceeded();
        }

        match annot {
            TypeAnnotation::List(list_annot) => TypeShape::List(Box::new(
                self.project_annotation(list_annot.inner_type_annotation(), depth, expansion),
            )),

            TypeAnnotation::Named(named_annot) =>
                match named_annot.graphql_type(self.schema) {
                    Some(type_) => self.project_type_impl(type_, expansion),
                    None => {
                        self.diagnostics.report(Diagnostic::UnresolvedType {
                            type_name: named_annot.type_name().to_string(),
                        });
                        TypeShape::any()
                    },
                },
        }
    }

    fn project_type_impl(
        &self,
        type_: &GraphQLType,
        expansion: &mut Expansion,
    ) -> TypeShape {
        if let Some(leaf_shape) = self.project_leaf_type(type_) {
            return leaf_shape;
        }

        let fields = match type_ {
            GraphQLType::InputObject(input_type) => input_type.fields()
                .values()
                .map(|field| (field.name(), field.description(), field.type_annotation()))
                .collect::<Vec<_>>(),
            GraphQLType::Interface(_) | GraphQLType::Object(_) => type_.fields()
                .into_iter()
                .flat_map(|fields| fields.values())
                .map(|field| (field.name(), field.description(), field.type_annotation()))
                .collect::<Vec<_>>(),
            // Selecting a union's members requires a selection set; on its
            // own a union is open.
            _ => return TypeShape::any(),
        };

        let type_name = type_.name();
        if expansion.ancestors.iter().any(|ancestor| ancestor == type_name) {
            expansion.recursive_types.insert(type_name.to_string());
            return TypeShape::Infinite;
        }
        if expansion.ancestors.len() >= MAX_OBJECT_DEPTH {
            expansion.object_depth_exceeded = true;
            return TypeShape::Infinite;
        }

        expansion.ancestors.push(type_name.to_string());
        let mut shape_fields = IndexMap::new();
        for (field_name, description, field_annot) in fields {
            shape_fields.insert(field_name.to_string(), FieldShape {
                description: description.map(|desc| desc.to_string()),
                nullable: field_annot.nullable(),
                shape: self.project_annotation(field_annot, 0, expansion),
            });
        }
        expansion.ancestors.pop();

        TypeShape::Object(shape_fields)
    }

    fn report_truncations(&self, expansion: Expansion) {
        for type_name in expansion.recursive_types {
            self.diagnostics.report(Diagnostic::RecursiveTypeTruncated { type_name });
        }
        if expansion.object_depth_exceeded {
            self.diagnostics.report(Diagnostic::ObjectDepthExceeded {
                max_depth: MAX_OBJECT_DEPTH,
            });
        }
    }
}

/// Book-keeping for one full projection.
#[derive(Debug, Default)]
struct Expansion {
    /// Object types currently being expanded, outermost first.
    ancestors: Vec<String>,
    object_depth_exceeded: bool,
    recursive_types: IndexSet<String>,
}
