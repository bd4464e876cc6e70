use crate::Schema;
use crate::ast;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticSink;
use crate::operation::DefinitionDetails;
use crate::operation::FragmentTable;
use crate::operation::OperationData;
use crate::operation::OperationKind;
use crate::projection::FieldShape;
use crate::projection::MAX_DEPTH;
use crate::projection::TypeProjector;
use crate::projection::TypeShape;
use crate::projection::type_shape::merge_field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use serde::Serialize;

/// The two-channel result every generated function returns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OperationShape {
    /// The merged projection of the selection set, or `any` when nothing in
    /// it could be resolved.
    pub data: TypeShape,

    /// Always `any[]`.
    pub errors: TypeShape,
}
impl OperationShape {
    /// Both channels as a single object shape: `{ data: ...; errors: ... }`.
    pub fn to_type_shape(&self) -> TypeShape {
        TypeShape::Object(IndexMap::from([
            ("data".to_string(), FieldShape {
                description: None,
                nullable: false,
                shape: self.data.clone(),
            }),
            ("errors".to_string(), FieldShape {
                description: None,
                nullable: false,
                shape: self.errors.clone(),
            }),
        ]))
    }
}
impl std::fmt::Display for OperationShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_type_shape())
    }
}

/// Projects the selection set of an operation or fragment into the shape of
/// its response, limiting every object to the fields actually selected.
///
/// Problems (an unknown field, an unresolvable type) never fail the
/// projection: the affected entry is dropped and a [`Diagnostic`] is
/// reported.
pub struct SelectionProjector<'a> {
    fragments: &'a FragmentTable,
    type_projector: TypeProjector<'a>,
}
impl<'a> SelectionProjector<'a> {
    pub fn diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.type_projector = self.type_projector.diagnostics(sink);
        self
    }

    pub fn new(schema: &'a Schema, fragments: &'a FragmentTable) -> Self {
        Self {
            fragments,
            type_projector: TypeProjector::new(schema),
        }
    }

    pub fn project_definition(&self, def: &ast::query::Definition) -> OperationShape {
        self.project_details(DefinitionDetails::from_definition(def))
    }

    pub fn project_fragment(&self, frag_def: &ast::query::FragmentDefinition) -> OperationShape {
        self.project_details(DefinitionDetails::from_fragment(frag_def))
    }

    pub fn project_operation(&self, op_def: &ast::query::OperationDefinition) -> OperationShape {
        self.project_details(DefinitionDetails::from_operation(op_def))
    }

    pub fn project_operation_data(&self, data: &OperationData) -> OperationShape {
        self.project_definition(data.definition())
    }

    /// The full-type projector sharing this projector's schema and
    /// diagnostics sink.
    pub fn type_projector(&self) -> &TypeProjector<'a> {
        &self.type_projector
    }

    fn diagnostics_sink(&self) -> &'a dyn DiagnosticSink {
        self.type_projector.sink()
    }

    fn schema(&self) -> &'a Schema {
        self.type_projector.schema()
    }

    fn project_details(&self, details: DefinitionDetails<'_>) -> OperationShape {
        let root_type = match details.kind {
            OperationKind::Fragment => details.type_condition.and_then(|type_name| {
                let type_ = self.schema().lookup_type(type_name);
                if type_.is_none() {
                    self.diagnostics_sink().report(Diagnostic::UnresolvedTypeCondition {
                        type_name: type_name.to_string(),
                    });
                }
                type_
            }),
            kind => {
                let type_ = self.schema().root_type(&kind);
                if type_.is_none() {
                    self.diagnostics_sink().report(Diagnostic::UndefinedRootType {
                        operation_kind: kind.to_string(),
                        operation_name: details.display_name(),
                    });
                }
                type_
            },
        };

        // A fragment is on the spread stack while its own selections are
        // projected, so spreading itself is skipped.
        let mut spread_stack = vec![];
        if details.kind == OperationKind::Fragment
            && let Some(name) = details.name {
            spread_stack.push(name.to_string());
        }

        let mut fields = IndexMap::new();
        self.project_selection_set(
            root_type,
            details.type_condition.unwrap_or(details.kind.as_str()),
            details.selection_set,
            &mut fields,
            &mut spread_stack,
        );

        OperationShape {
            data: if fields.is_empty() {
                TypeShape::any()
            } else {
                TypeShape::Object(fields)
            },
            errors: TypeShape::List(Box::new(TypeShape::any())),
        }
    }

    /// Project `selection_set` (made on `parent`) into `fields`. Inline
    /// fragments and fragment spreads splice their fields into the same
    /// mapping.
    fn project_selection_set(
        &self,
        parent: Option<&GraphQLType>,
        parent_name: &str,
        selection_set: &ast::query::SelectionSet,
        fields: &mut IndexMap<String, FieldShape>,
        spread_stack: &mut Vec<String>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::query::Selection::Field(field) => {
                    let key = field.alias.as_ref().unwrap_or(&field.name).to_string();
                    if let Some(field_shape) = self.project_field(
                        parent,
                        parent_name,
                        field,
                        spread_stack,
                    ) {
                        merge_field(fields, key, field_shape);
                    }
                },

                ast::query::Selection::InlineFragment(inline) => {
                    let (target, target_name) = match &inline.type_condition {
                        Some(ast::query::TypeCondition::On(type_name)) => {
                            match self.schema().lookup_type(type_name) {
                                Some(type_) => (Some(type_), type_name.as_str()),
                                None => {
                                    self.diagnostics_sink().report(
                                        Diagnostic::UnresolvedTypeCondition {
                                            type_name: type_name.to_string(),
                                        },
                                    );
                                    continue;
                                },
                            }
                        },
                        None => (parent, parent_name),
                    };
                    self.project_selection_set(
                        target,
                        target_name,
                        &inline.selection_set,
                        fields,
                        spread_stack,
                    );
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    let fragment_name = spread.fragment_name.as_str();
                    if spread_stack.iter().any(|name| name == fragment_name) {
                        log::debug!("Not re-entering fragment `{fragment_name}`.");
                        continue;
                    }
                    let Some(frag_def) = self.fragments.get(fragment_name) else {
                        log::debug!("Ignoring spread of undefined fragment `{fragment_name}`.");
                        continue;
                    };

                    let ast::query::TypeCondition::On(type_name) = &frag_def.type_condition;
                    let Some(target) = self.schema().lookup_type(type_name) else {
                        self.diagnostics_sink().report(Diagnostic::UnresolvedTypeCondition {
                            type_name: type_name.to_string(),
                        });
                        continue;
                    };

                    spread_stack.push(fragment_name.to_string());
                    self.project_selection_set(
                        Some(target),
                        type_name.as_str(),
                        &frag_def.selection_set,
                        fields,
                        spread_stack,
                    );
                    spread_stack.pop();
                },
            }
        }
    }

    fn project_field(
        &self,
        parent: Option<&GraphQLType>,
        parent_name: &str,
        field: &ast::query::Field,
        spread_stack: &mut Vec<String>,
    ) -> Option<FieldShape> {
        if field.name.starts_with("__") {
            return Some(FieldShape {
                description: None,
                nullable: false,
                shape: TypeShape::any(),
            });
        }

        let Some(parent) = parent else {
            self.diagnostics_sink().report(Diagnostic::UnresolvedParentType {
                field_name: field.name.to_string(),
                type_name: parent_name.to_string(),
            });
            return None;
        };

        let Some(field_def) = parent.fields().and_then(|fields| fields.get(field.name.as_str())) else {
            self.diagnostics_sink().report(Diagnostic::UnknownField {
                field_name: field.name.to_string(),
                parent_type_name: parent.name().to_string(),
            });
            return None;
        };

        let field_annot = field_def.type_annotation();
        Some(FieldShape {
            description: field_def.description().map(|desc| desc.to_string()),
            nullable: field_annot.nullable(),
            shape: self.project_field_type(field_annot, field, 0, spread_stack),
        })
    }

    /// Like [`TypeProjector::project`], except composite types expand only
    /// to the sub-selection made on them.
    fn project_field_type(
        &self,
        annot: &TypeAnnotation,
        field: &ast::query::Field,
        depth: usize,
        spread_stack: &mut Vec<String>,
    ) -> TypeShape {
        let depth = depth + usize::from(annot.as_list_annotation().is_some())
            + usize::from(!annot.nullable());
        if depth > MAX_DEPTH {
            return self.type_projector.report_depth_exceeded();
        }

        match annot {
            TypeAnnotation::List(list_annot) => TypeShape::List(Box::new(
                self.project_field_type(
                    list_annot.inner_type_annotation(),
                    field,
                    depth,
                    spread_stack,
                ),
            )),

            TypeAnnotation::Named(named_annot) => {
                let Some(type_) = named_annot.graphql_type(self.schema()) else {
                    self.diagnostics_sink().report(Diagnostic::UnresolvedType {
                        type_name: named_annot.type_name().to_string(),
                    });
                    return TypeShape::any();
                };

                if !type_.is_composite() {
                    return self.type_projector.project_type(type_);
                }

                let mut sub_fields = IndexMap::new();
                self.project_selection_set(
                    Some(type_),
                    type_.name(),
                    &field.selection_set,
                    &mut sub_fields,
                    spread_stack,
                );
                if sub_fields.is_empty() {
                    TypeShape::any()
                } else {
                    TypeShape::Object(sub_fields)
                }
            },
        }
    }
}
