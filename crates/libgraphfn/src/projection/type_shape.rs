use indexmap::IndexMap;
use serde::Serialize;

/// The TypeScript type a GraphQL leaf type projects to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarShape {
    Any,
    Boolean,
    Number,
    String,
}
impl ScalarShape {
    pub fn as_ts_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// One entry of an object shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldShape {
    pub description: Option<String>,
    pub nullable: bool,
    pub shape: TypeShape,
}

/// A target-language type derived from a GraphQL type (and, for
/// operations, the selection made on it).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TypeShape {
    EnumLiteral(Vec<String>),

    /// Stands in for a type that could not be expanded any further: a type
    /// that contains itself, or one nested deeper than the projectors
    /// follow.
    Infinite,

    List(Box<TypeShape>),
    Object(IndexMap<String, FieldShape>),
    Scalar(ScalarShape),
}
impl TypeShape {
    pub fn any() -> Self {
        Self::Scalar(ScalarShape::Any)
    }

    /// The shape beneath every list layer.
    pub fn innermost(&self) -> &TypeShape {
        match self {
            Self::List(inner) => inner.innermost(),
            shape => shape,
        }
    }

    /// Number of list layers wrapped around the innermost shape.
    pub fn list_nesting_depth(&self) -> usize {
        match self {
            Self::List(inner) => 1 + inner.list_nesting_depth(),
            _ => 0,
        }
    }

    /// Combine two projections of the same response key. Object shapes are
    /// merged key by key (recursively, and through matching list layers);
    /// anything else is replaced by `other`.
    pub fn merge(self, other: TypeShape) -> TypeShape {
        match (self, other) {
            (Self::Object(mut fields), Self::Object(other_fields)) => {
                for (key, other_field) in other_fields {
                    merge_field(&mut fields, key, other_field);
                }
                Self::Object(fields)
            },
            (Self::List(inner), Self::List(other_inner)) =>
                Self::List(Box::new(inner.merge(*other_inner))),
            (_, other) => other,
        }
    }

    /// Render as a TypeScript type expression.
    pub fn to_typescript(&self) -> String {
        let mut out = String::new();
        self.render(0, &mut out);
        out
    }

    fn render(&self, indent: usize, out: &mut String) {
        match self {
            Self::EnumLiteral(values) if values.is_empty() => out.push_str("never"),
            Self::EnumLiteral(values) => {
                let literals = values.iter()
                    .map(|value| format!("\"{value}\""))
                    .collect::<Vec<_>>();
                out.push_str(literals.join(" | ").as_str());
            },

            Self::Infinite => out.push_str("\"infinite\""),

            Self::List(inner) => {
                let needs_parens = matches!(
                    inner.as_ref(),
                    Self::EnumLiteral(values) if values.len() > 1,
                );
                if needs_parens {
                    out.push('(');
                }
                inner.render(indent, out);
                if needs_parens {
                    out.push(')');
                }
                out.push_str("[]");
            },

            Self::Object(fields) if fields.is_empty() => out.push_str("{}"),
            Self::Object(fields) => {
                let field_indent = "  ".repeat(indent + 1);
                out.push_str("{\n");
                for (key, field) in fields {
                    if let Some(description) = &field.description {
                        out.push_str(field_indent.as_str());
                        out.push_str("/** ");
                        out.push_str(description.replace("*/", "*\\/").as_str());
                        out.push_str(" */\n");
                    }
                    out.push_str(field_indent.as_str());
                    out.push_str(key.as_str());
                    if field.nullable {
                        out.push('?');
                    }
                    out.push_str(": ");
                    field.shape.render(indent + 1, out);
                    out.push_str(";\n");
                }
                out.push_str("  ".repeat(indent).as_str());
                out.push('}');
            },

            Self::Scalar(scalar) => out.push_str(scalar.as_ts_str()),
        }
    }
}
impl std::fmt::Display for TypeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_typescript().as_str())
    }
}

/// Insert `field` under `key`, merging with any shape already there. The
/// key keeps its original position.
pub(crate) fn merge_field(
    fields: &mut IndexMap<String, FieldShape>,
    key: String,
    field: FieldShape,
) {
    match fields.get_mut(key.as_str()) {
        Some(existing) => {
            let shape = std::mem::replace(&mut existing.shape, TypeShape::Infinite);
            existing.shape = shape.merge(field.shape);
            existing.nullable = field.nullable;
            if field.description.is_some() {
                existing.description = field.description;
            }
        },
        None => {
            fields.insert(key, field);
        },
    }
}
