use inherent::inherent;
use std::cell::RefCell;

/// A non-fatal problem noticed while building an operation graph or
/// projecting a selection.
///
/// None of these stop processing: the affected piece is skipped (or degraded
/// to an open type) and the rest of the document is still handled.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The operations document could not be parsed; the operation list is
    /// empty.
    DocumentParseFailure {
        error: String,
    },

    /// A full type projection stopped expanding object types after
    /// `max_depth` levels; deeper composite fields are `"infinite"`.
    ObjectDepthExceeded {
        max_depth: usize,
    },

    /// A full type projection reached a type nested inside itself and
    /// projected the inner occurrence as `"infinite"`.
    RecursiveTypeTruncated {
        type_name: String,
    },

    /// Fragment spreads form a cycle. `cycle_path` starts and ends with the
    /// same name (e.g. `[A, B, A]`).
    FragmentCycle {
        cycle_path: Vec<String>,
    },

    /// The schema defines no root type for the operation's kind.
    UndefinedRootType {
        operation_kind: String,
        operation_name: String,
    },

    /// The type a field is selected on could not be resolved in the schema.
    UnresolvedParentType {
        field_name: String,
        type_name: String,
    },

    /// A field's declared type names a type the schema does not define.
    UnresolvedType {
        type_name: String,
    },

    /// The field is not defined on its parent type.
    UnknownField {
        field_name: String,
        parent_type_name: String,
    },

    /// A fragment's type condition names a type the schema does not define.
    UnresolvedTypeCondition {
        type_name: String,
    },

    /// A type reference is wrapped in more list/non-null layers than the
    /// projector will follow.
    WrapperDepthExceeded {
        max_depth: usize,
    },
}
impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentParseFailure { error } =>
                write!(f, "Failed to parse operations document: {error}"),
            Self::FragmentCycle { cycle_path } =>
                write!(f, "Fragment cycle detected: {}", cycle_path.join(" -> ")),
            Self::ObjectDepthExceeded { max_depth } => write!(
                f,
                "Stopped expanding object types more than {max_depth} levels deep",
            ),
            Self::RecursiveTypeTruncated { type_name } =>
                write!(f, "`{type_name}` contains itself; the inner occurrence is infinite"),
            Self::UndefinedRootType { operation_kind, operation_name } => write!(
                f,
                "The schema defines no {operation_kind} root type (needed by \
                `{operation_name}`)",
            ),
            Self::UnresolvedParentType { field_name, type_name } => write!(
                f,
                "Could not resolve the parent type `{type_name}` of field \
                `{field_name}`",
            ),
            Self::UnresolvedType { type_name } =>
                write!(f, "Could not resolve the type `{type_name}`"),
            Self::UnknownField { field_name, parent_type_name } => write!(
                f,
                "`{parent_type_name}` has no field named `{field_name}`",
            ),
            Self::UnresolvedTypeCondition { type_name } =>
                write!(f, "Could not resolve the type condition `{type_name}`"),
            Self::WrapperDepthExceeded { max_depth } => write!(
                f,
                "Type reference is nested more than {max_depth} wrappers deep",
            ),
        }
    }
}

/// Receives [`Diagnostic`]s as they are produced.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Drops every diagnostic. This is the default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;
impl DiagnosticSink for SilentSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Forwards every diagnostic to the `log` facade at `warn` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;
impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

/// Records every diagnostic so it can be inspected afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}
impl CollectingSink {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn new() -> Self {
        Self::default()
    }
}
#[inherent]
impl DiagnosticSink for CollectingSink {
    pub fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Reports to two sinks at once (e.g. a [`LogSink`] and a
/// [`CollectingSink`]).
pub struct TeeSink<'a> {
    first: &'a dyn DiagnosticSink,
    second: &'a dyn DiagnosticSink,
}
impl<'a> TeeSink<'a> {
    pub fn new(first: &'a dyn DiagnosticSink, second: &'a dyn DiagnosticSink) -> Self {
        Self { first, second }
    }
}
impl DiagnosticSink for TeeSink<'_> {
    fn report(&self, diagnostic: Diagnostic) {
        self.first.report(diagnostic.clone());
        self.second.report(diagnostic);
    }
}
