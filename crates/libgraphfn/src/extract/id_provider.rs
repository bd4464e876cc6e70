use inherent::inherent;
use std::cell::Cell;

/// Mints identifiers for extracted functions whose directive does not name
/// one.
pub trait IdProvider {
    fn next_id(&self) -> String;
}

/// Mints a random v4 UUID on every call.
///
/// Ids minted this way are not stable: extracting the same document twice
/// gives every function without an explicit `id:` a different id each time.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidV4IdProvider;
impl IdProvider for UuidV4IdProvider {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Mints `{prefix}1`, `{prefix}2`, ... in order.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    next: Cell<u64>,
    prefix: String,
}
impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
#[inherent]
impl IdProvider for SequentialIdProvider {
    pub fn next_id(&self) -> String {
        let next = self.next.get() + 1;
        self.next.set(next);
        format!("{}{next}", self.prefix)
    }
}
