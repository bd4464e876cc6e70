use std::marker::PhantomData;

/// A `String`-named reference to some resource (`TResource`) stored within a
/// data-store (`TSource`) without holding a borrow of that data-store.
/// De-referencing is done via [`NamedRef::deref()`] by handing in the
/// `TSource` explicitly.
///
/// [`UnionType`](crate::types::UnionType) members and the root operation
/// types of a [`Schema`](crate::schema::Schema) are stored this way so the
/// schema's type map never needs to point into itself.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedRef<
    TSource,
    TRefLocation,
    TResource: DerefByName<Source=TSource, RefLocation=TRefLocation>,
> {
    name: String,
    phantom: PhantomData<TResource>,
    ref_location: TRefLocation,
}
impl<
    TSource,
    TRefLocation,
    TResource: DerefByName<Source=TSource, RefLocation=TRefLocation>,
> NamedRef<TSource, TRefLocation, TResource> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn new(
        name: impl AsRef<str>,
        ref_location: TRefLocation,
    ) -> NamedRef<TSource, TRefLocation, TResource> {
        NamedRef {
            name: name.as_ref().to_string(),
            ref_location,
            phantom: PhantomData,
        }
    }

    pub fn ref_location(&self) -> &TRefLocation {
        &self.ref_location
    }

    pub fn deref<'a>(
        &self,
        source: &'a TSource,
    ) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}

/// Implemented by anything that can be looked up by name inside some
/// `Source`, enabling [`NamedRef`]s to it.
pub trait DerefByName: Clone + core::fmt::Debug {
    type Source;
    type RefLocation;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> where Self: Sized;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DerefByNameError {
    DanglingReference(String),
}
