use crate::envelope::Envelope;
use crate::error::ListError;
use crate::specification::Specification;
use std::slice;
use tracing::trace;

/// An ordered list of values of mixed types
///
/// Every value is wrapped in an [`Envelope`] that remembers its type, so it
/// can be taken back out only as the type it was stored with. Positions are
/// dense: every index in `0..len()` holds exactly one envelope.
///
/// The list owns its envelopes. Removing, replacing or clearing drops them
/// immediately.
///
/// # Examples
///
/// ```
/// use sovran_typelist::{HeterogeneousList, ListError};
///
/// let mut list = HeterogeneousList::new();
/// list.append(42i32);
/// list.append("x".to_string());
/// list.append(7i32);
///
/// assert_eq!(list.get_specification().to_string(), "[i32, String, i32]");
///
/// list.remove_at(1)?;
/// assert_eq!(list.get::<i32>(0)?, 42);
/// assert_eq!(list.at(1)?.retrieve::<i32>()?, 7);
///
/// assert!(matches!(list.at(5), Err(ListError::IndexOutOfRange { index: 5, len: 2 })));
/// # Ok::<(), ListError>(())
/// ```
#[derive(Debug, Default)]
pub struct HeterogeneousList {
    envelopes: Vec<Envelope>,
}

impl HeterogeneousList {
    /// Creates a new, empty HeterogeneousList
    pub fn new() -> Self {
        Self {
            envelopes: Vec::new(),
        }
    }

    /// Appends `value` at the end of the list
    pub fn append<T: 'static>(&mut self, value: T) {
        let envelope = Envelope::new(value);
        trace!(index = self.envelopes.len(), identity = %envelope.identity(), "appended");
        self.envelopes.push(envelope);
    }

    /// Inserts `value` at `index`, shifting later elements back by one
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index > len()`.
    pub fn insert<T: 'static>(&mut self, index: usize, value: T) -> Result<(), ListError> {
        if index > self.envelopes.len() {
            return Err(ListError::out_of_range(index, self.envelopes.len()));
        }
        let envelope = Envelope::new(value);
        trace!(index, identity = %envelope.identity(), "inserted");
        self.envelopes.insert(index, envelope);
        Ok(())
    }

    /// Removes and drops the element at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<(), ListError> {
        if index >= self.envelopes.len() {
            return Err(ListError::out_of_range(index, self.envelopes.len()));
        }
        let removed = self.envelopes.remove(index);
        trace!(index, identity = %removed.identity(), "removed");
        Ok(())
    }

    /// Drops every element
    pub fn clear(&mut self) {
        trace!(len = self.envelopes.len(), "cleared");
        self.envelopes.clear();
    }

    /// Replaces the element at `index` with `value`
    ///
    /// The old element is dropped and the new one takes its position. The new
    /// value does not need to have the same type as the old one.
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn replace<T: 'static>(&mut self, index: usize, value: T) -> Result<(), ListError> {
        let len = self.envelopes.len();
        let slot = self
            .envelopes
            .get_mut(index)
            .ok_or_else(|| ListError::out_of_range(index, len))?;
        let envelope = Envelope::new(value);
        trace!(index, old = %slot.identity(), new = %envelope.identity(), "replaced");
        *slot = envelope;
        Ok(())
    }

    /// Returns the envelope at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&Envelope, ListError> {
        self.envelopes
            .get(index)
            .ok_or_else(|| ListError::out_of_range(index, self.envelopes.len()))
    }

    /// Returns the envelope at `index` for in-place modification
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Envelope, ListError> {
        let len = self.envelopes.len();
        self.envelopes
            .get_mut(index)
            .ok_or_else(|| ListError::out_of_range(index, len))
    }

    /// Retrieves a clone of the value at `index`
    ///
    /// # Errors
    ///
    /// - Returns `ListError::IndexOutOfRange` if `index >= len()`
    /// - Returns `ListError::TypeMismatch` if the value is not a `T`
    pub fn get<T: Clone + 'static>(&self, index: usize) -> Result<T, ListError> {
        self.at(index)?.retrieve::<T>()
    }

    /// Gets a value by executing a closure with read access
    ///
    /// # Errors
    ///
    /// - Returns `ListError::IndexOutOfRange` if `index >= len()`
    /// - Returns `ListError::TypeMismatch` if the value is not a `T`
    pub fn with<T: 'static, F, R>(&self, index: usize, f: F) -> Result<R, ListError>
    where
        F: FnOnce(&T) -> R,
    {
        self.at(index)?.with(f)
    }

    /// Gets a value by executing a closure with write access
    ///
    /// # Errors
    ///
    /// - Returns `ListError::IndexOutOfRange` if `index >= len()`
    /// - Returns `ListError::TypeMismatch` if the value is not a `T`
    pub fn with_mut<T: 'static, F, R>(&mut self, index: usize, f: F) -> Result<R, ListError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.at_mut(index)?.with_mut(f)
    }

    /// Returns the number of elements
    pub fn size(&self) -> usize {
        self.envelopes.len()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Envelope> {
        self.envelopes.iter()
    }

    /// Returns a snapshot of the element types, in order
    ///
    /// The snapshot is independent of the list: later changes to the list do
    /// not show up in it.
    pub fn get_specification(&self) -> Specification {
        Specification::from_identities(self.envelopes.iter().map(|e| e.identity().clone()))
    }

    /// Alias for [`get_specification`](Self::get_specification)
    pub fn specification(&self) -> Specification {
        self.get_specification()
    }

    /// Checks the current element types against `expected`
    ///
    /// # Errors
    ///
    /// Returns the first disagreement, as reported by [`Specification::matches`].
    pub fn conforms_to(&self, expected: &Specification) -> Result<(), ListError> {
        expected.matches(&self.get_specification())
    }
}

impl<'a> IntoIterator for &'a HeterogeneousList {
    type Item = &'a Envelope;
    type IntoIter = slice::Iter<'a, Envelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.envelopes.iter()
    }
}
