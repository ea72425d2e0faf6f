use crate::error::ListError;
use crate::identity::TypeIdentity;
use std::fmt;
use std::slice;
use tracing::debug;

/// An ordered list of expected types
///
/// A `Specification` describes the shape of a
/// [`HeterogeneousList`](crate::HeterogeneousList): which type sits at each
/// position. One can be derived from a list with
/// [`get_specification`](crate::HeterogeneousList::get_specification), or
/// authored by hand to declare the contract a list should meet. Hand-authored
/// entries may carry a description, which shows up in diagnostics but never
/// affects matching.
///
/// # Examples
///
/// ```
/// use sovran_typelist::{HeterogeneousList, ListError, Specification};
///
/// let mut expected = Specification::new();
/// expected.append_described::<i32>("user id");
/// expected.append_described::<String>("user name");
///
/// let mut list = HeterogeneousList::new();
/// list.append(7i32);
/// list.append("alice".to_string());
///
/// expected.matches(&list.get_specification())?;
/// assert_eq!(expected.to_string(), r#"[i32 "user id", String "user name"]"#);
/// # Ok::<(), ListError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Specification {
    entries: Vec<TypeIdentity>,
}

impl Specification {
    /// Creates a new, empty Specification
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds an unlabeled specification from a sequence of identities
    ///
    /// Only lists derive specifications this way; descriptions are dropped.
    pub(crate) fn from_identities<I>(identities: I) -> Self
    where
        I: IntoIterator<Item = TypeIdentity>,
    {
        Self {
            entries: identities
                .into_iter()
                .map(TypeIdentity::without_description)
                .collect(),
        }
    }

    /// Appends the identity of `T`
    pub fn append<T: ?Sized + 'static>(&mut self) {
        self.entries.push(TypeIdentity::of::<T>());
    }

    /// Appends the identity of `T` with a description of what is expected there
    pub fn append_described<T: ?Sized + 'static>(&mut self, description: impl Into<String>) {
        self.entries
            .push(TypeIdentity::of::<T>().with_description(description));
    }

    /// Inserts the identity of `T` at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index > len()`.
    pub fn insert<T: ?Sized + 'static>(&mut self, index: usize) -> Result<(), ListError> {
        self.insert_identity(index, TypeIdentity::of::<T>())
    }

    /// Inserts the identity of `T` with a description at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index > len()`.
    pub fn insert_described<T: ?Sized + 'static>(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> Result<(), ListError> {
        self.insert_identity(index, TypeIdentity::of::<T>().with_description(description))
    }

    fn insert_identity(&mut self, index: usize, identity: TypeIdentity) -> Result<(), ListError> {
        if index > self.entries.len() {
            return Err(ListError::out_of_range(index, self.entries.len()));
        }
        self.entries.insert(index, identity);
        Ok(())
    }

    /// Removes the entry at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<(), ListError> {
        if index >= self.entries.len() {
            return Err(ListError::out_of_range(index, self.entries.len()));
        }
        self.entries.remove(index);
        Ok(())
    }

    /// Returns the entry at `index`
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&TypeIdentity, ListError> {
        self.entries
            .get(index)
            .ok_or_else(|| ListError::out_of_range(index, self.entries.len()))
    }

    /// Returns the number of entries
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, TypeIdentity> {
        self.entries.iter()
    }

    /// Checks `actual` against this specification
    ///
    /// Both must have the same length and the same type at every index.
    /// Descriptions are ignored.
    ///
    /// # Errors
    ///
    /// Reports the first position that disagrees:
    /// - `ListError::EntryMismatch` if both sides have an entry there but the types differ
    /// - `ListError::MissingEntry` if `actual` is shorter
    /// - `ListError::UnexpectedEntry` if `actual` is longer
    pub fn matches(&self, actual: &Specification) -> Result<(), ListError> {
        let error = match self.first_difference(actual) {
            Some(error) => error,
            None => return Ok(()),
        };
        debug!(%error, "specification mismatch");
        Err(error)
    }

    /// Returns true if `actual` matches this specification
    pub fn is_match(&self, actual: &Specification) -> bool {
        self.first_difference(actual).is_none()
    }

    fn first_difference(&self, actual: &Specification) -> Option<ListError> {
        for (index, (expected, found)) in self.entries.iter().zip(&actual.entries).enumerate() {
            if !expected.equals(found) {
                return Some(ListError::EntryMismatch {
                    index,
                    expected: expected.clone(),
                    actual: found.clone(),
                });
            }
        }

        let common = self.entries.len().min(actual.entries.len());
        if let Some(expected) = self.entries.get(common) {
            Some(ListError::MissingEntry {
                index: common,
                expected: expected.clone(),
            })
        } else {
            actual
                .entries
                .get(common)
                .map(|found| ListError::UnexpectedEntry {
                    index: common,
                    actual: found.clone(),
                })
        }
    }
}

impl<'a> IntoIterator for &'a Specification {
    type Item = &'a TypeIdentity;
    type IntoIter = slice::Iter<'a, TypeIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry)?;
            if let Some(description) = entry.description() {
                write!(f, " {:?}", description)?;
            }
        }
        f.write_str("]")
    }
}
