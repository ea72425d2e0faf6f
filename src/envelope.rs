use crate::error::ListError;
use crate::identity::TypeIdentity;
use std::any::Any;
use std::fmt;
use tracing::debug;

/// An owning, type-erased wrapper around a single value
///
/// The envelope records the [`TypeIdentity`] of the value it was created with.
/// That identity never changes, and every typed accessor checks it before
/// handing out the value, so a wrong type yields [`ListError::TypeMismatch`]
/// instead of a bogus value.
///
/// # Examples
///
/// ```
/// use sovran_typelist::{Envelope, ListError};
///
/// let envelope = Envelope::new(vec![1, 2, 3]);
/// assert!(envelope.is::<Vec<i32>>());
/// assert_eq!(envelope.retrieve::<Vec<i32>>()?, vec![1, 2, 3]);
///
/// match envelope.retrieve::<Vec<i64>>() {
///     Err(ListError::TypeMismatch { requested, actual }) => {
///         assert_eq!(requested.name(), "Vec<i64>");
///         assert_eq!(actual.name(), "Vec<i32>");
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// # Ok::<(), ListError>(())
/// ```
pub struct Envelope {
    identity: TypeIdentity,
    value: Box<dyn Any>,
}

impl Envelope {
    /// Wraps `value`, recording the identity of `T`
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            identity: TypeIdentity::of::<T>(),
            value: Box::new(value),
        }
    }

    /// The identity of the stored value's type
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// Check if the contained value is of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.identity.is::<T>()
    }

    /// Returns a clone of the contained value
    ///
    /// # Errors
    ///
    /// Returns `ListError::TypeMismatch` if the value is not a `T`.
    pub fn retrieve<T: Clone + 'static>(&self) -> Result<T, ListError> {
        self.downcast_ref::<T>().cloned()
    }

    /// Get a reference to the contained value if it is of type T
    ///
    /// # Errors
    ///
    /// Returns `ListError::TypeMismatch` if the value is not a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Result<&T, ListError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(&self.identity))
    }

    /// Get a mutable reference to the contained value if it is of type T
    ///
    /// # Errors
    ///
    /// Returns `ListError::TypeMismatch` if the value is not a `T`.
    pub fn downcast_mut<T: 'static>(&mut self) -> Result<&mut T, ListError> {
        let identity = &self.identity;
        self.value
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(identity))
    }

    /// Runs `f` with read access to the contained value
    ///
    /// Useful for values that don't implement `Clone`, such as boxed closures.
    ///
    /// # Errors
    ///
    /// Returns `ListError::TypeMismatch` if the value is not a `T`.
    pub fn with<T: 'static, F, R>(&self, f: F) -> Result<R, ListError>
    where
        F: FnOnce(&T) -> R,
    {
        self.downcast_ref::<T>().map(f)
    }

    /// Runs `f` with write access to the contained value
    ///
    /// # Errors
    ///
    /// Returns `ListError::TypeMismatch` if the value is not a `T`.
    pub fn with_mut<T: 'static, F, R>(&mut self, f: F) -> Result<R, ListError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.downcast_mut::<T>().map(f)
    }

    /// Consumes the envelope and returns the contained value
    ///
    /// On a type mismatch the envelope is handed back unchanged.
    pub fn into_inner<T: 'static>(self) -> Result<T, Self> {
        let Self { identity, value } = self;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self { identity, value }),
        }
    }
}

fn mismatch<T: 'static>(actual: &TypeIdentity) -> ListError {
    let requested = TypeIdentity::of::<T>();
    debug!(requested = %requested, actual = %actual, "rejected typed access");
    ListError::TypeMismatch {
        requested,
        actual: actual.clone(),
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("identity", &self.identity.name())
            .finish_non_exhaustive()
    }
}
