//! # sovran-typelist
//!
//! An ordered, type-safe heterogeneous list.
//!
//! `sovran-typelist` stores values of different types in a single ordered
//! list while keeping enough type information to hand each value back safely.
//! The shape of a list, the type at each position, can be captured as a
//! [`Specification`] and compared against an expected one.
//!
//! ## Key Features
//!
//! - **Type-safe**: Values are checked at runtime and a wrong type is an `Err`, never a bad value
//! - **Ordered**: Append, insert, replace and remove by position
//! - **Self-describing**: Every value carries a [`TypeIdentity`] with a readable name
//! - **Checkable**: Derive a [`Specification`] from a list and match it against a hand-written one
//! - **No macros**: Pure runtime solution built on `std::any`
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_typelist::{HeterogeneousList, ListError};
//!
//! fn main() -> Result<(), ListError> {
//!     let mut list = HeterogeneousList::new();
//!
//!     // Store values of different types
//!     list.append(42i32);
//!     list.append("Hello, world!".to_string());
//!     list.append(vec![1, 2, 3, 4, 5]);
//!
//!     // Retrieve values in a type-safe way
//!     let num = list.get::<i32>(0)?;
//!     let text = list.at(1)?.retrieve::<String>()?;
//!
//!     println!("Number: {}", num);
//!     println!("Text: {}", text);
//!
//!     // Handle errors properly
//!     match list.get::<bool>(2) {
//!         Ok(value) => println!("Value: {}", value),
//!         Err(ListError::TypeMismatch { requested, actual }) => {
//!             println!("Asked for {} but found {}", requested, actual)
//!         }
//!         Err(e) => println!("Other error: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Inspecting Types
//!
//! ```rust
//! use sovran_typelist::{HeterogeneousList, ListError};
//!
//! let mut list = HeterogeneousList::new();
//! list.append(7u64);
//! list.append(vec!["paco".to_string(), "list".to_string()]);
//!
//! for (index, envelope) in list.iter().enumerate() {
//!     if envelope.is::<u64>() {
//!         println!("{}: a number, {}", index, envelope.retrieve::<u64>()?);
//!     } else if envelope.identity().is::<Vec<String>>() {
//!         envelope.with(|words: &Vec<String>| println!("{}: {} words", index, words.len()))?;
//!     }
//! }
//! # Ok::<(), ListError>(())
//! ```
//!
//! ### Storing Callables
//!
//! Values that don't implement `Clone` are reached through `with` or
//! `downcast_ref` instead of `retrieve`.
//!
//! ```rust
//! use sovran_typelist::{HeterogeneousList, ListError};
//!
//! type Callback = Box<dyn Fn(i32, f64) -> String>;
//!
//! let mut list = HeterogeneousList::new();
//! let callback: Callback = Box::new(|x, y| format!("x: '{}' y: '{}'", x, y));
//! list.append(callback);
//!
//! let line = list.with(0, |f: &Callback| f(42, 49.999))?;
//! assert_eq!(line, "x: '42' y: '49.999'");
//! # Ok::<(), ListError>(())
//! ```
//!
//! ### Validating Against a Specification
//!
//! ```rust
//! use sovran_typelist::{HeterogeneousList, ListError, Specification};
//!
//! let mut expected = Specification::new();
//! expected.append_described::<String>("host");
//! expected.append_described::<u16>("port");
//!
//! let mut list = HeterogeneousList::new();
//! list.append("localhost".to_string());
//! list.append(8080u32);
//!
//! match list.conforms_to(&expected) {
//!     Ok(()) => println!("list matches"),
//!     Err(ListError::EntryMismatch { index, expected, actual }) => {
//!         assert_eq!(index, 1);
//!         assert_eq!(expected.description(), Some("port"));
//!         println!("at {}: expected {} but found {}", index, expected, actual);
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Threading
//!
//! Stored values are not required to be `Send` or `Sync`, so neither is the
//! list. Wrap it in a `Mutex` of your own if it must be shared.

mod envelope;
mod error;
mod identity;
mod list;
mod specification;

pub use envelope::Envelope;
pub use error::ListError;
pub use identity::{identity_of, TypeIdentity};
pub use list::HeterogeneousList;
pub use specification::Specification;

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
