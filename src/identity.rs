use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The runtime identity of a Rust type
///
/// Equality and hashing use the type's `TypeId` only. The canonical name is a
/// readable rendering of `std::any::type_name` meant for diagnostics, and the
/// optional description is free text attached when authoring a
/// [`Specification`](crate::Specification). Neither takes part in comparisons.
///
/// # Examples
///
/// ```
/// use sovran_typelist::{identity_of, TypeIdentity};
///
/// let id = identity_of::<Vec<String>>();
/// assert_eq!(id.name(), "Vec<String>");
/// assert!(id.is::<Vec<String>>());
/// assert_ne!(id, TypeIdentity::of::<Vec<i32>>());
/// ```
#[derive(Clone)]
pub struct TypeIdentity {
    type_id: TypeId,
    raw_name: &'static str,
    name: String,
    description: Option<String>,
}

impl TypeIdentity {
    /// Returns the identity of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        let raw_name = type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            raw_name,
            name: canonicalize(raw_name),
            description: None,
        }
    }

    /// Attaches a description, replacing any previous one
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The canonical type name, e.g. `Vec<String>` or `my_crate::Config`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name exactly as reported by `std::any::type_name`
    pub fn raw_name(&self) -> &'static str {
        self.raw_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Checks if this identity names the same type as `other`
    pub fn equals(&self, other: &TypeIdentity) -> bool {
        self.type_id == other.type_id
    }

    /// Checks if this identity names the type `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// A name for `self` that reads differently from `other`'s
    ///
    /// Falls back to the raw name, then to the raw name plus the `TypeId`,
    /// when two distinct types would otherwise print the same.
    pub(crate) fn name_against(&self, other: &TypeIdentity) -> Cow<'_, str> {
        if self.equals(other) || self.name != other.name {
            Cow::Borrowed(&self.name)
        } else if self.raw_name != other.raw_name {
            Cow::Borrowed(self.raw_name)
        } else {
            Cow::Owned(format!("{} ({:?})", self.raw_name, self.type_id))
        }
    }
}

/// Returns the identity of `T`
///
/// Shorthand for [`TypeIdentity::of`].
pub fn identity_of<T: ?Sized + 'static>() -> TypeIdentity {
    TypeIdentity::of::<T>()
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeIdentity")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Turns a raw `type_name` into its canonical form.
///
/// Whitespace is removed unless it separates two identifiers, the default
/// allocator argument is dropped, and paths into `core`, `alloc` and `std`
/// are cut down to their last segment. Paths into any other crate are kept
/// whole so that same-named types from different modules stay apart. Falls
/// back to `raw` when the result is empty or unbalanced.
pub(crate) fn canonicalize(raw: &str) -> String {
    let name = strip_std_paths(&drop_allocator_args(&collapse_whitespace(raw)));
    if name.is_empty() || !is_balanced(&name) {
        raw.to_string()
    } else {
        name
    }
}

const STD_CRATES: [&str; 3] = ["core", "alloc", "std"];

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn strip_std_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut path_start = 0;
    let mut in_ident = false;
    let mut after_separator = false;
    let mut at_root = false;
    let mut std_path = false;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            if in_ident && at_root {
                std_path = STD_CRATES.contains(&&out[path_start..]);
            }
            if in_ident && std_path {
                out.truncate(path_start);
            } else {
                out.push_str("::");
            }
            // qualified paths such as `<T as Trait>::Assoc` start over
            after_separator = in_ident;
            in_ident = false;
            continue;
        }

        if is_ident_char(c) {
            if !in_ident {
                at_root = !after_separator;
                if at_root {
                    path_start = out.len();
                    std_path = false;
                }
            }
            in_ident = true;
        } else {
            in_ident = false;
        }
        after_separator = false;
        out.push(c);
    }
    out
}

fn collapse_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        let after_ident = out.chars().next_back().is_some_and(is_ident_char);
        if pending_space && is_ident_char(c) && after_ident {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

fn drop_allocator_args(name: &str) -> String {
    name.replace(",alloc::alloc::Global>", ">")
}

fn is_balanced(name: &str) -> bool {
    let mut open = Vec::new();
    let mut prev = '\0';

    for c in name.chars() {
        match c {
            '<' | '(' | '[' | '{' => open.push(c),
            // `->` in fn signatures
            '>' if prev == '-' => {}
            '>' | ')' | ']' | '}' => {
                let expected = match c {
                    '>' => '<',
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if open.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
        prev = c;
    }
    open.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;

    fn hash_of(id: &TypeIdentity) -> u64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_identity_is_stable() {
        let first = identity_of::<Vec<String>>();
        let second = identity_of::<Vec<String>>();

        assert_eq!(first, second);
        assert_eq!(first.name(), second.name());
        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_distinct_types_differ() {
        assert_ne!(identity_of::<i32>(), identity_of::<Vec<i32>>());
        assert_ne!(identity_of::<i32>(), identity_of::<i64>());
        assert_ne!(identity_of::<String>(), identity_of::<&'static str>());
        assert!(!identity_of::<u8>().equals(&identity_of::<i8>()));
    }

    #[test]
    fn test_is_compares_against_type() {
        let id = identity_of::<HashMap<String, i32>>();
        assert!(id.is::<HashMap<String, i32>>());
        assert!(!id.is::<HashMap<String, i64>>());
    }

    #[test]
    fn test_description_ignored_by_equality() {
        let plain = identity_of::<i32>();
        let described = identity_of::<i32>().with_description("answer");

        assert_eq!(plain, described);
        assert_eq!(hash_of(&plain), hash_of(&described));
        assert_eq!(described.description(), Some("answer"));
        assert_eq!(described.without_description().description(), None);
    }

    #[test]
    fn test_common_names() {
        assert_eq!(identity_of::<i32>().name(), "i32");
        assert_eq!(identity_of::<String>().name(), "String");
        assert_eq!(identity_of::<Vec<i32>>().name(), "Vec<i32>");
        assert_eq!(identity_of::<Option<String>>().name(), "Option<String>");
        assert_eq!(identity_of::<str>().name(), "str");
        assert_eq!(identity_of::<i32>().to_string(), "i32");
    }

    #[test]
    fn test_canonicalize_strips_paths() {
        assert_eq!(canonicalize("alloc::vec::Vec<alloc::string::String>"), "Vec<String>");
        assert_eq!(
            canonicalize("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String,i32>"
        );
        assert_eq!(canonicalize("(i32, alloc::string::String)"), "(i32,String)");
    }

    #[test]
    fn test_canonicalize_keeps_needed_spaces() {
        assert_eq!(
            canonicalize("alloc::boxed::Box<dyn core::ops::function::Fn(i32, f64)>"),
            "Box<dyn Fn(i32,f64)>"
        );
        assert_eq!(canonicalize("*const u8"), "*const u8");
        assert_eq!(canonicalize("&'static str"), "&'static str");
        assert_eq!(canonicalize("&mut  u8"), "&mut u8");
        assert_eq!(canonicalize("&mut [u8]"), "&mut[u8]");
    }

    #[test]
    fn test_canonicalize_handles_return_arrows() {
        assert_eq!(
            canonicalize("dyn core::ops::function::Fn(i32) -> alloc::string::String"),
            "dyn Fn(i32)->String"
        );
    }

    #[test]
    fn test_canonicalize_drops_allocator() {
        assert_eq!(canonicalize("alloc::vec::Vec<i32, alloc::alloc::Global>"), "Vec<i32>");
        assert_eq!(
            canonicalize(
                "alloc::vec::Vec<alloc::vec::Vec<u8, alloc::alloc::Global>, alloc::alloc::Global>"
            ),
            "Vec<Vec<u8>>"
        );
    }

    #[test]
    fn test_canonicalize_keeps_user_type_named_global() {
        assert_eq!(
            canonicalize("std::collections::hash::map::HashMap<alloc::string::String, c::Global>"),
            "HashMap<String,c::Global>"
        );
        assert_eq!(
            canonicalize("alloc::vec::Vec<app::Global>"),
            "Vec<app::Global>"
        );
    }

    #[test]
    fn test_canonicalize_keeps_user_paths() {
        assert_eq!(canonicalize("app::config::Config"), "app::config::Config");
        assert_eq!(
            canonicalize("alloc::vec::Vec<app::a::Config>"),
            "Vec<app::a::Config>"
        );
        assert_eq!(
            canonicalize("app::main::{{closure}}"),
            "app::main::{{closure}}"
        );
        assert_eq!(
            canonicalize("<app::Widget as core::default::Default>::Output"),
            "<app::Widget as Default>::Output"
        );
    }

    mod a {
        pub struct Config;
    }

    mod b {
        pub struct Config;
    }

    #[test]
    fn test_same_named_types_stay_apart() {
        let first = identity_of::<a::Config>();
        let second = identity_of::<b::Config>();

        assert_ne!(first, second);
        assert_eq!(first.name(), "sovran_typelist::identity::tests::a::Config");
        assert_eq!(second.name(), "sovran_typelist::identity::tests::b::Config");
    }

    #[test]
    fn test_name_against() {
        let int = identity_of::<i32>();
        let text = identity_of::<String>();
        assert_eq!(int.name_against(&text), "i32");
        assert_eq!(int.name_against(&int), "i32");

        // Two closures from one function share their raw name
        let first = identity_of_val(&|| 1);
        let second = identity_of_val(&|| 2);
        assert_eq!(first.raw_name(), second.raw_name());
        assert_ne!(first.name_against(&second), second.name_against(&first));
    }

    fn identity_of_val<T: 'static>(_: &T) -> TypeIdentity {
        identity_of::<T>()
    }

    #[test]
    fn test_canonicalize_falls_back_to_raw() {
        assert_eq!(canonicalize("broken::Vec<i32"), "broken::Vec<i32");
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   "), "   ");
    }
}
