use pretty_assertions::assert_eq;
use sovran_typelist::{identity_of, HeterogeneousList, ListError, Specification};
use std::rc::Rc;

type Handler = Box<dyn Fn(&str) -> usize>;

fn request_contract() -> Specification {
    let mut spec = Specification::new();
    spec.append_described::<String>("method");
    spec.append_described::<Vec<String>>("headers");
    spec.append_described::<Handler>("handler");
    spec
}

fn request_list() -> HeterogeneousList {
    let handler: Handler = Box::new(|body: &str| body.len());
    let mut list = HeterogeneousList::new();
    list.append("GET".to_string());
    list.append(vec!["accept: */*".to_string()]);
    list.append(handler);
    list
}

#[test]
fn test_identity_stability() {
    assert_eq!(identity_of::<i32>(), identity_of::<i32>());
    assert_eq!(identity_of::<i32>().name(), identity_of::<i32>().name());
    assert_ne!(identity_of::<i32>(), identity_of::<Vec<i32>>());
    assert_ne!(identity_of::<Rc<Vec<i32>>>(), identity_of::<Vec<i32>>());
}

#[test]
fn test_hand_written_contract_matches_list() -> Result<(), ListError> {
    let list = request_list();
    list.conforms_to(&request_contract())?;
    request_contract().matches(&list.get_specification())?;

    let handled = list.with(2, |h: &Handler| h("hello"))?;
    assert_eq!(handled, 5);
    Ok(())
}

#[test]
fn test_mismatch_keeps_description_for_diagnostics() {
    let mut list = request_list();
    list.replace(1, "accept: */*".to_string()).unwrap();

    let err = list.conforms_to(&request_contract()).unwrap_err();
    match &err {
        ListError::EntryMismatch {
            index,
            expected,
            actual,
        } => {
            assert_eq!(*index, 1);
            assert_eq!(expected, &identity_of::<Vec<String>>());
            assert_eq!(expected.description(), Some("headers"));
            assert_eq!(actual, &identity_of::<String>());
        }
        other => panic!("Expected EntryMismatch, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "specification mismatch at index 1: expected `Vec<String>`, found `String`"
    );
}

mod a {
    pub struct Config;
}

mod b {
    pub struct Config;
}

fn append_type_of<T: 'static>(_: &T, spec: &mut Specification) {
    spec.append::<T>();
}

#[test]
fn test_same_named_types_are_told_apart() {
    let mut list = HeterogeneousList::new();
    list.append(b::Config);
    let mut spec = Specification::new();
    spec.append::<a::Config>();

    let err = list.conforms_to(&spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        "specification mismatch at index 0: expected `specification_tests::a::Config`, \
         found `specification_tests::b::Config`"
    );
}

#[test]
fn test_closures_from_one_function_are_told_apart() {
    let first = || 1;
    let second = || 2;
    let mut list = HeterogeneousList::new();
    list.append(first);
    let mut spec = Specification::new();
    append_type_of(&second, &mut spec);

    let message = list.conforms_to(&spec).unwrap_err().to_string();
    let names: Vec<&str> = message.split('`').collect();
    assert_eq!(names.len(), 5, "unexpected message {}", message);
    assert!(names[1].contains("{{closure}}"));
    assert_ne!(names[1], names[3]);
}

#[test]
fn test_missing_and_unexpected_entries() {
    let mut list = request_list();
    list.remove_at(2).unwrap();
    assert_eq!(
        list.conforms_to(&request_contract()),
        Err(ListError::MissingEntry {
            index: 2,
            expected: identity_of::<Handler>(),
        })
    );

    let mut list = request_list();
    list.append(0u8);
    assert_eq!(
        list.conforms_to(&request_contract()),
        Err(ListError::UnexpectedEntry {
            index: 3,
            actual: identity_of::<u8>(),
        })
    );
}

#[test]
fn test_snapshot_is_independent_of_list() -> Result<(), ListError> {
    let mut list = request_list();
    let before = list.get_specification();

    list.clear();
    list.append(1i32);

    assert_eq!(before.len(), 3);
    assert!(request_contract().is_match(&before));
    assert_eq!(list.get_specification().to_string(), "[i32]");
    Ok(())
}

#[test]
fn test_editing_a_specification() -> Result<(), ListError> {
    let mut spec = request_contract();
    spec.remove_at(2)?;
    spec.insert::<u16>(0)?;
    spec.insert_described::<bool>(3, "keep-alive")?;

    assert_eq!(
        spec.to_string(),
        r#"[u16, String "method", Vec<String> "headers", bool "keep-alive"]"#
    );
    assert_eq!(spec.at(0)?.description(), None);
    assert!(matches!(spec.at(4), Err(ListError::IndexOutOfRange { index: 4, len: 4 })));
    Ok(())
}

#[test]
fn test_unsized_types_in_specifications() -> Result<(), ListError> {
    let mut spec = Specification::new();
    spec.append::<str>();
    spec.append::<[u8]>();
    spec.append::<dyn Fn(i32)>();

    assert!(spec.at(0)?.is::<str>());
    assert!(spec.at(1)?.is::<[u8]>());
    assert!(spec.at(2)?.is::<dyn Fn(i32)>());
    assert_eq!(spec.at(2)?.name(), "dyn Fn(i32)");
    Ok(())
}
