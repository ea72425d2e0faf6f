use sovran_typelist::{HeterogeneousList, ListError, Specification};
use tracing_subscriber::EnvFilter;

fn connection_contract() -> Specification {
    let mut spec = Specification::new();
    spec.append_described::<String>("host");
    spec.append_described::<u16>("port");
    spec.append_described::<bool>("use tls");
    spec
}

fn check(label: &str, list: &HeterogeneousList, expected: &Specification) {
    match list.conforms_to(expected) {
        Ok(()) => println!("{}: ok {}", label, list.get_specification()),
        Err(ListError::EntryMismatch {
            index,
            expected,
            actual,
        }) => println!(
            "{}: position {} ({}) should be {} but is {}",
            label,
            index,
            expected.description().unwrap_or("unnamed"),
            expected,
            actual
        ),
        Err(ListError::MissingEntry { index, expected }) => println!(
            "{}: missing {} ({}) at position {}",
            label,
            expected,
            expected.description().unwrap_or("unnamed"),
            index
        ),
        Err(e) => println!("{}: {}", label, e),
    }
}

fn main() -> Result<(), ListError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let contract = connection_contract();
    println!("Contract: {}", contract);

    let mut list = HeterogeneousList::new();
    list.append("localhost".to_string());
    list.append(8080u32);
    check("first try", &list, &contract);

    // Fix the port type in place
    list.replace(1, 8080u16)?;
    check("second try", &list, &contract);

    list.append(true);
    check("third try", &list, &contract);

    list.append("extra".to_string());
    check("fourth try", &list, &contract);

    // Bad indices are reported, not ignored
    match list.remove_at(10) {
        Ok(()) => println!("This shouldn't happen"),
        Err(e) => println!("remove_at(10): {}", e),
    }
    list.remove_at(3)?;
    check("fifth try", &list, &contract);

    let port = list.get::<u16>(1)?;
    println!("Connecting to {}:{}", list.get::<String>(0)?, port);

    Ok(())
}
