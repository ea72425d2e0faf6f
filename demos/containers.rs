use sovran_typelist::{HeterogeneousList, ListError, Specification};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

type Callback = Box<dyn Fn(i32, f64)>;
type SharedVec = Rc<RefCell<Vec<i32>>>;

fn fill(list: &mut HeterogeneousList) {
    let words = ["paco", "template", "library", "is", "amazing", "."];

    list.append(vec![42, 1999]);
    list.append(words.iter().map(|w| w.to_string()).collect::<Vec<String>>());
    list.append::<SharedVec>(Rc::new(RefCell::new(vec![0; 50])));
    list.append(42i32);

    let callback: Callback = Box::new(|x, y| println!("x: '{}' y: '{}'", x, y));
    list.append(callback);
}

fn main() -> Result<(), ListError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut list = HeterogeneousList::new();
    fill(&mut list);

    // Print the shape of the list
    let spec = list.get_specification();
    println!("Specification: {}", spec);
    for identity in &spec {
        println!("  {}", identity);
    }
    println!();

    println!("Extracting data from elements");
    for (index, envelope) in list.iter().enumerate() {
        println!("At index {} there is a {}", index, envelope.identity());

        if envelope.is::<Vec<i32>>() {
            for n in envelope.retrieve::<Vec<i32>>()? {
                println!("  '{}'", n);
            }
        }

        if envelope.identity().is::<Vec<String>>() {
            envelope.with(|words: &Vec<String>| {
                for word in words {
                    println!("  '{}'", word);
                }
            })?;
        }

        if envelope.is::<SharedVec>() {
            let shared = envelope.retrieve::<SharedVec>()?;
            println!("  shared vector with {} elements", shared.borrow().len());
        }

        if envelope.is::<i32>() {
            println!("  int value: '{}'", envelope.retrieve::<i32>()?);
        }

        if envelope.is::<Callback>() {
            envelope.with(|callback: &Callback| callback(42, 49.999))?;
        }

        // Asking for the wrong type is an error, not a crash
        if let Err(e) = envelope.retrieve::<Vec<f64>>() {
            println!("  {}", e);
        }
        println!();
    }

    // Check the list against what we expect it to hold
    let mut expected = Specification::new();
    expected.append_described::<Vec<i32>>("numbers");
    expected.append_described::<Vec<String>>("words");
    expected.append_described::<SharedVec>("scratch buffer");
    expected.append_described::<i32>("answer");
    expected.append_described::<Callback>("printer");

    match list.conforms_to(&expected) {
        Ok(()) => println!("List matches {}", expected),
        Err(e) => println!("List doesn't match: {}", e),
    }

    Ok(())
}
