use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ddinject_core::{ContainerError, Dependencies};

use super::{container_with, transcript};
use crate::transcript::Transcript;

#[derive(Default)]
struct Counter {
    value: AtomicUsize,
}

impl Counter {
    fn next(&self) -> usize {
        self.value.fetch_add(1, Ordering::SeqCst)
    }
}

struct EvenNumbers {
    counter: Arc<Counter>,
}

impl EvenNumbers {
    fn next(&self) -> usize {
        self.counter.next() * 2
    }
}

struct OddNumbers {
    counter: Arc<Counter>,
}

impl OddNumbers {
    fn next(&self) -> usize {
        1 + self.counter.next() * 2
    }
}

fn provide_counter(deps: &Dependencies) -> Result<Counter, ContainerError> {
    transcript(deps)?.write("✓ Counter has been instantiated");
    Ok(Counter::default())
}

fn provide_even(deps: &Dependencies) -> Result<EvenNumbers, ContainerError> {
    let counter = deps.get::<Counter>("counter")?;
    transcript(deps)?.write("✓ EvenNumbers has been instantiated");
    Ok(EvenNumbers { counter })
}

fn provide_odd(deps: &Dependencies) -> Result<OddNumbers, ContainerError> {
    let counter = deps.get::<Counter>("counter")?;
    transcript(deps)?.write("✓ OddNumbers has been instantiated");
    Ok(OddNumbers { counter })
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container
        .add_transient("counter", provide_counter)?
        .add("evenNumbers", provide_even)?
        .add("oddNumbers", provide_odd)?;

    // Each generator owns a separate transient counter
    container.consume(|deps| -> Result<(), ContainerError> {
        let even = deps.get::<EvenNumbers>("evenNumbers")?;
        let odd = deps.get::<OddNumbers>("oddNumbers")?;
        transcript.write(format!(
            "First 3 even numbers are: {} {} {}",
            even.next(),
            even.next(),
            even.next()
        ));
        transcript.write(format!(
            "First 3 odd numbers are: {} {} {}",
            odd.next(),
            odd.next(),
            odd.next()
        ));
        Ok(())
    })?;

    let fourth = container.resolve::<EvenNumbers>("evenNumbers")?.next();
    transcript.write(format!("Fourth even number is {}", fourth));

    let fifth = container.consume(|deps| deps.get::<EvenNumbers>("evenNumbers").map(|even| even.next()))?;
    transcript.write(format!("Fifth even number is {}", fifth));

    // consume hands back whatever the consumer returns, so it doubles as resolve
    let even = container.consume(|deps| deps.get::<EvenNumbers>("evenNumbers"))?;
    transcript.write(format!("Sixth even number is {}", even.next()));
    Ok(())
}
