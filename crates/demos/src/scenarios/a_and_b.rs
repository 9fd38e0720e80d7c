use std::sync::Arc;

use ddinject_core::{ContainerError, Dependencies};

use super::{container_with, transcript};
use crate::transcript::Transcript;

struct A {
    b: Arc<B>,
}

impl A {
    fn greet(&self, name: &str) -> String {
        self.b.say(&format!("Hello {}", name))
    }
}

struct B;

impl B {
    fn say(&self, something: &str) -> String {
        format!("Say: \"{}\"", something)
    }
}

fn provide_a(deps: &Dependencies) -> Result<A, ContainerError> {
    let b = deps.get::<B>("b")?;
    transcript(deps)?.write("✓ A has been instantiated");
    Ok(A { b })
}

fn provide_b(deps: &Dependencies) -> Result<B, ContainerError> {
    transcript(deps)?.write("✓ B has been instantiated");
    Ok(B)
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container.add("a", provide_a)?.add("b", provide_b)?;

    // Nothing is instantiated until the consumer asks for `a`
    transcript.write("✓ Let's consume");
    let greeting = container.consume(|deps| deps.get::<A>("a").map(|a| a.greet("Anthony")))?;
    transcript.write(format!("❯ {}", greeting));
    Ok(())
}
