use std::sync::Arc;

use ddinject_core::{ContainerError, Dependencies};

use super::factories::KeyGenerator;
use super::{container_with, transcript};
use crate::transcript::Transcript;

pub struct Person {
    id: String,
    name: String,
}

impl Person {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builds any number of [`Person`] values once its dependencies are resolved
pub struct PersonFactory {
    key_generator: Arc<KeyGenerator>,
}

impl PersonFactory {
    fn provide(deps: &Dependencies) -> Result<Self, ContainerError> {
        let key_generator = deps.get::<KeyGenerator>("keyGenerator")?;
        transcript(deps)?.write("✓ PersonFactory has been called");
        Ok(Self { key_generator })
    }

    pub fn create(&self, name: &str) -> Person {
        Person {
            id: format!("person_{}", self.key_generator.next()),
            name: name.to_string(),
        }
    }
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container
        .add("Person", PersonFactory::provide)?
        .add("keyGenerator", KeyGenerator::provide)?;

    container.consume(|deps| -> Result<(), ContainerError> {
        let people = deps.get::<PersonFactory>("Person")?;
        for name in ["Peter", "Mary"] {
            let person = people.create(name);
            transcript.write(format!("❯ {{ name: {}, id: {} }}", person.name(), person.id()));
            transcript.write(format!("☺ My name is {}", person.name()));
        }
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_shares_key_generator() {
        let transcript = Transcript::new();
        run(&transcript).unwrap();

        assert_eq!(
            transcript.lines(),
            vec![
                "✓ KeyGenerator provider has been called",
                "✓ PersonFactory has been called",
                "❯ { name: Peter, id: person_1 }",
                "☺ My name is Peter",
                "❯ { name: Mary, id: person_2 }",
                "☺ My name is Mary",
            ]
        );
    }
}
