use ddinject_core::{ContainerError, Dependencies};

use super::container_with;
use crate::transcript::Transcript;

fn provide_a(deps: &Dependencies) -> Result<(), ContainerError> {
    deps.get::<()>("a")?;
    Ok(())
}

fn provide_b(deps: &Dependencies) -> Result<(), ContainerError> {
    deps.get::<()>("c")?;
    Ok(())
}

fn provide_c(deps: &Dependencies) -> Result<(), ContainerError> {
    deps.get::<()>("b")?;
    Ok(())
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container
        .add("a", provide_a)?
        .add("b", provide_b)?
        .add("c", provide_c)?;

    for name in ["a", "b"] {
        match container.consume(|deps| deps.get::<()>(name)) {
            Ok(_) => anyhow::bail!("resolving '{}' should have failed", name),
            Err(err) => transcript.write(format!("Error consuming '{}': {}", name, err)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_are_reported() {
        let transcript = Transcript::new();
        run(&transcript).unwrap();

        assert_eq!(
            transcript.lines(),
            vec![
                "Error consuming 'a': Circular dependency when resolving 'a': a -> a",
                "Error consuming 'b': Circular dependency when resolving 'b': b -> c -> b",
            ]
        );
    }
}
