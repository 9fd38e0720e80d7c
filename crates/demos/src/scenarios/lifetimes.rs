use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ddinject_core::{Container, ContainerError, Dependencies, Lifetime};

use super::{container_with, transcript};
use crate::transcript::Transcript;

/// Log that numbers its own lines
struct Log {
    transcript: Arc<Transcript>,
    lines: AtomicUsize,
}

impl Log {
    fn new(transcript: Arc<Transcript>) -> Self {
        Self {
            transcript,
            lines: AtomicUsize::new(0),
        }
    }

    fn provide(deps: &Dependencies) -> Result<Self, ContainerError> {
        Ok(Self::new(transcript(deps)?))
    }

    fn write(&self, text: &str) {
        let line = self.lines.fetch_add(1, Ordering::SeqCst) + 1;
        self.transcript.write(format!("[☛{}] {}", line, text));
    }

    fn lines_count(&self) -> usize {
        self.lines.load(Ordering::SeqCst)
    }
}

fn register_log(container: &mut Container, transcript: &Transcript, lifetime: Lifetime) -> Result<(), ContainerError> {
    match lifetime {
        Lifetime::Singleton => container.add_singleton("log", Log::provide)?,
        Lifetime::Transient => container.add_transient("log", Log::provide)?,
        Lifetime::Value => container.add_value("log", Log::new(Arc::new(transcript.clone())))?,
    };
    Ok(())
}

/// Write four lines through separately resolved `log` instances
fn walkthrough(transcript: &Transcript, lifetime: Lifetime) -> Result<usize, ContainerError> {
    let mut container = container_with(transcript)?;
    register_log(&mut container, transcript, lifetime)?;
    transcript.write(format!("log registered as {}", lifetime));

    container.consume(|deps| deps.get::<Log>("log").map(|log| log.write("first consume")))?;
    container.consume(|deps| deps.get::<Log>("log").map(|log| log.write("second consume")))?;
    container.resolve::<Log>("log")?.write("first resolve");

    let log = container.resolve::<Log>("log")?;
    log.write("second resolve");
    transcript.write(format!("❯ Total logged lines has been {}", log.lines_count()));
    Ok(log.lines_count())
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    for lifetime in [Lifetime::Singleton, Lifetime::Transient, Lifetime::Value] {
        walkthrough(transcript, lifetime)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_log_keeps_counting() {
        let transcript = Transcript::new();
        assert_eq!(walkthrough(&transcript, Lifetime::Singleton).unwrap(), 4);
        assert!(transcript.lines().iter().any(|l| l == "[☛4] second resolve"));
    }

    #[test]
    fn test_value_log_behaves_like_singleton() {
        let transcript = Transcript::new();
        assert_eq!(walkthrough(&transcript, Lifetime::Value).unwrap(), 4);
    }

    #[test]
    fn test_transient_log_restarts_every_time() {
        let transcript = Transcript::new();
        assert_eq!(walkthrough(&transcript, Lifetime::Transient).unwrap(), 1);

        let numbered: Vec<String> = transcript
            .lines()
            .into_iter()
            .filter(|l| l.starts_with("[☛"))
            .collect();
        assert_eq!(numbered.len(), 4);
        assert!(numbered.iter().all(|l| l.starts_with("[☛1]")));
    }
}
