use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use ddinject_core::{ContainerError, Dependencies};

use super::{container_with, transcript};
use crate::transcript::Transcript;

/// Writes raw lines to the transcript
pub struct Writer {
    transcript: Arc<Transcript>,
}

impl Writer {
    pub fn provide(deps: &Dependencies) -> Result<Self, ContainerError> {
        Ok(Self {
            transcript: transcript(deps)?,
        })
    }

    pub fn write(&self, text: &str) {
        self.transcript.write(text);
    }
}

/// Timestamped, line-numbered logger on top of a [`Writer`]
pub struct Logger {
    writer: Arc<Writer>,
    lines: AtomicUsize,
}

impl Logger {
    pub fn provide(deps: &Dependencies) -> Result<Self, ContainerError> {
        Ok(Self {
            writer: deps.get::<Writer>("writer")?,
            lines: AtomicUsize::new(0),
        })
    }

    pub fn log(&self, text: &str) {
        let line = self.lines.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.writer.write(&format!("[{}] [☛{}] {}", now, line, text));
    }
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container
        .add("logger", Logger::provide)?
        .add("writer", Writer::provide)?;

    container.consume(|deps| -> Result<(), ContainerError> {
        deps.get::<Logger>("logger")?.log("This has been logged");
        Ok(())
    })?;
    Ok(())
}
