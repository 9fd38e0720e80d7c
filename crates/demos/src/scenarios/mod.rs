//! Walkthroughs of the container, one per scenario.
//!
//! Every walkthrough registers a [`Transcript`] under the name `transcript`
//! and writes its output there instead of printing directly.

use clap::ValueEnum;
use ddinject_core::{Container, ContainerError, Dependencies};

use crate::transcript::Transcript;

pub mod a_and_b;
pub mod circular;
pub mod counters;
pub mod factories;
pub mod lifetimes;
pub mod presolved;
pub mod simple;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Logger depending on a writer
    Simple,
    /// Greeter depending on a speaker
    AAndB,
    /// Line-numbered log registered with each lifetime
    SingletonVsTransient,
    /// Even and odd generators with their own transient counter
    Transient,
    /// Self and mutual dependencies
    Circular,
    /// Struct and closure based providers
    Factories,
    /// Factory closing over already resolved dependencies
    Presolved,
    /// Every scenario in order
    All,
}

impl Scenario {
    const ALL: [Scenario; 7] = [
        Scenario::Simple,
        Scenario::AAndB,
        Scenario::SingletonVsTransient,
        Scenario::Transient,
        Scenario::Circular,
        Scenario::Factories,
        Scenario::Presolved,
    ];

    /// The concrete scenarios this selection stands for
    pub fn expand(self) -> Vec<Scenario> {
        match self {
            Scenario::All => Self::ALL.to_vec(),
            other => vec![other],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Simple => "simple",
            Scenario::AAndB => "a and b",
            Scenario::SingletonVsTransient => "singleton vs transient",
            Scenario::Transient => "transient",
            Scenario::Circular => "circular dependency",
            Scenario::Factories => "struct vs closure factories",
            Scenario::Presolved => "presolved factory",
            Scenario::All => "all",
        }
    }
}

/// Run one concrete scenario, writing its output to `transcript`
pub fn run(scenario: Scenario, transcript: &Transcript) -> anyhow::Result<()> {
    tracing::info!("Running scenario '{}'", scenario.title());
    match scenario {
        Scenario::Simple => simple::run(transcript),
        Scenario::AAndB => a_and_b::run(transcript),
        Scenario::SingletonVsTransient => lifetimes::run(transcript),
        Scenario::Transient => counters::run(transcript),
        Scenario::Circular => circular::run(transcript),
        Scenario::Factories => factories::run(transcript),
        Scenario::Presolved => presolved::run(transcript),
        Scenario::All => {
            for scenario in Scenario::ALL {
                run(scenario, transcript)?;
            }
            Ok(())
        }
    }
}

/// Container with `transcript` already registered
fn container_with(transcript: &Transcript) -> Result<Container, ContainerError> {
    let mut container = Container::new();
    container.add_value("transcript", transcript.clone())?;
    Ok(container)
}

/// Shortcut for providers that want to report something
fn transcript(deps: &Dependencies) -> Result<std::sync::Arc<Transcript>, ContainerError> {
    deps.get::<Transcript>("transcript")
}
