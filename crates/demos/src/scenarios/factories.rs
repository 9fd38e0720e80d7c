use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ddinject_core::{ContainerError, Dependencies};

use super::{container_with, transcript};
use crate::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: String,
    pub color: String,
}

/// Hands out increasing string keys starting at "1"
#[derive(Default)]
pub struct KeyGenerator {
    last_id: AtomicUsize,
}

impl KeyGenerator {
    pub fn provide(deps: &Dependencies) -> Result<Self, ContainerError> {
        transcript(deps)?.write("✓ KeyGenerator provider has been called");
        Ok(Self::default())
    }

    pub fn next(&self) -> String {
        (self.last_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

/// Provider written as a plain struct with a constructor
struct CarsProviderStruct {
    key_generator: Arc<KeyGenerator>,
}

impl CarsProviderStruct {
    fn new(deps: &Dependencies) -> Result<Self, ContainerError> {
        let key_generator = deps.get::<KeyGenerator>("keyGenerator")?;
        transcript(deps)?.write("✓ CarsProviderStruct has been instantiated");
        Ok(Self { key_generator })
    }

    fn create_car(&self, color: &str) -> Car {
        Car {
            id: self.key_generator.next(),
            color: color.to_string(),
        }
    }
}

type CreateCar = Box<dyn Fn(&str) -> Car + Send + Sync>;

/// Provider written as a factory returning a closure over its dependencies
struct CarsProvider {
    create_car: CreateCar,
}

fn cars_provider(deps: &Dependencies) -> Result<CarsProvider, ContainerError> {
    let key_generator = deps.get::<KeyGenerator>("keyGenerator")?;
    transcript(deps)?.write("✓ CarsProvider has been called");

    Ok(CarsProvider {
        create_car: Box::new(move |color| Car {
            id: key_generator.next(),
            color: color.to_string(),
        }),
    })
}

pub fn run(transcript: &Transcript) -> anyhow::Result<()> {
    let mut container = container_with(transcript)?;
    container
        .add("carsProvider", cars_provider)?
        .add("keyGenerator", KeyGenerator::provide)?;

    let cars = container.consume(|deps| {
        deps.get::<CarsProvider>("carsProvider")
            .map(|provider| vec![(provider.create_car)("red"), (provider.create_car)("yellow")])
    })?;
    for car in cars {
        transcript.write(format!("❯ {:?}", car));
    }

    let mut container = container_with(transcript)?;
    container
        .add("carsProvider", CarsProviderStruct::new)?
        .add("keyGenerator", KeyGenerator::provide)?;

    let cars = container.consume(|deps| {
        deps.get::<CarsProviderStruct>("carsProvider")
            .map(|provider| vec![provider.create_car("red"), provider.create_car("yellow")])
    })?;
    for car in cars {
        transcript.write(format!("❯ {:?}", car));
    }
    Ok(())
}
