//! Shared test mocks and utilities for the Confreview paper review platform.

mod clock;
mod directory;
mod repository;

pub use clock::FixedClock;
pub use directory::StaticUserDirectory;
pub use repository::{
    EmptyEventRepository, FailingEventRepository, InMemoryEventRepository,
    RecordingEventRepository,
};
