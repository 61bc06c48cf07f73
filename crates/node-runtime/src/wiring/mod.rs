//! Background tasks wired around the registry.

pub mod event_logger;

pub use event_logger::spawn_event_logger;
