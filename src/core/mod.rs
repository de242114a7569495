//! Core module - states, events, timing primitives, ports and data loading.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod layers;
mod plugin;
mod ports;
mod sensing;
mod states;
mod timer;

pub use data::*;
pub use error::*;
pub use events::*;
pub use layers::*;
pub use plugin::CorePlugin;
pub use ports::*;
pub use sensing::RapierAreaSensor;
pub use states::*;
pub use timer::*;
