//! Event plumbing: the `Event` contract, a transport-agnostic pub/sub bus,
//! and the feedback signals the inventory emits to the outside world.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod signal;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use signal::Signal;
