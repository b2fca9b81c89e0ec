//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ScopedStore, Terminal)
//! but are themselves concrete structs, not traits.

mod dispatcher;
mod session;

pub use dispatcher::{Dispatcher, Outcome};
pub use session::{Session, PARSE_WARNING};
