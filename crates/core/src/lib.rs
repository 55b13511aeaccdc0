//! Rule-driven automatic savings engine.
//!
//! This crate is the database-agnostic core of the nestegg application:
//! domain models, repository traits, and the services that decide when and
//! how much to move toward each savings goal. Persistence lives behind the
//! repository traits (see `nestegg-storage-sqlite` for the SQLite
//! implementation); the host application wires the services together and
//! drives them from its own triggers (income events, periodic ticks).

pub mod analytics;
pub mod contributions;
pub mod errors;
pub mod events;
pub mod goals;
pub mod milestones;
pub mod rules;
pub mod scheduler;

pub use errors::{Error, Result};
