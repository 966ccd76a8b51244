//! Car registry core: the record type, the uniqueness-enforcing store, and the shared service.

mod record;
mod service;
mod store;
pub mod types;

pub use record::Record;
pub use service::{RegistryApi, RegistryService};
pub use store::Registry;
pub use types::{LookupQuery, RegistryError};
