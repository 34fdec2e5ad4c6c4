pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::serve;
pub use wiring::{wire_api, wire_client, wire_client_deps, ClientHandles, WiringError};
