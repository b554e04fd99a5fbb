// --- File: crates/inkslot_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities


pub use error::{config_error, InkslotError};

pub use http::client::{create_backend_client, DEFAULT_TIMEOUT_SECS};

pub use logging::{init_from_config, init_with_level, log_result};
