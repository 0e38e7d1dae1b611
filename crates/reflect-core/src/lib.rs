pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::ReflectConfig;
pub use error::{ReflectError, Result};
pub use events::EditorEvent;
pub use types::*;
