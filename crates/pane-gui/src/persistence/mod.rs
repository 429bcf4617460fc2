//! Persistence module for layout serialization
//!
//! Provides snapshot export/import of window geometry and state.

mod snapshot;

pub use snapshot::{LayoutSnapshot, PersistedWindow};
