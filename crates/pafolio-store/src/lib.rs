//! Pafolio Store Library
//!
//! Persistence collaborators for upload records. The remote backend is a
//! spreadsheet web app reached over HTTP (an opaque external collaborator
//! with weak read-after-write consistency); the local backend is a JSON file
//! mirroring the same three operations. `FallbackStore` composes the two so
//! reads survive an unreachable or misconfigured remote.

pub mod factory;
pub mod fallback;
pub mod local;
pub mod sheet;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
pub use fallback::FallbackStore;
pub use local::LocalStore;
pub use sheet::SheetStore;
pub use traits::{StoreError, StoreResult, UploadStore};
