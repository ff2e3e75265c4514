//! Pafolio Services Library
//!
//! The pieces between the persistence collaborators and a user interface:
//! the portfolio orchestrator (owned list state with optimistic writes and
//! settle-based reconciliation), the gallery view-model builder, and the
//! upload intake state machine.

pub mod gallery;
pub mod intake;
pub mod portfolio;
pub mod settle;

// Re-export commonly used types
pub use gallery::{GalleryItem, GalleryView, ItemContent, ViewMode};
pub use intake::{IntakeError, IntakeSession, IntakeState, StagedFile};
pub use portfolio::{Portfolio, PortfolioError};
pub use settle::SettlePolicy;
