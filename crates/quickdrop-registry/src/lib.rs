//! In-memory link registry with time-based expiry.
//!
//! The registry is the single source of truth shared by request handlers and
//! the background janitor. It maps short random identifiers to file records
//! and evicts entries once they outlive the configured TTL.

mod id;
mod janitor;
mod registry;

pub use id::generate_link_id;
pub use janitor::Janitor;
pub use registry::LinkRegistry;
