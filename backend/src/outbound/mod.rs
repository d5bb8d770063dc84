//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local workout store guarded by a read/write lock.
//!
//! Adapters translate between domain types and their backing representation
//! and contain no business logic.

pub mod memory;
