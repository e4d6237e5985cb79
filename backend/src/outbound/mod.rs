//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local record store backing the data access port.

pub mod memory;
