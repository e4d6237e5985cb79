//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod data_access;

#[cfg(test)]
pub use data_access::MockDataAccessService;
pub use data_access::{DataAccessError, DataAccessService};
