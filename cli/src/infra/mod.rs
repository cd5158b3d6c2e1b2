//! Infrastructure layer: concrete implementations of the application ports.
//!
//! Everything that touches processes, sockets, or the filesystem lives here.

pub mod arp;
pub mod capabilities;
pub mod command_runner;
pub mod config;
pub mod deadline;
pub mod ping;
pub mod privilege;
pub mod routes;
pub mod ssh;
pub mod syn;
pub mod udp;
