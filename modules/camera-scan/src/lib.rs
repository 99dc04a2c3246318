//! Network camera discovery: scan every host of a subnet for well-known camera ports.
//!
//! A host is online when it answers the liveness probe; an online host is a
//! possible camera when any configured port accepts a TCP connection.

pub mod classifier;
pub mod host;
pub mod scan;

pub use classifier::is_possible_camera;
pub use host::HostScanner;
pub use scan::{scan, CameraScanner, Progress};
