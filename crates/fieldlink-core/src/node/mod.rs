//! Remote node sampling cycles: acquire, package, transmit.
//!
//! A cycle is one iteration of a remote node's loop minus the idle delay;
//! the firmware tasks own the timing.

pub mod flame;
pub mod soil;

pub use flame::FlameNode;
pub use soil::SoilNode;
