pub mod driver;
pub mod protocol;

pub use driver::{DataRate, Error, Nrf24, PowerLevel, RadioConfig};
