pub mod central;
pub mod flame;
pub mod soil;
pub mod telemetry;

pub use central::receive_task;
pub use flame::flame_task;
pub use soil::soil_task;
pub use telemetry::telemetry_task;
