pub mod configs;
pub mod demo;
pub mod errors;
pub mod providers;
pub mod render;
pub mod telemetry;
