pub mod base;
pub mod cohere;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod mock;
