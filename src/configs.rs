pub mod agentops;
pub mod base;
pub mod cohere;
