pub mod agentops;
pub mod base;
pub mod event;
pub mod helpers;

#[cfg(test)]
pub mod mock;
