// Toolbox - Policy-driven execution sandbox for agent tool calls
// Library exports

// Core modules
pub mod audit;
pub mod cli;
pub mod client;
pub mod config;
pub mod sandbox;
pub mod server;
pub mod tools;
