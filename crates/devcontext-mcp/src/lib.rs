//! MCP front end for devcontext pattern stores.

pub mod server;

pub use server::DevContextServer;
