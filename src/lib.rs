//! Backend for the KHRONOS training center's chat assistant.

pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod persona;
pub mod routes;
pub mod services;
pub mod state;
