// Library exports for the IronLog client
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod features;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
