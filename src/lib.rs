// src/lib.rs

pub mod api;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod errors;
pub mod models;
pub mod session_store;
