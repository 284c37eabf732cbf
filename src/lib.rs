// src/lib.rs

//! Twitter timeline loader
//!
//! Fetches recent posts of configured users and emits each one as an XML
//! document to a sink.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
