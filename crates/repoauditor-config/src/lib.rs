//! Configuration model, discovery, and validation for the repository health
//! auditor.

pub mod config;
