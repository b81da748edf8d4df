//! Core library exports for the category taxonomy service.
//!
//! The `data` feature exposes the domain model, storage traits with their
//! Diesel backend, the read caches and the service layer. The `server` feature
//! adds request forms and the Actix-web routes used by the binary.

pub mod cache;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
