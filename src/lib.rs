//! Image brightness analysis service.
//!
//! Uploaded images are scanned for their brightest and darkest pixels,
//! annotated with markers at those points, written to an output directory
//! and recorded in a SQLite-backed result store. The HTTP layer exposes
//! analysis, history and download endpoints.

pub mod analyzer;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
