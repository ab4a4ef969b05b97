//! Boundary adapters for data entering the crate.

pub mod ingest;
