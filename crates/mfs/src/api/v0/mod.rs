//! Endpoints under `/api/v0`.

pub mod add;
pub mod files;
