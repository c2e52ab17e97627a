//! Data-access functions for the `projects` and `palettes` tables.
//!
//! Every function issues exactly one statement against the store and hands the
//! raw `DbErr` back to the caller; classifying constraint violations is the
//! web layer's job.

pub mod palette_service;
pub mod project_service;
