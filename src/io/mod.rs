//! Export of sizing results.

pub mod export;
