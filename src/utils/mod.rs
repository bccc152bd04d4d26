//! Utility modules shared by the publishing run.

pub mod date;
pub mod exec;
pub mod git;
pub mod write;
