//! Application handlers organized by surface.

pub mod dashboard;
pub mod funnel;
