//! ReviewMaster - Review Collection Funnel & Reputation Routing Engine
//!
//! This crate implements the guided feedback funnel, sentiment-based
//! reputation routing, and the AI-assisted operator dashboard behind it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
