//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parse and repository calls into use-case level APIs.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod capture_service;
