/// State management module
///
/// This module handles all application state, including:
/// - Database connection and queries (catalog.rs)
/// - Shared data structures (data.rs)
/// - The pass-through service consumed by the UI (service.rs)

pub mod catalog;
pub mod data;
pub mod service;
