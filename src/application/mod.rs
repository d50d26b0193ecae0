// Roster-wide parallel evaluation
pub mod batch;

// Pure benchmark evaluation
pub mod engine;

// Fetch-and-evaluate orchestration
pub mod service;
