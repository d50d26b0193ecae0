// Benchmark verdicts and policy
pub mod benchmark;

// Peer corpus statistics
pub mod corpus;

// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Motivational time standards
pub mod standards;

// Times, events, swimmers
pub mod swim;
