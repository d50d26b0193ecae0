// Data source adapters
pub mod providers;
