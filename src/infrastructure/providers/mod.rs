// Concrete backends for the benchmark data port
pub mod csv_store;
pub mod in_memory;

pub use csv_store::CsvProvider;
pub use in_memory::InMemoryProvider;
