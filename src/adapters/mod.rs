// Adapters layer: concrete implementations for external systems (delimited files, inference endpoint).

pub mod csv_io;
pub mod ollama;
