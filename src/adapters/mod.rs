// Adapters layer: concrete implementations of the domain ports for real systems.

pub mod http;
