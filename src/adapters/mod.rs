// Adapters layer: concrete implementations for external systems (catalog files, exports).

pub mod catalog;
pub mod export;
