pub mod builder;
pub mod catalog;
pub mod derive;
pub mod session;
pub mod slot_map;
pub mod transition;

pub use crate::domain::model::{Course, SlotKey, YearStructure};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
