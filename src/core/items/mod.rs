//! Item domain module

pub mod service;
pub mod types;

pub use service::ItemService;
pub use types::{Item, ItemRequest, ItemStatus, NewItem};
