//! Settings persistence for detection configurations.

mod repository;

pub use repository::JsonConfigRepository;
