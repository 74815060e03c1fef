pub mod ab;
pub mod draft;
pub mod locality;
pub mod store;
