pub mod client;
pub mod error;
pub mod form;
pub mod form_state;
pub mod payload;
pub mod receipt;
pub mod submit;
pub mod validation;
