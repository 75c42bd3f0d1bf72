pub mod error;
pub mod handler;
pub mod password;
pub mod response;
pub mod validation;
