pub mod register_schema;

pub use register_schema::RegistrationRequest;
