pub mod errors;
pub mod ports;
pub mod services;
pub mod use_cases;
pub mod validation;
