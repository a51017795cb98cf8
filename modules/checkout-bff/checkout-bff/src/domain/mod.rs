pub mod error;
pub mod ports;
pub mod routes;
pub mod service;
