//! Core utilities: configuration, logging, input validation, QR encoding

pub mod config;
pub mod logging;
pub mod qr;
pub mod validation;

pub use logging::init_logger;
