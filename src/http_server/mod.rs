//! # Student HTTP API
//!
//! # Endpoints
//!
//! - `POST /students` - Validate and store a student (201 / 400 / 500)
//! - `GET /students` - All students, newest first (200 / 500)
//! - `GET /health` - Health check

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::ApiError;
pub use server::HttpServer;
pub use student_routes::StudentState;
