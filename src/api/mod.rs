//! API Module
//!
//! HTTP handlers and routing exposing one configured cache over a small JSON
//! API.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key`, `GET /has/:key`, `DELETE /del/:key`
//! - `POST /mget`, `PUT /mset`, `POST /mdel`
//! - `POST /invalidate/:tag`, `POST /clear`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
