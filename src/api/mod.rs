//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List items (`_page`, `_limit`, `q`)
//! - `POST /api/items` - Create an item
//! - `GET /api/items/:id` - Fetch an item by id
//! - `GET /api/stats` - Catalog statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
