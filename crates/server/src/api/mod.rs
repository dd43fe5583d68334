pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod solve;

pub use routes::create_router;
