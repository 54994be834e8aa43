pub mod handlers;
pub mod middleware;
pub mod quota;
pub mod recipes;
pub mod routes;

pub use routes::create_router;
