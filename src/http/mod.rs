pub mod docs;
pub mod routes;
pub mod routing;
pub mod types;
