pub mod commands;
pub mod handlers;
pub mod queries;
pub mod query_service;

pub use handlers::RoutingCommandHandler;
pub use query_service::RoutingQueryService;
