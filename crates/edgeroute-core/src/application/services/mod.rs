//! Application services - orchestrate use cases.

pub mod routing_service;

pub use routing_service::{RouteInfo, RoutingService};
