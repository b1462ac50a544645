// Application layer - Use cases and gateway traits
pub mod assistant_service;
pub mod dashboard_service;
pub mod gateways;
pub mod intake_service;
pub mod planner;
pub mod ticket_service;
pub mod upload_history;
pub mod widget_resolver;
