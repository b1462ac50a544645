// Domain layer - Core business models
pub mod conversation;
pub mod intake;
pub mod manager;
pub mod stats;
pub mod ticket;
pub mod widget;
