pub mod blockchain_service;
pub mod bridge_service;
pub mod max_amount_service;
pub mod network_config;
