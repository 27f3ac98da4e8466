pub mod ai_gateway;

pub use ai_gateway::AiGateway;
