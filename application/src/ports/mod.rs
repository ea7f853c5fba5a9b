//! Port definitions (interfaces to the outside world)

pub mod backend_gateway;

pub use backend_gateway::{BackendGateway, ChatReply, GatewayError};
