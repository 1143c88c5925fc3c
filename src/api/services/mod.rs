pub mod collaborators;
pub mod engine_service;
pub mod identity_service;
pub mod turn_service;
pub mod validation_service;

pub use collaborators::*;
pub use identity_service::*;
pub use turn_service::*;
pub use validation_service::*;
