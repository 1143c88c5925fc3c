pub mod collaborator_mock;

pub use collaborator_mock::*;
