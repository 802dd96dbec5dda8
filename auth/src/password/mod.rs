pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::HashCost;
pub use hasher::Hasher;
