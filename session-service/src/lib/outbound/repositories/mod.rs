pub mod memory;
pub mod postgres;

pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryProfileStore;
pub use postgres::PostgresCredentialStore;
pub use postgres::PostgresProfileStore;
