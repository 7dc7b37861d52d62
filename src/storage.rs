/// The JSON credential file.
pub mod credentials;

pub use credentials::CredentialStore;
