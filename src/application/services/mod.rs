//! Business logic services for the application layer.

pub mod account_service;
pub mod credential_service;
pub mod listing_service;

pub use account_service::{AccountError, AccountService, AuthSession};
pub use credential_service::{Claims, CredentialError, CredentialService, JwtCredentialService};
pub use listing_service::{ListingError, ListingService, NewListingInput};

#[cfg(test)]
pub use credential_service::MockCredentialService;
