//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AccountService, CredentialService, ListingService};
use crate::domain::repositories::{AccountRepository, ListingRepository, StoreHealth};
use crate::infrastructure::memory::InMemoryStore;

pub type DynAccountService = AccountService<dyn AccountRepository, dyn CredentialService>;
pub type DynListingService = ListingService<dyn ListingRepository>;

/// Services and probes shared across requests.
///
/// Cheap to clone: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<DynAccountService>,
    pub listing_service: Arc<DynListingService>,
    pub credentials: Arc<dyn CredentialService>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wires services over the given stores.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        listings: Arc<dyn ListingRepository>,
        store_health: Arc<dyn StoreHealth>,
        credentials: Arc<dyn CredentialService>,
    ) -> Self {
        Self {
            account_service: Arc::new(AccountService::new(accounts, credentials.clone())),
            listing_service: Arc::new(ListingService::new(listings)),
            credentials,
            store_health,
        }
    }

    /// Wires services over a fresh [`InMemoryStore`].
    pub fn in_memory(credentials: Arc<dyn CredentialService>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), store, credentials)
    }
}
