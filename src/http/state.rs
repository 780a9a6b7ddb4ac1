use std::sync::Arc;

use crate::auth::{Accounts, Manager};
use crate::catalog::CatalogFeed;
use crate::film::Film;
use crate::ranked::RankedStore;
use crate::store::SharedCollection;

/// Shared handler state: the ranked film store, the manager accounts (which
/// also act as the access guard), and the external catalog feed.
pub struct AppState {
    pub films: RankedStore<SharedCollection<Film>>,
    pub accounts: Accounts<SharedCollection<Manager>>,
    pub feed: Arc<dyn CatalogFeed>,
}

impl AppState {
    pub fn new(
        films: RankedStore<SharedCollection<Film>>,
        accounts: Accounts<SharedCollection<Manager>>,
        feed: Arc<dyn CatalogFeed>,
    ) -> Self {
        AppState {
            films,
            accounts,
            feed,
        }
    }
}
