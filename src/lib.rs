use std::sync::Arc;

pub mod config;
pub mod error;
pub mod logs;
pub mod models;
pub mod plunk;
pub mod routes;
pub mod store;
pub mod viewer;

use crate::{
    config::Config,
    models::{account::Account, subscriber::Subscriber},
    plunk::{PlunkClient, PlunkError},
    store::JsonStore,
};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<JsonStore<Account>>,
    pub subscribers: Arc<JsonStore<Subscriber>>,
    pub plunk: PlunkClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, PlunkError> {
        Ok(Self {
            accounts: Arc::new(JsonStore::new(config.accounts_path())),
            subscribers: Arc::new(JsonStore::new(config.subscribers_path())),
            plunk: PlunkClient::new(&config.plunk_api_url, config.plunk_timeout)?,
        })
    }
}
