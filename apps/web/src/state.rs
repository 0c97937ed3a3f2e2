use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::data::hooks::DataHooks;
use crate::store::RemoteStore;
use crate::view::ViewState;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RemoteStore>,
    pub hooks: Arc<DataHooks>,
    /// The one UI session this process serves.
    pub ui: Arc<RwLock<ViewState>>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RemoteStore>) -> Self {
        let hooks = Arc::new(DataHooks::new(Arc::clone(&store)));
        Self {
            config,
            store,
            hooks,
            ui: Arc::new(RwLock::new(ViewState::default())),
        }
    }
}
