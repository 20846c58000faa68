use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService, SessionResolver,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub movie_service: Arc<dyn MovieService>,

    pub auth_service: Arc<dyn AuthService>,

    /// Decides who a request belongs to; swappable in tests.
    pub session_resolver: Arc<dyn SessionResolver>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::from_store(store, config))
    }

    #[must_use]
    pub fn from_store(store: Store, config: Config) -> Self {
        let movie_service =
            Arc::new(SeaOrmMovieService::new(store.clone())) as Arc<dyn MovieService>;

        let auth = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            movie_service,
            auth_service: auth.clone(),
            session_resolver: auth,
        }
    }

    #[must_use]
    pub fn with_session_resolver(mut self, resolver: Arc<dyn SessionResolver>) -> Self {
        self.session_resolver = resolver;
        self
    }
}
