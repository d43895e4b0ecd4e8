use crate::{
    client::ApiClient,
    config::ApiConfig,
    navigation::{LogNavigator, Navigator},
    session::{ExecutionContext, FileStore, KeyValueStore, Session},
};
use anyhow::Result;
use std::{path::PathBuf, sync::Arc};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            session_file,
        }
    }

    /// Builds the session and client for one CLI run. The session is restored
    /// from the session file; navigation requests are only logged.
    ///
    /// # Errors
    /// Returns an error if the API URL is invalid or the session file cannot be
    /// opened.
    pub fn connect(&self) -> Result<Arc<ApiClient>> {
        let config = ApiConfig::new(&self.api_url)?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&self.session_file)?);
        let session = Arc::new(Session::new(ExecutionContext::Interactive, storage));
        session.init_session();

        let navigator: Arc<dyn Navigator> = Arc::new(LogNavigator);
        Ok(Arc::new(ApiClient::new(&config, session, navigator)?))
    }
}
