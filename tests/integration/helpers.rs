//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use sharelink_cache::CacheManager;
use sharelink_core::config::AppConfig;
use sharelink_core::result::AppResult;
use sharelink_core::traits::{CacheProvider, ResourceStore};
use sharelink_entity::file::StoredFile;
use sharelink_entity::message::Message;
use sharelink_entity::user::User;
use sharelink_service::{
    FileShareService, LoginShareService, MessageShareService, ShareRegistry,
};
use sharelink_token::TokenCodec;

/// Records kept in memory in place of a database.
#[derive(Debug)]
pub struct Records<R> {
    rows: Mutex<HashMap<String, R>>,
}

impl<R> Default for Records<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }
}

impl<R: Clone> Records<R> {
    pub fn insert(&self, id: &str, record: R) {
        self.rows.lock().unwrap().insert(id.to_string(), record);
    }

    pub fn remove(&self, id: &str) {
        self.rows.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl<R> ResourceStore<R> for Records<R>
where
    R: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }
}

/// Test application context
pub struct TestApp {
    pub config: AppConfig,
    pub cache: Arc<dyn CacheProvider>,
    pub codec: Arc<TokenCodec>,
    pub registry: Arc<ShareRegistry>,
    pub users: Arc<Records<User>>,
    pub messages: Arc<Records<Message>>,
    pub files: Arc<Records<StoredFile>>,
    pub login: LoginShareService,
    pub message: MessageShareService,
    pub file: FileShareService,
}

impl TestApp {
    /// Create a new test application over the in-memory cache
    pub async fn new() -> Self {
        let config = AppConfig::load("tests/fixtures/test_config", "test")
            .expect("Failed to load test config");

        let cache: Arc<dyn CacheProvider> = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let codec = Arc::new(TokenCodec::new(&config.cipher).expect("Failed to init codec"));
        let registry = Arc::new(ShareRegistry::new(
            codec.clone(),
            cache.clone(),
            config.share.host_url.clone(),
        ));

        let users = Arc::new(Records::<User>::default());
        let messages = Arc::new(Records::<Message>::default());
        let files = Arc::new(Records::<StoredFile>::default());

        let login = LoginShareService::new(registry.clone(), users.clone(), &config.share);
        let message = MessageShareService::new(registry.clone(), messages.clone(), &config.share);
        let file = FileShareService::new(registry.clone(), files.clone(), &config.share);

        Self {
            config,
            cache,
            codec,
            registry,
            users,
            messages,
            files,
            login,
            message,
            file,
        }
    }

    pub fn create_test_user(&self, id: &str, username: &str) {
        self.users.insert(
            id,
            User {
                id: id.to_string(),
                username: username.to_string(),
            },
        );
    }

    pub fn create_test_message(&self, id: &str, owner: &str, info: &str) {
        self.messages.insert(
            id,
            Message {
                id: id.to_string(),
                user_id: owner.to_string(),
                info: info.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    pub fn create_test_file(&self, id: &str, owner: &str, name: &str) {
        self.files.insert(
            id,
            StoredFile {
                id: id.to_string(),
                user_id: owner.to_string(),
                name: name.to_string(),
                size: 4096,
                location: format!("/srv/files/{owner}/{id}"),
            },
        );
    }
}
