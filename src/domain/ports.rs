use crate::domain::model::{ClassifiedBans, LoadedBans, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWrite;

pub trait Storage: Send + Sync {
    type Writer: AsyncWrite + Unpin + Send;

    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Creates (or truncates) a file for appending.
    fn create_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Self::Writer>> + Send;

    fn resolve(&self, path: &str) -> PathBuf;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn expired_file(&self) -> &str;
    fn active_file(&self) -> &str;
    /// Pinned reference time, if any.
    fn now(&self) -> Option<i64>;
}

/// Source of the reference time used to classify bans.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LoadedBans>;
    async fn transform(&self, data: LoadedBans) -> Result<ClassifiedBans>;
    async fn load(&self, result: ClassifiedBans) -> Result<RunSummary>;
}
