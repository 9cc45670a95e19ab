use async_trait::async_trait;

#[async_trait]
pub trait StoreHealth: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn ping(&self) -> bool;
}
