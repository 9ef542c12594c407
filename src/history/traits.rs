use crate::error::Result;

/// Durable backing for the prompt history: one ordered list under one key.
pub trait HistoryStorage: Send + Sync {
    fn read(&self) -> Result<Vec<String>>;
    fn write(&self, entries: &[String]) -> Result<()>;
    fn delete(&self) -> Result<()>;
}
