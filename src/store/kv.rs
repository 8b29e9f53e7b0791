// src/store/kv.rs

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tempo esgotado ao acessar o armazenamento")]
    Timeout,

    #[error("Armazenamento indisponível: {0}")]
    Unavailable(String),
}

// O colaborador de persistência: cada coleção lógica vive sob sua própria
// chave, como um snapshot completo substituído a cada escrita (nunca um log
// de appends). Toda mutação lê a coleção inteira, altera em memória e grava
// a coleção inteira de volta.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, collection: &str) -> Result<Option<Vec<Value>>, StoreError>;
    async fn put(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError>;
}

// ---
// Backend em memória
// ---
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, collection: &str) -> Result<Option<Vec<Value>>, StoreError> {
        Ok(self.collections.read().await.get(collection).cloned())
    }

    async fn put(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), records);
        Ok(())
    }
}

// ---
// Backend em arquivos JSON (um arquivo por coleção)
// ---
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Abre (criando, se preciso) o diretório de dados.
    pub async fn open(dir: PathBuf) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, collection: &str) -> Result<Option<Vec<Value>>, StoreError> {
        match tokio::fs::read(self.path_for(collection)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(self.path_for(collection), bytes).await?;
        Ok(())
    }
}

// Limites das chamadas ao backend: se o colaborador for remoto, cada
// operação falha em vez de pendurar.
const CALL_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

// O handle compartilhado de armazenamento, injetado em cada repositório.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvStore>,
    // Um mutex por coleção: serializa as sequências de ler-alterar-gravar
    // dos repositórios dentro deste processo.
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl Store {
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Adquire o mutex da coleção. O repositório segura o guard durante
    /// toda a sequência de ler-alterar-gravar.
    pub async fn lock(&self, collection: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Carrega a coleção inteira. Coleção ausente equivale a vazia.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let Some(values) = self.get_with_retry(collection).await? else {
            return Ok(Vec::new());
        };
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(StoreError::from))
            .collect()
    }

    /// Grava a coleção inteira (snapshot substituído por completo).
    pub async fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), StoreError> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()?;
        self.put_with_retry(collection, values).await
    }

    async fn get_with_retry(&self, collection: &str) -> Result<Option<Vec<Value>>, StoreError> {
        let mut attempt = 1;
        loop {
            let result = tokio::time::timeout(CALL_TIMEOUT, self.backend.get(collection))
                .await
                .map_err(|_| StoreError::Timeout)
                .and_then(|r| r);
            match result {
                Ok(values) => return Ok(values),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        "Falha ao ler a coleção '{}' (tentativa {}/{}): {}",
                        collection, attempt, MAX_ATTEMPTS, e
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn put_with_retry(&self, collection: &str, values: Vec<Value>) -> Result<(), StoreError> {
        let mut attempt = 1;
        loop {
            let result = tokio::time::timeout(
                CALL_TIMEOUT,
                self.backend.put(collection, values.clone()),
            )
            .await
            .map_err(|_| StoreError::Timeout)
            .and_then(|r| r);
            match result {
                Ok(()) => return Ok(()),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        "Falha ao gravar a coleção '{}' (tentativa {}/{}): {}",
                        collection, attempt, MAX_ATTEMPTS, e
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        value: i32,
    }

    fn record(id: &str, value: i32) -> Record {
        Record {
            id: id.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn memory_store_round_trips_a_snapshot() {
        let store = Store::in_memory();
        store
            .save("things", &[record("a", 1), record("b", 2)])
            .await
            .unwrap();

        let loaded: Vec<Record> = store.load("things").await.unwrap();
        assert_eq!(loaded, vec![record("a", 1), record("b", 2)]);
    }

    #[tokio::test]
    async fn absent_collection_loads_as_empty() {
        let store = Store::in_memory();
        let loaded: Vec<Record> = store.load("nothing_here").await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn put_replaces_the_whole_snapshot() {
        let store = Store::in_memory();
        store.save("things", &[record("a", 1)]).await.unwrap();
        store.save("things", &[record("b", 2)]).await.unwrap();

        let loaded: Vec<Record> = store.load("things").await.unwrap();
        assert_eq!(loaded, vec![record("b", 2)]);
    }

    #[tokio::test]
    async fn file_store_round_trips_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(Arc::new(
            JsonFileStore::open(dir.path().to_path_buf()).await.unwrap(),
        ));
        store.save("schools", &[record("s1", 10)]).await.unwrap();

        // Reabre o mesmo diretório: o snapshot persiste.
        let reopened = Store::new(Arc::new(
            JsonFileStore::open(dir.path().to_path_buf()).await.unwrap(),
        ));
        let loaded: Vec<Record> = reopened.load("schools").await.unwrap();
        assert_eq!(loaded, vec![record("s1", 10)]);
    }

    #[tokio::test]
    async fn file_store_absent_collection_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().to_path_buf()).await.unwrap();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    // Backend que falha as primeiras N chamadas; valida o retry limitado.
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: AtomicU32,
    }

    impl FlakyStore {
        fn failing(times: u32) -> Self {
            Self {
                inner: MemoryStore::new(),
                failures_left: AtomicU32::new(times),
            }
        }

        fn should_fail(&self) -> bool {
            self.failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl KvStore for FlakyStore {
        async fn get(&self, collection: &str) -> Result<Option<Vec<Value>>, StoreError> {
            if self.should_fail() {
                return Err(StoreError::Unavailable("indisponível".into()));
            }
            self.inner.get(collection).await
        }

        async fn put(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
            if self.should_fail() {
                return Err(StoreError::Unavailable("indisponível".into()));
            }
            self.inner.put(collection, records).await
        }
    }

    #[tokio::test]
    async fn transient_backend_failure_is_retried() {
        let store = Store::new(Arc::new(FlakyStore::failing(2)));
        store.save("things", &[record("a", 1)]).await.unwrap();
    }

    #[tokio::test]
    async fn persistent_backend_failure_surfaces() {
        let store = Store::new(Arc::new(FlakyStore::failing(10)));
        let result = store.save("things", &[record("a", 1)]).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
