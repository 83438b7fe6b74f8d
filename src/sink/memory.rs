use crate::core::{DepositOutcome, FragResult, FragmentSink};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// メモリ内に断片を保持するシンク（テスト・ドライラン用）
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    deposits: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受け取った順の (名前, バイト列)
    pub fn deposits(&self) -> Vec<(String, Vec<u8>)> {
        self.deposits.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.deposits
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.deposits
            .lock()
            .unwrap()
            .iter()
            .find(|(stored, _)| stored == name)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn len(&self) -> usize {
        self.deposits.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FragmentSink for MemorySink {
    async fn deposit(&self, name: &str, bytes: &[u8]) -> FragResult<DepositOutcome> {
        self.deposits
            .lock()
            .unwrap()
            .push((name.to_string(), bytes.to_vec()));
        Ok(DepositOutcome::Stored)
    }

    fn sink_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.deposit("a_0_0", &[1]).await.unwrap();
        sink.deposit("a_0_1", &[2, 3]).await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.names(), vec!["a_0_0".to_string(), "a_0_1".to_string()]);
        assert_eq!(sink.get("a_0_1"), Some(vec![2, 3]));
        assert_eq!(sink.get("a_9_9"), None);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let sink = MemorySink::new();
        let observer = sink.clone();

        sink.deposit("a_0_0", &[1]).await.unwrap();

        assert_eq!(observer.deposits(), vec![("a_0_0".to_string(), vec![1])]);
    }
}
