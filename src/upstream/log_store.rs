//! Registro de llamadas al API remoto
//! Búfer circular en memoria; lo más reciente primero

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamLogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub user: String,
    pub status_code: u16, // 0 si no hubo respuesta
    pub latency_ms: u64,
    pub error: Option<String>,
}

pub struct LogStore {
    logs: RwLock<VecDeque<UpstreamLogEntry>>,
    max_size: AtomicUsize,
    next_id: AtomicU64,
}

impl LogStore {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            logs: RwLock::new(VecDeque::with_capacity(max_size.min(1024))),
            max_size: AtomicUsize::new(max_size),
            next_id: AtomicU64::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<UpstreamLogEntry>> {
        self.logs.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<UpstreamLogEntry>> {
        self.logs.write().unwrap_or_else(|e| e.into_inner())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        request_id: String,
        method: String,
        path: String,
        user: String,
        status_code: u16,
        latency_ms: u64,
        error: Option<String>,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = UpstreamLogEntry {
            id,
            timestamp: chrono::Utc::now().timestamp(),
            request_id,
            method,
            path,
            user,
            status_code,
            latency_ms,
            error,
        };

        let max_size = self.max_size.load(Ordering::Relaxed);
        let mut logs = self.write();
        while logs.len() >= max_size {
            logs.pop_front();
        }
        logs.push_back(entry);
        id
    }

    /// Página de entradas, de la más reciente a la más antigua
    pub fn get_logs(&self, limit: usize, offset: usize) -> Vec<UpstreamLogEntry> {
        self.read().iter().rev().skip(offset).take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Cambia la capacidad; descarta lo más antiguo si sobra
    pub fn set_capacity(&self, max_size: usize) {
        let max_size = max_size.max(1);
        self.max_size.store(max_size, Ordering::Relaxed);
        let mut logs = self.write();
        while logs.len() > max_size {
            logs.pop_front();
        }
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registrar(store: &LogStore, path: &str) -> u64 {
        store.record(
            "req".to_string(),
            "GET".to_string(),
            path.to_string(),
            "user".to_string(),
            200,
            5,
            None,
        )
    }

    #[test]
    fn test_descarta_lo_mas_antiguo() {
        let store = LogStore::new(2);
        registrar(&store, "/a");
        registrar(&store, "/b");
        registrar(&store, "/c");
        let logs = store.get_logs(10, 0);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].path, "/c");
        assert_eq!(logs[1].path, "/b");
    }

    #[test]
    fn test_paginacion() {
        let store = LogStore::new(10);
        for i in 0..5 {
            registrar(&store, &format!("/{}", i));
        }
        let page = store.get_logs(2, 1);
        assert_eq!(page.iter().map(|l| l.path.as_str()).collect::<Vec<_>>(), vec!["/3", "/2"]);
    }

    #[test]
    fn test_set_capacity_recorta() {
        let store = LogStore::new(10);
        for i in 0..5 {
            registrar(&store, &format!("/{}", i));
        }
        store.set_capacity(3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get_logs(1, 0)[0].path, "/4");
        store.clear();
        assert!(store.is_empty());
    }
}
