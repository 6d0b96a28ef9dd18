/// 流派查找表
/// 会话内由最先完成流派查询的视图填充一次，其余视图直接读取

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::types::movie::Genre;

/// 共享引用数据存储
#[derive(Debug, Default)]
pub struct GenreStore {
    inner: RwLock<Option<Arc<Vec<Genre>>>>,
}

impl GenreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 填充一次；已填充则忽略
    pub fn set(&self, genres: Vec<Genre>) {
        let mut slot = self.inner.write().expect("lock poisoned");
        if slot.is_some() {
            return;
        }
        debug!("[GENRE] 查找表填充，共 {} 项", genres.len());
        *slot = Some(Arc::new(genres));
    }

    /// 未填充时返回 None，调用方按「尚未可用」处理
    pub fn get(&self) -> Option<Arc<Vec<Genre>>> {
        self.inner.read().expect("lock poisoned").clone()
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().expect("lock poisoned").is_some()
    }

    /// id → 名称
    pub fn name_of(&self, id: u64) -> Option<String> {
        self.get()?
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.clone())
    }

    /// id 序列 → 名称序列，未知 id 跳过
    pub fn names_for(&self, ids: &[u64]) -> Vec<String> {
        ids.iter().filter_map(|id| self.name_of(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 18,
                name: "Drama".into(),
            },
            Genre {
                id: 53,
                name: "Thriller".into(),
            },
        ]
    }

    #[test]
    fn read_before_set_returns_none() {
        let store = GenreStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_set());
        assert!(store.names_for(&[18]).is_empty());
    }

    #[test]
    fn set_only_takes_effect_once() {
        let store = GenreStore::new();
        store.set(genres());
        store.set(vec![Genre {
            id: 99,
            name: "Late".into(),
        }]);

        assert_eq!(store.name_of(18).as_deref(), Some("Drama"));
        assert_eq!(store.name_of(99), None);
    }

    #[test]
    fn names_skip_unknown_ids() {
        let store = GenreStore::new();
        store.set(genres());
        assert_eq!(store.names_for(&[53, 7, 18]), vec!["Thriller", "Drama"]);
    }
}
