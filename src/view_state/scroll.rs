/// 页面滚动锁
/// 覆盖层打开时抑制底层滚动；每次渲染重新断言，幂等自纠

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::overlay::OverlayState;

#[derive(Debug, Default)]
pub struct ScrollLock {
    locked: AtomicBool,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依据覆盖层状态重新断言滚动锁；状态已一致时为空操作
    pub fn sync(&self, state: &OverlayState) {
        let want = state.active_movie_id().is_some();
        let was = self.locked.swap(want, Ordering::SeqCst);
        if was != want {
            debug!("[OVERLAY] 滚动锁 {}", if want { "开" } else { "关" });
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::location::Location;
    use crate::view_state::overlay::overlay_state;

    #[test]
    fn lock_follows_overlay_and_reassertion_is_idempotent() {
        let lock = ScrollLock::new();
        let open = overlay_state(&Location::parse("/550"));
        let closed = overlay_state(&Location::parse("/"));

        lock.sync(&open);
        assert!(lock.is_locked());

        // 重复断言不改变状态
        lock.sync(&open);
        assert!(lock.is_locked());

        lock.sync(&closed);
        assert!(!lock.is_locked());
        lock.sync(&closed);
        assert!(!lock.is_locked());
    }

    #[test]
    fn missed_transition_self_corrects_on_next_render() {
        let lock = ScrollLock::new();
        let open = overlay_state(&Location::parse("/550"));
        let closed = overlay_state(&Location::parse("/"));

        lock.sync(&open);
        // 快速导航漏掉了关闭边沿，下一次渲染直接纠正
        lock.sync(&closed);
        assert!(!lock.is_locked());
    }
}
