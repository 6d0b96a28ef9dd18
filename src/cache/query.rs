/// 查询缓存
/// 以查询身份为键的进程级缓存：并发去重、新鲜度窗口、无订阅回收
/// 订阅方通过 watch 通道收到同一条目的每次状态变更

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::RemoteFetchError;
use crate::types::movie::{Credit, Genre, Movie};

/// 查询身份，参数不同即不同条目
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
    Trending,
    Genres,
    Detail(u64),
    Credits(u64),
    Search(String),
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::NowPlaying => write!(f, "now_playing"),
            QueryKey::Popular => write!(f, "popular"),
            QueryKey::TopRated => write!(f, "top_rated"),
            QueryKey::Upcoming => write!(f, "upcoming"),
            QueryKey::Trending => write!(f, "trending"),
            QueryKey::Genres => write!(f, "genres"),
            QueryKey::Detail(id) => write!(f, "detail:{}", id),
            QueryKey::Credits(id) => write!(f, "credits:{}", id),
            QueryKey::Search(q) => write!(f, "search:{}", q),
        }
    }
}

/// 查询结果载荷
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    MovieList(Vec<Movie>),
    MovieDetail(Movie),
    Credits(Credit),
    Genres(Vec<Genre>),
}

impl QueryData {
    pub fn as_movie_list(&self) -> Option<&[Movie]> {
        match self {
            QueryData::MovieList(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_movie_detail(&self) -> Option<&Movie> {
        match self {
            QueryData::MovieDetail(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_credits(&self) -> Option<&Credit> {
        match self {
            QueryData::Credits(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_genres(&self) -> Option<&[Genre]> {
        match self {
            QueryData::Genres(g) => Some(g),
            _ => None,
        }
    }
}

/// 条目状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// 缓存条目，订阅方看到的完整快照
#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub status: QueryStatus,
    /// 最后一次成功的数据，刷新失败时保留
    pub data: Option<QueryData>,
    pub error: Option<RemoteFetchError>,
    pub fetched_at: Option<Instant>,
}

impl QueryEntry {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
        }
    }

    /// 是否在新鲜窗口内
    pub fn is_fresh(&self, stale_time: Duration) -> bool {
        self.status == QueryStatus::Success
            && self
                .fetched_at
                .map(|t| t.elapsed() < stale_time)
                .unwrap_or(false)
    }

    /// 首次加载中（无可展示数据）
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.data.is_none()
    }
}

/// 查询选项，默认值与前端一致：10 分钟新鲜、15 分钟回收
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub stale_time: Duration,
    pub gc_time: Duration,
    /// 为 false 时挂起不发请求（前置条件未满足）
    pub enabled: bool,
    pub refetch_on_remount: bool,
    pub refetch_on_focus: bool,
    pub refetch_on_reconnect: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(600),
            gc_time: Duration::from_secs(900),
            enabled: true,
            refetch_on_remount: false,
            refetch_on_focus: false,
            refetch_on_reconnect: false,
        }
    }
}

type LoaderFuture = Pin<Box<dyn Future<Output = Result<QueryData, RemoteFetchError>> + Send>>;

/// 零参装载函数，产出查询结果（由网关实现）
pub type Loader = Arc<dyn Fn() -> LoaderFuture + Send + Sync>;

/// 把普通异步闭包包成 Loader
pub fn loader<F, Fut>(f: F) -> Loader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<QueryData, RemoteFetchError>> + Send + 'static,
{
    Arc::new(move || -> LoaderFuture { Box::pin(f()) })
}

struct CacheSlot {
    state: watch::Sender<QueryEntry>,
    /// 活跃订阅数，守卫 Drop 时递减
    subscribers: AtomicUsize,
    /// 最近一次订阅/退订时间，驱动回收窗口
    last_active: Mutex<Instant>,
    /// remove 之后递增，在途响应按代丢弃
    generation: AtomicU64,
    in_flight: AtomicBool,
    /// 最近一次的装载函数与选项，焦点/重连刷新复用
    loader: Mutex<Loader>,
    options: Mutex<QueryOptions>,
}

impl CacheSlot {
    fn new(loader: Loader, options: QueryOptions) -> Self {
        let (tx, _rx) = watch::channel(QueryEntry::idle());
        Self {
            state: tx,
            subscribers: AtomicUsize::new(0),
            last_active: Mutex::new(Instant::now()),
            generation: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
            loader: Mutex::new(loader),
            options: Mutex::new(options),
        }
    }
}

/// 订阅守卫：有守卫在就不回收
struct SubscriberGuard {
    slot: Arc<CacheSlot>,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        if self.slot.subscribers.fetch_sub(1, Ordering::SeqCst) == 1 {
            *self.slot.last_active.lock().expect("lock poisoned") = Instant::now();
        }
    }
}

/// 一次订阅：可读当前快照，也可等待后续变更
pub struct QuerySubscription {
    key: QueryKey,
    rx: watch::Receiver<QueryEntry>,
    _guard: SubscriberGuard,
}

impl QuerySubscription {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// 当前条目快照
    pub fn current(&self) -> QueryEntry {
        self.rx.borrow().clone()
    }

    /// 等待下一次状态变更；条目被移除时返回 false
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// 等待进入终态（成功或失败）；仅对已启用的查询有意义
    pub async fn settled(&mut self) -> QueryEntry {
        let settled = self
            .rx
            .wait_for(|e| matches!(e.status, QueryStatus::Success | QueryStatus::Error))
            .await
            .map(|entry| entry.clone());
        match settled {
            Ok(entry) => entry,
            // 条目已被移除，返回最后的快照
            Err(_) => self.current(),
        }
    }
}

/// 进程级查询缓存，生命周期与应用会话一致
pub struct QueryCache {
    slots: DashMap<QueryKey, Arc<CacheSlot>>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// 订阅一个查询
    /// 新鲜直接命中；过期或缺失且启用时发起装载；在途请求共享
    pub fn fetch(&self, key: QueryKey, loader: Loader, options: QueryOptions) -> QuerySubscription {
        // 操作时顺带回收过期条目
        self.gc();

        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(CacheSlot::new(loader.clone(), options)))
            .clone();

        slot.subscribers.fetch_add(1, Ordering::SeqCst);
        *slot.last_active.lock().expect("lock poisoned") = Instant::now();
        *slot.loader.lock().expect("lock poisoned") = loader.clone();
        *slot.options.lock().expect("lock poisoned") = options;

        if options.enabled {
            let fresh = slot.state.borrow().is_fresh(options.stale_time);
            let force = options.refetch_on_remount;
            if fresh && !force {
                debug!("[CACHE] {} 命中", key);
            } else if slot
                .in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                Self::spawn_load(key.clone(), slot.clone(), loader, options.stale_time, force);
            } else {
                // 并发去重：同一 key 只发一次请求，共享在途结果
                debug!("[CACHE] {} 在途共享", key);
            }
        }

        QuerySubscription {
            rx: slot.state.subscribe(),
            _guard: SubscriberGuard { slot: slot.clone() },
            key,
        }
    }

    /// 发起一次装载；调用方已通过 CAS 占住 in_flight
    fn spawn_load(
        key: QueryKey,
        slot: Arc<CacheSlot>,
        loader: Loader,
        stale_time: Duration,
        force: bool,
    ) {
        let generation = slot.generation.load(Ordering::SeqCst);
        tokio::spawn(async move {
            // double check：占住在途标记后再查一次新鲜度
            if !force && slot.state.borrow().is_fresh(stale_time) {
                slot.in_flight.store(false, Ordering::SeqCst);
                return;
            }

            // 进入加载中，保留上次数据供界面继续展示
            slot.state.send_modify(|e| {
                e.status = QueryStatus::Pending;
                e.error = None;
            });
            debug!("[CACHE] {} 开始装载", key);

            let result = loader().await;

            if slot.generation.load(Ordering::SeqCst) != generation {
                // 条目已换代，旧响应丢弃，不覆盖更新的状态
                debug!("[CACHE] {} 旧响应丢弃", key);
                slot.in_flight.store(false, Ordering::SeqCst);
                return;
            }

            match result {
                Ok(data) => {
                    slot.state.send_modify(|e| {
                        e.status = QueryStatus::Success;
                        e.data = Some(data);
                        e.error = None;
                        e.fetched_at = Some(Instant::now());
                    });
                    debug!("[CACHE] {} 装载完成", key);
                }
                Err(err) => {
                    // 刷新失败保留最后一次成功数据
                    warn!("[CACHE] {} 装载失败: {}", key, err);
                    slot.state.send_modify(|e| {
                        e.status = QueryStatus::Error;
                        e.error = Some(err);
                    });
                }
            }
            slot.in_flight.store(false, Ordering::SeqCst);
        });
    }

    /// 强制移除条目；在途响应作废，下一个订阅方必然重新装载
    pub fn remove(&self, key: &QueryKey) {
        if let Some((_, slot)) = self.slots.remove(key) {
            slot.generation.fetch_add(1, Ordering::SeqCst);
            debug!("[CACHE] {} 已移除", key);
        }
    }

    /// 回收无订阅且闲置超过 gc_time 的条目
    pub fn gc(&self) {
        self.slots.retain(|key, slot| {
            if slot.subscribers.load(Ordering::SeqCst) > 0 {
                return true;
            }
            let idle = slot.last_active.lock().expect("lock poisoned").elapsed();
            let gc_time = slot.options.lock().expect("lock poisoned").gc_time;
            if idle >= gc_time {
                slot.generation.fetch_add(1, Ordering::SeqCst);
                debug!("[CACHE] {} 回收 (闲置 {:?})", key, idle);
                false
            } else {
                true
            }
        });
    }

    /// 窗口重新聚焦：刷新选择了 refetch_on_focus 的活跃条目
    pub fn notify_focus(&self) {
        self.refetch_where(|o| o.refetch_on_focus, "focus");
    }

    /// 网络重连：刷新选择了 refetch_on_reconnect 的活跃条目
    pub fn notify_reconnect(&self) {
        self.refetch_where(|o| o.refetch_on_reconnect, "reconnect");
    }

    fn refetch_where(&self, pred: impl Fn(&QueryOptions) -> bool, reason: &str) {
        for item in self.slots.iter() {
            let slot = item.value().clone();
            if slot.subscribers.load(Ordering::SeqCst) == 0 {
                continue;
            }
            let options = *slot.options.lock().expect("lock poisoned");
            if !options.enabled || !pred(&options) {
                continue;
            }
            if slot
                .in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                continue;
            }
            let key = item.key().clone();
            debug!("[CACHE] {} 因 {} 刷新", key, reason);
            let loader = slot.loader.lock().expect("lock poisoned").clone();
            Self::spawn_load(key, slot, loader, options.stale_time, true);
        }
    }

    /// 检视条目快照，不影响订阅计数（测试与调试用）
    pub fn peek(&self, key: &QueryKey) -> Option<QueryEntry> {
        self.slots.get(key).map(|s| s.state.borrow().clone())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
