//! # 项目列表响应式仓库
//!
//! `ProjectStore` 持有一份有序的项目列表，并向订阅者推送列表变化：
//! - 创建时通过 `list_projects` 命令一次性拉取完整列表
//! - `subscribe` 注册监听器，立即收到当前列表，之后每次变化再次收到
//! - `add` 通过 `add_project` 命令持久化新项目，成功后把宿主端返回的项目追加到列表
//!
//! ## 列表不变式
//! 列表只会在远程调用成功后追加，从不删除、重排或预先插入猜测值。
//! 多个 `add` 并发时，追加顺序为各自远程调用完成的顺序，而非调用顺序。
//!
//! ## 线程安全
//! 句柄可以 `Clone` 并在多个任务/线程间共享：
//! - 追加和快照替换在一个短暂持有的 `Mutex` 内完成
//! - 监听器回调在锁外执行，每个监听器有独立的投递守卫，
//!   较旧（更短）的快照如果晚到会被丢弃，保证每个监听器看到的列表只增不减

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::bridge::{self, CommandBridge, NoArgs};
use crate::error::StoreError;
use crate::models::project::{AddProjectParams, Project};

/// 拉取项目列表的命令名
pub const LIST_PROJECTS: &str = "list_projects";

/// 新增项目的命令名
pub const ADD_PROJECT: &str = "add_project";

/// 监听器回调
type Listener = dyn Fn(&[Project]) + Send + Sync;

/// 项目列表仓库句柄
///
/// 只能通过 `ProjectStore::create` 构造，因此不存在「初始化完成前调用 `add`」的情况。
#[derive(Clone)]
pub struct ProjectStore {
    bridge: Arc<dyn CommandBridge>,
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    next_listener_id: AtomicU64,
}

struct State {
    /// 当前列表快照；每次追加都替换为新的快照，旧快照保持不变
    projects: Arc<Vec<Project>>,
    listeners: Vec<Arc<ListenerSlot>>,
}

struct ListenerSlot {
    id: u64,
    callback: Box<Listener>,
    active: AtomicBool,
    /// 已投递给该监听器的列表长度；`None` 表示尚未投递
    delivered: Mutex<Option<usize>>,
}

impl ListenerSlot {
    fn deliver(&self, snapshot: &[Project]) {
        let mut delivered = self
            .delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.active.load(Ordering::Acquire) {
            return;
        }
        // 列表只追加，长度即版本号
        if matches!(*delivered, Some(len) if len >= snapshot.len()) {
            return;
        }

        (self.callback)(snapshot);
        *delivered = Some(snapshot.len());
    }
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn append(&self, project: Project) {
        let (snapshot, listeners) = {
            let mut state = self.lock();
            let mut next = Vec::with_capacity(state.projects.len() + 1);
            next.extend(state.projects.iter().cloned());
            next.push(project);
            state.projects = Arc::new(next);
            (Arc::clone(&state.projects), state.listeners.clone())
        };

        for listener in listeners {
            listener.deliver(&snapshot);
        }
    }

    fn remove_listener(&self, id: u64) {
        let mut state = self.lock();
        if let Some(index) = state.listeners.iter().position(|slot| slot.id == id) {
            let slot = state.listeners.remove(index);
            slot.active.store(false, Ordering::Release);
        }
    }
}

impl ProjectStore {
    /// 创建仓库
    ///
    /// 调用一次 `list_projects`，用其结果作为初始列表。
    ///
    /// # 错误
    /// `list_projects` 被拒绝或返回值无法解析时返回错误，不会产生仓库，
    /// 也不会退回为空列表。
    pub async fn create(bridge: Arc<dyn CommandBridge>) -> Result<Self, StoreError> {
        let initial: Vec<Project> = bridge::invoke(bridge.as_ref(), LIST_PROJECTS, &NoArgs {})
            .await
            .inspect_err(|e| log::error!("项目列表初始化失败: {}", e))?;

        log::info!("项目列表初始化完成，共 {} 个项目", initial.len());

        Ok(Self {
            bridge,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    projects: Arc::new(initial),
                    listeners: Vec::new(),
                }),
                next_listener_id: AtomicU64::new(0),
            }),
        })
    }

    /// 订阅列表变化
    ///
    /// `listener` 会立即收到当前列表，之后随成功的 `add` 收到更新后的列表。
    /// 多线程运行时下两次 `add` 的通知并发时，较旧的快照若晚于较新的快照到达会被跳过，
    /// 因此监听器不保证为每一次 `add` 各被调用一次，但看到的列表只增不减，
    /// 且 `add` 返回前监听器已看到包含该项目的列表。
    /// 返回的 `Subscription` 被调用 `unsubscribe()` 或被 drop 时取消订阅。
    #[must_use = "Subscription 被 drop 时会立即取消订阅"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Project]) + Send + Sync + 'static,
    {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let slot = Arc::new(ListenerSlot {
            id,
            callback: Box::new(listener),
            active: AtomicBool::new(true),
            delivered: Mutex::new(None),
        });

        let snapshot = {
            let mut state = self.shared.lock();
            state.listeners.push(Arc::clone(&slot));
            Arc::clone(&state.projects)
        };

        // 若并发的 add 已经投递了更新的列表，这次重放会被投递守卫跳过
        slot.deliver(&snapshot);

        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// 新增项目
    ///
    /// 以 `{ path }` 调用 `add_project`。成功时把宿主端返回的项目追加到列表，
    /// 同步通知所有订阅者，然后返回该项目。
    ///
    /// # 错误
    /// 远程调用失败时错误原样返回，列表保持不变，不通知任何订阅者。
    pub async fn add(&self, params: AddProjectParams) -> Result<Project, StoreError> {
        let project: Project = bridge::invoke(self.bridge.as_ref(), ADD_PROJECT, &params)
            .await
            .inspect_err(|e| log::warn!("添加项目 {} 失败: {}", params.path, e))?;

        log::info!("已添加项目 {} ({})", project.title, project.id);
        self.shared.append(project.clone());

        Ok(project)
    }

    /// 当前列表快照
    pub fn projects(&self) -> Arc<Vec<Project>> {
        Arc::clone(&self.shared.lock().projects)
    }

    pub fn len(&self) -> usize {
        self.shared.lock().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 订阅句柄
///
/// 相当于订阅函数返回的取消订阅能力。
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl Subscription {
    /// 取消订阅；之后不会再收到任何通知
    pub fn unsubscribe(self) {
        // 实际逻辑在 Drop 中
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove_listener(self.id);
        }
    }
}
