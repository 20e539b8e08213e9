//! 单例实例缓存

use di_abstractions::AnyInstance;
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 单例实例缓存
///
/// 每个单例类型在容器构建时预先分配一个只初始化一次的单元，
/// 并发请求同一个单例时只有一个线程执行构建，其余线程等待并得到同一个实例。
#[derive(Debug, Default)]
pub struct InstanceCache {
    cells: RwLock<HashMap<TypeInfo, Arc<OnceCell<AnyInstance>>>>,
    /// 已构建的单例，按构建完成的顺序排列
    constructed: Mutex<Vec<(TypeInfo, AnyInstance)>>,
}

impl InstanceCache {
    /// 为给定的单例类型创建缓存
    pub fn new(singletons: impl IntoIterator<Item = TypeInfo>) -> Self {
        let cells = singletons
            .into_iter()
            .map(|type_info| (type_info, Arc::new(OnceCell::new())))
            .collect();

        Self {
            cells: RwLock::new(cells),
            constructed: Mutex::new(Vec::new()),
        }
    }

    /// 获取已缓存的实例
    pub fn get(&self, type_info: &TypeInfo) -> Option<AnyInstance> {
        self.cells
            .read()
            .get(type_info)
            .and_then(|cell| cell.get().cloned())
    }

    /// 获取缓存的实例，不存在时调用 `init` 构建并缓存
    pub fn get_or_try_init<F>(&self, type_info: TypeInfo, init: F) -> DependencyResult<AnyInstance>
    where
        F: FnOnce() -> DependencyResult<AnyInstance>,
    {
        // 只在取单元格时持有读锁，构建期间不持锁
        let cell = self
            .cells
            .read()
            .get(&type_info)
            .cloned()
            .ok_or_else(|| DependencyError::ContainerDisposed {
                type_name: type_info.short_name(),
            })?;

        if let Some(instance) = cell.get() {
            debug!("命中单例缓存: {}", type_info);
            return Ok(instance.clone());
        }

        let instance = cell.get_or_try_init(|| {
            let instance = init()?;
            self.constructed.lock().push((type_info, instance.clone()));
            Ok::<_, DependencyError>(instance)
        })?;

        Ok(instance.clone())
    }

    /// 已构建的单例数量
    pub fn len(&self) -> usize {
        self.constructed.lock().len()
    }

    /// 是否还没有构建任何单例
    pub fn is_empty(&self) -> bool {
        self.constructed.lock().is_empty()
    }

    /// 已构建单例的类型，按构建顺序排列
    pub fn construction_log(&self) -> Vec<TypeInfo> {
        self.constructed
            .lock()
            .iter()
            .map(|(type_info, _)| *type_info)
            .collect()
    }

    /// 清空缓存，返回已构建的单例（按构建顺序）
    pub fn drain(&self) -> Vec<(TypeInfo, AnyInstance)> {
        self.cells.write().clear();
        std::mem::take(&mut *self.constructed.lock())
    }
}
