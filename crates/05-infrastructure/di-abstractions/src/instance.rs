//! 类型擦除的组件实例

use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除后的实例
///
/// 内部总是保存一个 `Arc<T>`，因此 `T` 可以是 `dyn Trait` 这样的非定长类型。
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// 擦除实例类型
pub fn erase<T>(instance: Arc<T>) -> AnyInstance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(instance)
}

/// 还原实例类型
pub fn downcast<T>(instance: &AnyInstance) -> DependencyResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| DependencyError::TypeMismatch {
            expected: TypeInfo::of::<T>().short_name(),
        })
}
