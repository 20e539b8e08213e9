//! 组件注册信息

use di_abstractions::{downcast, AnyInstance, ComponentFactory};
use infrastructure_common::{Disposable, Lifetime};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub(crate) type DisposeError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) type DisposeFuture = Pin<Box<dyn Future<Output = Result<(), DisposeError>> + Send>>;

/// 销毁函数类型
pub(crate) type Disposer = Arc<dyn Fn(AnyInstance) -> DisposeFuture + Send + Sync>;

/// 为实现了 [`Disposable`] 的组件生成销毁函数
pub(crate) fn disposer_for<T>() -> Disposer
where
    T: Disposable + 'static,
{
    Arc::new(|instance: AnyInstance| -> DisposeFuture {
        Box::pin(async move {
            let component = downcast::<T>(&instance).map_err(|e| Box::new(e) as DisposeError)?;
            component.dispose().await
        })
    })
}

/// 组件注册信息
#[derive(Clone)]
pub(crate) struct Registration {
    /// 组件工厂
    pub factory: Arc<dyn ComponentFactory>,
    /// 组件生命周期
    pub lifetime: Lifetime,
    /// 销毁函数（仅单例）
    pub disposer: Option<Disposer>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("component", &self.factory.name())
            .field("lifetime", &self.lifetime)
            .field("dependencies", &self.factory.dependencies())
            .field("disposable", &self.disposer.is_some())
            .finish()
    }
}
