//! 组件工厂抽象接口
//!
//! 提供组件实例创建的工厂模式支持

use crate::dependency::{Dependencies, Dependency};
use crate::injectable::Injectable;
use crate::instance::{erase, AnyInstance};
use crate::resolver::{ResolveContext, Resolver};
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::marker::PhantomData;
use std::sync::Arc;

/// 组件工厂 trait
///
/// 用于创建组件实例
pub trait ComponentFactory: Send + Sync {
    /// 获取工厂支持的组件类型
    fn component_type(&self) -> TypeInfo;

    /// 获取工厂名称
    fn name(&self) -> String {
        self.component_type().short_name()
    }

    /// 获取所需的依赖
    fn dependencies(&self) -> Vec<Dependency>;

    /// 解析依赖并创建组件实例
    fn create(
        &self,
        resolver: &dyn Resolver,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance>;
}

/// 构造函数注入工厂
pub struct InjectableFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Injectable> InjectableFactory<T> {
    /// 创建新的构造函数注入工厂
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Injectable> Default for InjectableFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Injectable> ComponentFactory for InjectableFactory<T> {
    fn component_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn dependencies(&self) -> Vec<Dependency> {
        T::Dependencies::signature()
    }

    fn create(
        &self,
        resolver: &dyn Resolver,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        let deps = T::Dependencies::resolve(resolver, ctx)?;
        let component = T::inject(deps).map_err(|e| DependencyError::ComponentCreationFailed {
            type_name: self.name(),
            source: Box::new(e),
        })?;
        Ok(erase(Arc::new(component)))
    }
}

/// Lambda 工厂包装器
///
/// 对应模块中的提供函数：依赖由 `D` 声明，函数负责组装实例
pub struct LambdaFactory<T, D, F> {
    factory_fn: F,
    _marker: PhantomData<fn(D) -> T>,
}

impl<T, D, F> LambdaFactory<T, D, F>
where
    T: Send + Sync + 'static,
    D: Dependencies,
    F: Fn(D) -> T + Send + Sync + 'static,
{
    /// 创建新的 Lambda 工厂
    pub fn new(factory_fn: F) -> Self {
        Self {
            factory_fn,
            _marker: PhantomData,
        }
    }
}

impl<T, D, F> ComponentFactory for LambdaFactory<T, D, F>
where
    T: Send + Sync + 'static,
    D: Dependencies,
    F: Fn(D) -> T + Send + Sync + 'static,
{
    fn component_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn dependencies(&self) -> Vec<Dependency> {
        D::signature()
    }

    fn create(
        &self,
        resolver: &dyn Resolver,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        let deps = D::resolve(resolver, ctx)?;
        Ok(erase(Arc::new((self.factory_fn)(deps))))
    }
}

/// 预先构建的实例
pub struct InstanceFactory<T: ?Sized> {
    instance: Arc<T>,
}

impl<T> InstanceFactory<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// 包装已有实例
    pub fn new(instance: Arc<T>) -> Self {
        Self { instance }
    }
}

impl<T> ComponentFactory for InstanceFactory<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn component_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    fn create(
        &self,
        _resolver: &dyn Resolver,
        _ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        Ok(erase(self.instance.clone()))
    }
}
