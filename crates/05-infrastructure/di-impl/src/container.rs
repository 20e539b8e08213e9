//! 依赖注入容器实现

use crate::bindings::BindingRegistryImpl;
use crate::cache::InstanceCache;
use crate::registration::Registration;
use crate::scope::ScopeManagerImpl;
use crate::validation::GraphValidator;
use async_trait::async_trait;
use di_abstractions::{
    AnyInstance, BindingRegistry, ComponentDescriptor, ContainerConfig, ContainerStats,
    Dependencies, DiContainer, InjectionTarget, ResolveContext, Resolver, ResolverExt,
    ScopeManager,
};
use infrastructure_common::{
    DependencyError, DependencyResult, Lifetime, LifecycleState, TypeInfo,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 具体的依赖注入容器实现
///
/// 注册信息、绑定和参数在构建后不可变；只有单例缓存和统计计数会变化。
/// 容器可以跨线程共享，单例在并发解析时也只会构建一次。
pub struct DiContainerImpl {
    id: Uuid,
    config: ContainerConfig,
    registrations: HashMap<TypeInfo, Registration>,
    order: Vec<TypeInfo>,
    bindings: BindingRegistryImpl,
    scopes: ScopeManagerImpl,
    cache: InstanceCache,
    parameters: HashMap<String, serde_json::Value>,
    state: RwLock<LifecycleState>,
    resolutions: AtomicUsize,
    constructions: AtomicUsize,
    resolution_errors: AtomicUsize,
}

impl DiContainerImpl {
    pub(crate) fn new(
        config: ContainerConfig,
        registrations: HashMap<TypeInfo, Registration>,
        order: Vec<TypeInfo>,
        bindings: BindingRegistryImpl,
        parameters: HashMap<String, serde_json::Value>,
    ) -> Self {
        let scopes = ScopeManagerImpl::new(
            order
                .iter()
                .filter_map(|type_info| {
                    registrations
                        .get(type_info)
                        .map(|registration| (*type_info, registration.lifetime))
                }),
        );
        let cache = InstanceCache::new(scopes.singletons());

        Self {
            id: Uuid::new_v4(),
            config,
            registrations,
            order,
            bindings,
            scopes,
            cache,
            parameters,
            state: RwLock::new(LifecycleState::Running),
            resolutions: AtomicUsize::new(0),
            constructions: AtomicUsize::new(0),
            resolution_errors: AtomicUsize::new(0),
        }
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 容器生命周期状态
    pub fn state(&self) -> LifecycleState {
        *self.state.read()
    }

    /// 作用域管理器
    pub fn scopes(&self) -> &ScopeManagerImpl {
        &self.scopes
    }

    /// 绑定注册表
    pub fn bindings(&self) -> &BindingRegistryImpl {
        &self.bindings
    }

    /// 已注册组件的构建顺序：每个依赖都排在依赖它的组件之前
    pub fn construction_order(&self) -> DependencyResult<Vec<TypeInfo>> {
        self.validator().construction_order()
    }

    /// 已构建单例的类型，按构建顺序排列
    pub fn singleton_construction_log(&self) -> Vec<TypeInfo> {
        self.cache.construction_log()
    }

    pub(crate) fn validator(&self) -> GraphValidator<'_> {
        GraphValidator {
            registrations: &self.registrations,
            order: &self.order,
            bindings: &self.bindings,
            parameters: &self.parameters,
        }
    }

    fn new_context(&self) -> ResolveContext {
        ResolveContext::new(self.config.resolve_options())
    }

    fn ensure_running(&self, type_info: &TypeInfo) -> DependencyResult<()> {
        match *self.state.read() {
            LifecycleState::Running => Ok(()),
            LifecycleState::Disposing | LifecycleState::Disposed => {
                Err(DependencyError::ContainerDisposed {
                    type_name: type_info.short_name(),
                })
            }
        }
    }

    fn track<T>(&self, type_info: &TypeInfo, result: DependencyResult<T>) -> DependencyResult<T> {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = &result {
            self.resolution_errors.fetch_add(1, Ordering::Relaxed);
            error!("解析失败: {}, 原因: {}", type_info, e);
        }
        result
    }

    /// 通过绑定解析能力
    fn resolve_capability(
        &self,
        capability: TypeInfo,
        ctx: &mut ResolveContext,
    ) -> Option<DependencyResult<AnyInstance>> {
        let binding = self.bindings.binding_for(&capability)?;

        let result = ctx.push_type(capability).and_then(|()| {
            let result = self
                .resolve_erased(binding.implementation, ctx)
                .and_then(|instance| binding.upcast(&instance));
            ctx.pop_type();
            result
        });

        Some(result)
    }

    /// 解析已注册的具体组件
    fn resolve_registered(
        &self,
        type_info: TypeInfo,
        registration: &Registration,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        let lifetime = self.scopes.scope_of(&type_info).unwrap_or_default();

        if lifetime.is_singleton() {
            if let Some(instance) = self.cache.get(&type_info) {
                debug!("命中单例缓存: {}", type_info);
                return Ok(instance);
            }
        }

        // 单例单元不可重入，因此单例总是检测循环依赖
        if lifetime.is_singleton() {
            ctx.push_type_checked(type_info)?;
        } else {
            ctx.push_type(type_info)?;
        }

        let result = match lifetime {
            Lifetime::Singleton => self
                .cache
                .get_or_try_init(type_info, || self.construct(type_info, registration, ctx)),
            Lifetime::Transient => self.construct(type_info, registration, ctx),
        };
        ctx.pop_type();

        result
    }

    fn construct(
        &self,
        type_info: TypeInfo,
        registration: &Registration,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        debug!("构建组件: {} ({})", type_info, registration.lifetime);
        let instance = registration.factory.create(self, ctx)?;
        self.constructions.fetch_add(1, Ordering::Relaxed);
        Ok(instance)
    }
}

impl Resolver for DiContainerImpl {
    fn resolve_erased(
        &self,
        type_info: TypeInfo,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance> {
        self.ensure_running(&type_info)?;

        if let Some(result) = self.resolve_capability(type_info, ctx) {
            return result;
        }

        let registration = self
            .registrations
            .get(&type_info)
            .ok_or_else(|| DependencyError::unbound(type_info.short_name(), ctx.required_by()))?;

        self.resolve_registered(type_info, registration, ctx)
    }

    fn parameter(&self, name: &str) -> Option<serde_json::Value> {
        self.parameters.get(name).cloned()
    }

    fn can_resolve(&self, type_info: &TypeInfo) -> bool {
        self.registrations.contains_key(type_info) || self.bindings.binding_for(type_info).is_some()
    }
}

#[async_trait]
impl DiContainer for DiContainerImpl {
    fn resolve<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_info = TypeInfo::of::<T>();
        let mut ctx = self.new_context();
        let result = self.resolve_in::<T>(&mut ctx);
        self.track(&type_info, result)
    }

    fn inject_fields<T>(&self, target: &mut T) -> DependencyResult<()>
    where
        T: InjectionTarget,
    {
        let type_info = TypeInfo::of::<T>();
        info!("注入字段: {}", type_info);

        let mut ctx = self.new_context();
        let result = T::Fields::resolve(self, &mut ctx);
        let fields = self.track(&type_info, result)?;
        target.assign(fields);
        Ok(())
    }

    fn registered_components(&self) -> Vec<ComponentDescriptor> {
        self.order
            .iter()
            .filter_map(|type_info| {
                self.registrations
                    .get(type_info)
                    .map(|registration| ComponentDescriptor {
                        type_info: *type_info,
                        lifetime: registration.lifetime,
                        dependencies: registration.factory.dependencies(),
                        capabilities: self.bindings.capabilities_of(type_info),
                        disposable: registration.disposer.is_some(),
                    })
            })
            .collect()
    }

    fn validate(&self) -> Result<(), Vec<DependencyError>> {
        info!("验证容器状态: {}", self.id);
        self.validator().validate()
    }

    fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_components: self.registrations.len(),
            bound_capabilities: self.bindings.len(),
            active_singletons: self.cache.len(),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            constructions: self.constructions.load(Ordering::Relaxed),
            resolution_errors: self.resolution_errors.load(Ordering::Relaxed),
        }
    }

    async fn dispose(&self) -> DependencyResult<()> {
        {
            let mut state = self.state.write();
            if *state != LifecycleState::Running {
                warn!("容器已销毁: {}", self.id);
                return Ok(());
            }
            *state = LifecycleState::Disposing;
        }

        info!("开始销毁容器: {}", self.id);

        let constructed = self.cache.drain();
        let mut first_error = None;

        for (type_info, instance) in constructed.into_iter().rev() {
            let Some(disposer) = self
                .registrations
                .get(&type_info)
                .and_then(|registration| registration.disposer.clone())
            else {
                continue;
            };

            debug!("销毁组件: {}", type_info);
            if let Err(e) = disposer(instance).await {
                error!("组件销毁失败: {}, 原因: {}", type_info, e);
                first_error.get_or_insert(DependencyError::DisposalFailed {
                    type_name: type_info.short_name(),
                    message: e.to_string(),
                });
            }
        }

        *self.state.write() = LifecycleState::Disposed;
        info!("容器销毁完成: {}", self.id);

        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for DiContainerImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiContainerImpl")
            .field("id", &self.id)
            .field("registrations", &self.order.len())
            .field("bindings", &self.bindings.len())
            .field("parameters", &self.parameters.keys().collect::<Vec<_>>())
            .field("state", &self.state())
            .finish()
    }
}
