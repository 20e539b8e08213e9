//! 容器构建器实现

use crate::bindings::BindingRegistryImpl;
use crate::container::DiContainerImpl;
use crate::module::Module;
use crate::registration::{disposer_for, Disposer, Registration};
use di_abstractions::{
    Binding, BindingRegistry, ComponentFactory, ContainerBuilder, ContainerConfig, Dependencies,
    DiContainer, Implements, Injectable, InjectableFactory, InstanceFactory, LambdaFactory,
    ParameterKey,
};
use infrastructure_common::{DependencyError, DependencyResult, Disposable, Lifetime, TypeInfo};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 容器构建器实现
///
/// 组合根在启动时使用它注册组件、绑定能力和设置参数。
/// 重复注册和重复绑定会立即失败，而不是等到解析时才发现。
#[derive(Debug, Default)]
pub struct DiContainerBuilder {
    config: ContainerConfig,
    registrations: HashMap<TypeInfo, Registration>,
    order: Vec<TypeInfo>,
    bindings: BindingRegistryImpl,
    parameters: HashMap<String, serde_json::Value>,
}

impl DiContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 注册单例组件
    pub fn register_singleton<T: Injectable>(self) -> DependencyResult<Self> {
        self.register::<T>(Lifetime::Singleton)
    }

    /// 注册瞬时组件
    pub fn register_transient<T: Injectable>(self) -> DependencyResult<Self> {
        self.register::<T>(Lifetime::Transient)
    }

    /// 按参数键设置类型化参数
    pub fn set_param<K>(self, value: K::Value) -> DependencyResult<Self>
    where
        K: ParameterKey,
        K::Value: Serialize,
    {
        self.set_parameter(K::NAME, value)
    }

    /// 批量设置参数，已有的同名参数会被覆盖
    pub fn with_parameters(
        mut self,
        parameters: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) -> Self {
        for (name, value) in parameters {
            self.insert_parameter(name, value);
        }
        self
    }

    /// 安装模块
    pub fn install<M: Module + ?Sized>(self, module: &M) -> DependencyResult<Self> {
        info!("安装模块: {}", module.name());
        module.configure(self)
    }

    /// 已设置的参数名
    pub fn parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parameters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn insert_parameter(&mut self, name: String, value: serde_json::Value) {
        if let Some(previous) = self.parameters.insert(name.clone(), value) {
            debug!("覆盖参数: {} (原值: {})", name, previous);
        } else {
            debug!("设置参数: {}", name);
        }
    }

    fn add_registration(
        mut self,
        factory: Arc<dyn ComponentFactory>,
        lifetime: Lifetime,
        disposer: Option<Disposer>,
    ) -> DependencyResult<Self> {
        let type_info = factory.component_type();

        if self.registrations.contains_key(&type_info) {
            return Err(DependencyError::RegistrationError {
                type_name: type_info.short_name(),
                message: "组件已注册".to_string(),
            });
        }

        if let Some(binding) = self.bindings.binding_for(&type_info) {
            return Err(DependencyError::RegistrationError {
                type_name: type_info.short_name(),
                message: format!("该类型已作为能力绑定到 {}", binding.implementation),
            });
        }

        info!("注册组件: {} ({})", type_info, lifetime);
        self.order.push(type_info);
        self.registrations.insert(
            type_info,
            Registration {
                factory,
                lifetime,
                disposer,
            },
        );
        Ok(self)
    }
}

impl ContainerBuilder for DiContainerBuilder {
    type Container = DiContainerImpl;

    fn register<T>(self, lifetime: Lifetime) -> DependencyResult<Self>
    where
        T: Injectable,
    {
        self.add_registration(Arc::new(InjectableFactory::<T>::new()), lifetime, None)
    }

    fn register_factory<T, D, F>(self, lifetime: Lifetime, factory: F) -> DependencyResult<Self>
    where
        T: Send + Sync + 'static,
        D: Dependencies,
        F: Fn(D) -> T + Send + Sync + 'static,
    {
        self.add_registration(Arc::new(LambdaFactory::<T, D, F>::new(factory)), lifetime, None)
    }

    fn register_instance<T>(self, instance: Arc<T>) -> DependencyResult<Self>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.add_registration(
            Arc::new(InstanceFactory::new(instance)),
            Lifetime::Singleton,
            None,
        )
    }

    fn register_disposable<T>(self) -> DependencyResult<Self>
    where
        T: Injectable + Disposable,
    {
        self.add_registration(
            Arc::new(InjectableFactory::<T>::new()),
            Lifetime::Singleton,
            Some(disposer_for::<T>()),
        )
    }

    fn bind<C, I>(mut self) -> DependencyResult<Self>
    where
        C: ?Sized + Send + Sync + 'static,
        I: Implements<C>,
    {
        let binding = Binding::of::<C, I>();

        if self.registrations.contains_key(&binding.capability) {
            return Err(DependencyError::DuplicateBinding {
                capability: binding.capability.short_name(),
                existing: binding.capability.short_name(),
                attempted: binding.implementation.short_name(),
            });
        }

        self.bindings.bind(binding)?;
        Ok(self)
    }

    fn set_parameter<V>(mut self, name: impl Into<String>, value: V) -> DependencyResult<Self>
    where
        V: Serialize,
    {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| DependencyError::InvalidParameter {
            name: name.clone(),
            message: e.to_string(),
        })?;

        self.insert_parameter(name, value);
        Ok(self)
    }

    fn build(self) -> DependencyResult<Self::Container> {
        let validate = self.config.enable_component_validation;
        let container = DiContainerImpl::new(
            self.config,
            self.registrations,
            self.order,
            self.bindings,
            self.parameters,
        );

        if validate {
            if let Err(errors) = container.validate() {
                for e in &errors {
                    error!("容器验证失败: {}", e);
                }
                if let Some(first) = errors.into_iter().next() {
                    return Err(first);
                }
            }
        } else if let Err(e) = container.validator().check_singleton_cycles() {
            error!("容器验证失败: {}", e);
            return Err(e);
        }

        let stats = container.stats();
        info!(
            "构建容器完成: {}, 注册了 {} 个组件, {} 个能力绑定",
            container.id(),
            stats.registered_components,
            stats.bound_capabilities
        );
        Ok(container)
    }
}
