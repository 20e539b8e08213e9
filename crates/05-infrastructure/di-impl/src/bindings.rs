//! 绑定注册表实现

use di_abstractions::{Binding, BindingRegistry};
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::collections::HashMap;
use tracing::info;

/// 绑定注册表实现
///
/// 按注册顺序保存绑定，每个能力只允许一个实现
#[derive(Debug, Default, Clone)]
pub struct BindingRegistryImpl {
    bindings: HashMap<TypeInfo, Binding>,
    order: Vec<TypeInfo>,
}

impl BindingRegistryImpl {
    /// 创建空的绑定注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 已绑定能力数量
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 绑定到指定实现的所有能力
    pub fn capabilities_of(&self, implementation: &TypeInfo) -> Vec<TypeInfo> {
        self.order
            .iter()
            .filter(|capability| {
                self.bindings
                    .get(*capability)
                    .is_some_and(|binding| binding.implementation == *implementation)
            })
            .copied()
            .collect()
    }
}

impl BindingRegistry for BindingRegistryImpl {
    fn bind(&mut self, binding: Binding) -> DependencyResult<()> {
        if let Some(existing) = self.bindings.get(&binding.capability) {
            return Err(DependencyError::DuplicateBinding {
                capability: binding.capability.short_name(),
                existing: existing.implementation.short_name(),
                attempted: binding.implementation.short_name(),
            });
        }

        info!(
            "绑定能力: {} -> {}",
            binding.capability, binding.implementation
        );
        self.order.push(binding.capability);
        self.bindings.insert(binding.capability, binding);
        Ok(())
    }

    fn binding_for(&self, capability: &TypeInfo) -> Option<&Binding> {
        self.bindings.get(capability)
    }

    fn bindings(&self) -> Vec<Binding> {
        self.order
            .iter()
            .filter_map(|capability| self.bindings.get(capability).cloned())
            .collect()
    }
}
