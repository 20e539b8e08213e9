//! 作用域管理器实现

use di_abstractions::ScopeManager;
use infrastructure_common::{Lifetime, TypeInfo};
use std::collections::HashMap;

/// 作用域管理器实现
///
/// 在容器构建时由注册信息生成，之后不可变
#[derive(Debug, Default, Clone)]
pub struct ScopeManagerImpl {
    lifetimes: HashMap<TypeInfo, Lifetime>,
    order: Vec<TypeInfo>,
}

impl ScopeManagerImpl {
    /// 由 (类型, 生命周期) 列表创建
    pub fn new(entries: impl IntoIterator<Item = (TypeInfo, Lifetime)>) -> Self {
        let mut manager = Self::default();
        for (type_info, lifetime) in entries {
            if manager.lifetimes.insert(type_info, lifetime).is_none() {
                manager.order.push(type_info);
            }
        }
        manager
    }
}

impl ScopeManager for ScopeManagerImpl {
    fn scope_of(&self, type_info: &TypeInfo) -> Option<Lifetime> {
        self.lifetimes.get(type_info).copied()
    }

    fn singletons(&self) -> Vec<TypeInfo> {
        self.order
            .iter()
            .filter(|type_info| self.is_singleton(type_info))
            .copied()
            .collect()
    }
}
