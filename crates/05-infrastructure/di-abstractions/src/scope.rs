//! 作用域管理抽象接口

use infrastructure_common::{Lifetime, TypeInfo};

/// 作用域管理器 trait
///
/// 解析器在决定是否查询、填充实例缓存之前先查询组件的生命周期
pub trait ScopeManager: Send + Sync {
    /// 查询组件的生命周期，未注册的类型返回 `None`
    fn scope_of(&self, type_info: &TypeInfo) -> Option<Lifetime>;

    /// 所有单例组件
    fn singletons(&self) -> Vec<TypeInfo>;

    /// 是否为单例组件
    fn is_singleton(&self, type_info: &TypeInfo) -> bool {
        self.scope_of(type_info)
            .is_some_and(Lifetime::is_singleton)
    }
}
