//! 依赖声明
//!
//! 组件的依赖签名由元组类型推导：`Arc<T>` 表示可解析的组件或能力，
//! [`Param<K>`] 表示外部提供的配置参数。签名在注册时即可得到，
//! 容器据此在构建期验证整张依赖图。

use crate::resolver::{ResolveContext, Resolver, ResolverExt};
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// 单个依赖描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// 依赖另一个组件或能力
    Component(TypeInfo),
    /// 依赖外部提供的配置参数
    Parameter {
        /// 参数名
        name: &'static str,
        /// 参数值类型名
        value_type: &'static str,
    },
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(type_info) => write!(f, "{type_info}"),
            Self::Parameter { name, value_type } => write!(f, "param {name}: {value_type}"),
        }
    }
}

/// 参数键
///
/// 用零大小的标记类型为参数命名并约定参数值类型
pub trait ParameterKey: Send + Sync + 'static {
    /// 参数值类型
    type Value: DeserializeOwned + Send + Sync + 'static;

    /// 参数名
    const NAME: &'static str;
}

/// 注入的参数值
pub struct Param<K: ParameterKey> {
    value: K::Value,
    _key: PhantomData<K>,
}

impl<K: ParameterKey> Param<K> {
    /// 包装参数值
    pub fn new(value: K::Value) -> Self {
        Self {
            value,
            _key: PhantomData,
        }
    }

    /// 取出参数值
    pub fn into_inner(self) -> K::Value {
        self.value
    }
}

impl<K: ParameterKey> Deref for Param<K> {
    type Target = K::Value;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<K> fmt::Debug for Param<K>
where
    K: ParameterKey,
    K::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("name", &K::NAME)
            .field("value", &self.value)
            .finish()
    }
}

/// 依赖项 trait
///
/// 依赖元组中的每个元素都必须实现此 trait
pub trait DependencyItem: Sized + 'static {
    /// 依赖描述
    fn dependency() -> Dependency;

    /// 解析依赖值
    fn resolve(resolver: &dyn Resolver, ctx: &mut ResolveContext) -> DependencyResult<Self>;
}

impl<T> DependencyItem for Arc<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn dependency() -> Dependency {
        Dependency::Component(TypeInfo::of::<T>())
    }

    fn resolve(resolver: &dyn Resolver, ctx: &mut ResolveContext) -> DependencyResult<Self> {
        resolver.resolve_in::<T>(ctx)
    }
}

impl<K: ParameterKey> DependencyItem for Param<K> {
    fn dependency() -> Dependency {
        Dependency::Parameter {
            name: K::NAME,
            value_type: std::any::type_name::<K::Value>(),
        }
    }

    fn resolve(resolver: &dyn Resolver, ctx: &mut ResolveContext) -> DependencyResult<Self> {
        let raw = resolver
            .parameter(K::NAME)
            .ok_or_else(|| DependencyError::missing_parameter(K::NAME, ctx.required_by()))?;

        let value = serde_json::from_value::<K::Value>(raw).map_err(|e| {
            DependencyError::InvalidParameter {
                name: K::NAME.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self::new(value))
    }
}

/// 依赖集合 trait
///
/// 为 `()` 和最多 8 个元素的元组实现，元素按声明顺序从左到右解析
pub trait Dependencies: Sized + 'static {
    /// 依赖签名
    fn signature() -> Vec<Dependency>;

    /// 解析全部依赖
    fn resolve(resolver: &dyn Resolver, ctx: &mut ResolveContext) -> DependencyResult<Self>;
}

impl Dependencies for () {
    fn signature() -> Vec<Dependency> {
        Vec::new()
    }

    fn resolve(_resolver: &dyn Resolver, _ctx: &mut ResolveContext) -> DependencyResult<Self> {
        Ok(())
    }
}

macro_rules! impl_dependencies {
    ($($item:ident),+) => {
        impl<$($item: DependencyItem),+> Dependencies for ($($item,)+) {
            fn signature() -> Vec<Dependency> {
                vec![$($item::dependency()),+]
            }

            fn resolve(resolver: &dyn Resolver, ctx: &mut ResolveContext) -> DependencyResult<Self> {
                Ok(($($item::resolve(resolver, ctx)?,)+))
            }
        }
    };
}

impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, C);
impl_dependencies!(A, B, C, D);
impl_dependencies!(A, B, C, D, E);
impl_dependencies!(A, B, C, D, E, F);
impl_dependencies!(A, B, C, D, E, F, G);
impl_dependencies!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    trait Battery: Send + Sync {}
    struct MemorySize;

    impl ParameterKey for MemorySize {
        type Value = u32;
        const NAME: &'static str = "memory_size";
    }

    #[test]
    fn test_signature_follows_tuple_order() {
        let signature = <(Arc<dyn Battery>, Param<MemorySize>)>::signature();

        assert_eq!(signature.len(), 2);
        assert_eq!(signature[0], Dependency::Component(TypeInfo::of::<dyn Battery>()));
        assert_eq!(
            signature[1],
            Dependency::Parameter {
                name: "memory_size",
                value_type: "u32",
            }
        );
        assert_eq!(signature[1].to_string(), "param memory_size: u32");
        assert!(<()>::signature().is_empty());
    }

    #[test]
    fn test_param_derefs_to_value() {
        let size = Param::<MemorySize>::new(1000);
        assert_eq!(*size, 1000);
        assert_eq!(size.into_inner(), 1000);
    }
}
