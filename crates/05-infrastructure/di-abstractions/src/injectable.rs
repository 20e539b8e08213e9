//! 可注入组件与能力绑定

use crate::dependency::Dependencies;
use std::sync::Arc;

/// 可注入组件 trait
///
/// 支持构造函数注入的组件必须实现此 trait。`Dependencies` 是依赖元组，
/// 容器会先按顺序解析元组中的每一项，再调用 [`Injectable::inject`]。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 依赖类型
    type Dependencies: Dependencies;

    /// 构建错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 使用依赖注入构建组件实例
    fn inject(deps: Self::Dependencies) -> Result<Self, Self::Error>;
}

/// 能力实现 trait
///
/// 声明具体类型 `Self` 可以作为能力 `C`（通常是 `dyn Trait`）使用。
/// 一般通过 [`implements!`](crate::implements) 宏生成。
pub trait Implements<C>: Send + Sync + 'static
where
    C: ?Sized + Send + Sync + 'static,
{
    /// 转换为能力类型
    fn upcast(self: Arc<Self>) -> Arc<C>;
}

/// 为具体类型实现一个或多个能力
///
/// ```rust,ignore
/// implements!(NickelCadmiumBattery => dyn Battery);
/// ```
#[macro_export]
macro_rules! implements {
    ($concrete:ty => $($capability:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$capability> for $concrete {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$capability> {
                    self
                }
            }
        )+
    };
}

/// 字段注入目标
///
/// 用于由外部创建、容器不拥有的对象（例如界面入口）。
/// 容器先解析全部字段，全部成功后才调用 [`InjectionTarget::assign`]，
/// 因此目标对象不会被部分注入。
pub trait InjectionTarget: 'static {
    /// 需要注入的字段
    type Fields: Dependencies;

    /// 写入已解析的字段
    fn assign(&mut self, fields: Self::Fields);
}
