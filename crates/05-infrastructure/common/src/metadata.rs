//! 元数据定义
//!
//! 提供类型元数据，注册表、绑定表和实例缓存都以它为键

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性和哈希只取决于 [`TypeId`]，名称仅用于日志和错误信息。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（包含模块路径）
    pub type_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 `dyn Trait` 这样的非定长类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    ///
    /// `dyn smartphone_domain::battery::Battery` 会得到 `Battery`，
    /// 泛型参数中的路径同样会被去掉。
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.type_name.len());
        let mut segment = String::new();

        for ch in self.type_name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                segment.push(ch);
            } else {
                short.push_str(segment.rsplit("::").next().unwrap_or(&segment));
                segment.clear();
                short.push(ch);
            }
        }
        short.push_str(segment.rsplit("::").next().unwrap_or(&segment));

        short.trim_start_matches("dyn ").to_string()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}
