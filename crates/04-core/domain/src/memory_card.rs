//! 存储卡

use crate::errors::{DeviceError, DeviceResult};
use di_abstractions::ParameterKey;
use tracing::info;

/// 存储卡容量参数（MB）
#[derive(Debug)]
pub struct MemorySize;

impl ParameterKey for MemorySize {
    type Value = u32;
    const NAME: &'static str = "memory_size";
}

/// 存储卡
///
/// 容量只能由外部提供，因此它没有构造函数注入，由提供函数创建
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCard {
    size: u32,
}

impl MemoryCard {
    /// 创建指定容量的存储卡
    pub fn new(size: u32) -> Self {
        info!("存储卡已构建");
        Self { size }
    }

    /// 容量（MB）
    pub fn size(&self) -> u32 {
        self.size
    }

    /// 检查可用空间，返回可用容量
    pub fn get_space_availability(&self) -> DeviceResult<u32> {
        if self.size == 0 {
            return Err(DeviceError::NoSpace { size: self.size });
        }

        info!("存储空间可用: {}MB", self.size);
        Ok(self.size)
    }
}
