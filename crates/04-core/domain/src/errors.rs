//! 设备错误定义

use thiserror::Error;

/// 设备操作错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// 存储卡没有可用空间
    #[error("存储空间不足: 容量 {size}MB")]
    NoSpace {
        /// 存储卡容量
        size: u32,
    },

    /// 电池无法供电
    #[error("电池无法供电: {battery}")]
    NoPower {
        /// 电池名称
        battery: String,
    },

    /// 设备已关机
    #[error("设备已关机: {device}")]
    PoweredOff {
        /// 设备名称
        device: String,
    },
}

/// 设备操作结果
pub type DeviceResult<T> = Result<T, DeviceError>;
