//! 智能手机

use crate::battery::Battery;
use crate::errors::{DeviceError, DeviceResult};
use crate::memory_card::MemoryCard;
use crate::sim_card::SimCard;
use async_trait::async_trait;
use di_abstractions::Injectable;
use infrastructure_common::Disposable;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// 智能手机
///
/// 构建时依次检查供电、网络连接和存储空间，任何一项失败都不会得到手机实例。
/// 容器中只有一部手机，容器销毁时关机。
pub struct SmartPhone {
    battery: Arc<dyn Battery>,
    sim_card: Arc<SimCard>,
    memory_card: Arc<MemoryCard>,
    calls: AtomicUsize,
    powered_off: AtomicBool,
}

impl SmartPhone {
    /// 组装手机并完成开机自检
    pub fn new(
        battery: Arc<dyn Battery>,
        sim_card: Arc<SimCard>,
        memory_card: Arc<MemoryCard>,
    ) -> DeviceResult<Self> {
        battery.get_power()?;
        sim_card.get_connection()?;
        memory_card.get_space_availability()?;
        info!("智能手机已构建");

        Ok(Self {
            battery,
            sim_card,
            memory_card,
            calls: AtomicUsize::new(0),
            powered_off: AtomicBool::new(false),
        })
    }

    /// 拨打电话并录音
    pub fn make_a_call_with_recording(&self) -> DeviceResult<()> {
        if self.is_powered_off() {
            return Err(DeviceError::PoweredOff {
                device: "SmartPhone".to_string(),
            });
        }

        self.memory_card.get_space_availability()?;
        self.calls.fetch_add(1, Ordering::Relaxed);
        info!("正在通话.....");
        Ok(())
    }

    /// 已拨打的电话数
    pub fn calls_made(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// 是否已关机
    pub fn is_powered_off(&self) -> bool {
        self.powered_off.load(Ordering::Acquire)
    }

    /// 电池
    pub fn battery(&self) -> &Arc<dyn Battery> {
        &self.battery
    }

    /// SIM 卡
    pub fn sim_card(&self) -> &Arc<SimCard> {
        &self.sim_card
    }

    /// 存储卡
    pub fn memory_card(&self) -> &Arc<MemoryCard> {
        &self.memory_card
    }
}

impl Injectable for SmartPhone {
    type Dependencies = (Arc<dyn Battery>, Arc<SimCard>, Arc<MemoryCard>);
    type Error = DeviceError;

    fn inject((battery, sim_card, memory_card): Self::Dependencies) -> Result<Self, Self::Error> {
        Self::new(battery, sim_card, memory_card)
    }
}

#[async_trait]
impl Disposable for SmartPhone {
    async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.powered_off.store(true, Ordering::Release);
        info!("智能手机已关机, 共拨打 {} 次电话", self.calls_made());
        Ok(())
    }
}

impl std::fmt::Debug for SmartPhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartPhone")
            .field("battery", &self.battery.name())
            .field("sim_card", &self.sim_card)
            .field("memory_card", &self.memory_card)
            .field("calls", &self.calls_made())
            .field("powered_off", &self.is_powered_off())
            .finish()
    }
}
