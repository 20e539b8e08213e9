//! 电池

use crate::errors::DeviceResult;
use di_abstractions::Injectable;
use std::convert::Infallible;
use tracing::info;

/// 电池能力
///
/// 手机只依赖这个能力，具体使用哪种电池由组合根的绑定决定
pub trait Battery: Send + Sync {
    /// 电池名称
    fn name(&self) -> &'static str;

    /// 为设备供电
    fn get_power(&self) -> DeviceResult<()>;
}

/// 镍镉电池
#[derive(Debug, Default)]
pub struct NickelCadmiumBattery;

impl Battery for NickelCadmiumBattery {
    fn name(&self) -> &'static str {
        "NickelCadmiumBattery"
    }

    fn get_power(&self) -> DeviceResult<()> {
        info!("从镍镉电池获取电量");
        Ok(())
    }
}

impl Injectable for NickelCadmiumBattery {
    type Dependencies = ();
    type Error = Infallible;

    fn inject((): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

di_abstractions::implements!(NickelCadmiumBattery => dyn Battery);
