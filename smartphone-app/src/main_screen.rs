//! 主界面

use di_abstractions::InjectionTarget;
use smartphone_domain::SmartPhone;
use std::sync::Arc;
use tracing::info;

/// 主界面
///
/// 界面由外部创建，容器只负责填充手机字段
#[derive(Debug, Default)]
pub struct MainScreen {
    smart_phone: Option<Arc<SmartPhone>>,
}

impl MainScreen {
    /// 点击拨号按钮
    pub fn on_call_button(&self) -> anyhow::Result<()> {
        let phone = self
            .smart_phone
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("主界面尚未注入手机"))?;

        phone.make_a_call_with_recording()?;
        info!("通话完成, 累计 {} 次", phone.calls_made());
        Ok(())
    }
}

impl InjectionTarget for MainScreen {
    type Fields = (Arc<SmartPhone>,);

    fn assign(&mut self, (smart_phone,): Self::Fields) {
        self.smart_phone = Some(smart_phone);
    }
}
