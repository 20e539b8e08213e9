//! 应用构建器

use crate::application::SmartPhoneApplication;
use crate::bootstrapper::ApplicationBootstrapper;
use crate::config_sources::ParameterSources;
use crate::modules::SmartPhoneComponent;
use di_abstractions::{ContainerConfig, ParameterKey};
use di_impl::Module;
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use serde::Serialize;
use smartphone_domain::MemorySize;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 应用构建器
///
/// 使用建造者模式构建智能手机应用
pub struct ApplicationBuilder {
    /// 参数源
    parameter_sources: ParameterSources,
    /// 需要安装的模块
    modules: Vec<Box<dyn Module>>,
    /// 容器配置
    container_config: ContainerConfig,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器，默认安装 [`SmartPhoneComponent`] 的全部模块
    pub fn new() -> Self {
        Self {
            parameter_sources: ParameterSources::new(),
            modules: SmartPhoneComponent::modules(),
            container_config: ContainerConfig::default(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加 TOML 参数文件
    pub fn add_config_toml<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InfrastructureError::BootstrapFailed {
                message: format!("配置文件不存在: {}", path.display()),
            });
        }

        info!("添加 TOML 配置文件: {}", path.display());
        self.parameter_sources = self.parameter_sources.add_toml_file(path, true);
        Ok(self)
    }

    /// 添加 JSON 参数文件
    pub fn add_config_json<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InfrastructureError::BootstrapFailed {
                message: format!("配置文件不存在: {}", path.display()),
            });
        }

        info!("添加 JSON 配置文件: {}", path.display());
        self.parameter_sources = self.parameter_sources.add_json_file(path, true);
        Ok(self)
    }

    /// 添加环境变量参数源
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        info!("添加环境变量配置源，前缀: {}", prefix);
        self.parameter_sources = self.parameter_sources.add_environment(prefix);
        self
    }

    /// 显式设置参数，覆盖所有参数源
    pub fn with_parameter<V: Serialize>(
        mut self,
        name: impl Into<String>,
        value: V,
    ) -> InfrastructureResult<Self> {
        self.parameter_sources = self.parameter_sources.add_override(name, value)?;
        Ok(self)
    }

    /// 设置存储卡容量
    pub fn with_memory_size(self, memory_size: u32) -> InfrastructureResult<Self> {
        self.with_parameter(MemorySize::NAME, memory_size)
    }

    /// 追加模块
    pub fn add_module<M: Module + 'static>(mut self, module: M) -> Self {
        info!("添加模块: {}", module.name());
        self.modules.push(Box::new(module));
        self
    }

    /// 替换全部模块
    pub fn with_modules(mut self, modules: Vec<Box<dyn Module>>) -> Self {
        self.modules = modules;
        self
    }

    /// 设置容器配置
    pub fn with_container_config(mut self, config: ContainerConfig) -> Self {
        self.container_config = config;
        self
    }

    /// 启用或禁用构建期依赖图验证
    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.container_config.enable_component_validation = enabled;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建应用实例
    pub fn build(self) -> InfrastructureResult<SmartPhoneApplication> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.logging_config.initialize()?;
        }

        info!("开始构建应用");
        ApplicationBootstrapper::new(self.parameter_sources, self.modules)
            .with_container_config(self.container_config)
            .bootstrap()
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别，`RUST_LOG` 环境变量优先
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 初始化全局日志订阅者，进程内只能成功一次
    pub fn initialize(&self) -> InfrastructureResult<()> {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
