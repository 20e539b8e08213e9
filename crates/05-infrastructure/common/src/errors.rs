//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置类型转换失败: {message}")]
    TypeConversionError { message: String },
}

/// 依赖注入错误类型
///
/// 所有变体都是配置期、构建期或首次解析期错误，
/// 容器构建成功后的稳态运行中不应出现。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("能力未绑定: {capability}{}", required_by_suffix(.required_by))]
    UnboundCapability {
        capability: String,
        required_by: Option<String>,
    },

    #[error("重复绑定: {capability} 已绑定到 {existing}, 无法再绑定到 {attempted}")]
    DuplicateBinding {
        capability: String,
        existing: String,
        attempted: String,
    },

    #[error("缺少参数: {name}{}", required_by_suffix(.required_by))]
    MissingParameter {
        name: String,
        required_by: Option<String>,
    },

    #[error("检测到循环依赖: {dependency_chain}")]
    CyclicDependency { dependency_chain: String },

    #[error("参数值无效: {name}, 原因: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("实例类型不匹配: 期望 {expected}")]
    TypeMismatch { expected: String },

    #[error("解析深度超过上限 {max_depth}: {type_name}")]
    ResolutionDepthExceeded { type_name: String, max_depth: usize },

    #[error("容器已销毁, 无法解析: {type_name}")]
    ContainerDisposed { type_name: String },

    #[error("组件销毁失败: {type_name}, 原因: {message}")]
    DisposalFailed { type_name: String, message: String },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    required_by
        .as_ref()
        .map(|owner| format!(" (被 {owner} 依赖)"))
        .unwrap_or_default()
}

impl DependencyError {
    /// 创建能力未绑定错误
    pub fn unbound(capability: impl Into<String>, required_by: Option<String>) -> Self {
        Self::UnboundCapability {
            capability: capability.into(),
            required_by,
        }
    }

    /// 创建缺少参数错误
    pub fn missing_parameter(name: impl Into<String>, required_by: Option<String>) -> Self {
        Self::MissingParameter {
            name: name.into(),
            required_by,
        }
    }

    /// 是否为循环依赖错误
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
