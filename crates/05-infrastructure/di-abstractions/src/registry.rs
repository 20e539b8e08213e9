//! 绑定注册表抽象接口

use crate::injectable::Implements;
use crate::instance::{downcast, erase, AnyInstance};
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// 能力转换函数类型
pub type UpcastFn = Arc<dyn Fn(&AnyInstance) -> DependencyResult<AnyInstance> + Send + Sync>;

/// 能力绑定
///
/// 把抽象能力（例如 `dyn Battery`）映射到唯一的具体实现
#[derive(Clone)]
pub struct Binding {
    /// 能力类型
    pub capability: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    upcast: UpcastFn,
}

impl Binding {
    /// 创建能力 `C` 到实现 `I` 的绑定
    pub fn of<C, I>() -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        I: Implements<C>,
    {
        Self {
            capability: TypeInfo::of::<C>(),
            implementation: TypeInfo::of::<I>(),
            upcast: Arc::new(|instance: &AnyInstance| -> DependencyResult<AnyInstance> {
                let concrete = downcast::<I>(instance)?;
                Ok(erase::<C>(<I as Implements<C>>::upcast(concrete)))
            }),
        }
    }

    /// 把实现实例转换为能力实例
    pub fn upcast(&self, instance: &AnyInstance) -> DependencyResult<AnyInstance> {
        (self.upcast)(instance)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("capability", &self.capability.type_name)
            .field("implementation", &self.implementation.type_name)
            .field("upcast", &"<function>")
            .finish()
    }
}

/// 绑定注册表 trait
///
/// 每个能力最多只有一个绑定，重复绑定在配置期立即失败
pub trait BindingRegistry: Send + Sync {
    /// 注册绑定
    fn bind(&mut self, binding: Binding) -> DependencyResult<()>;

    /// 查找能力的绑定
    fn binding_for(&self, capability: &TypeInfo) -> Option<&Binding>;

    /// 解析能力的实现类型
    fn resolve_binding(&self, capability: &TypeInfo) -> DependencyResult<TypeInfo> {
        self.binding_for(capability)
            .map(|binding| binding.implementation)
            .ok_or_else(|| DependencyError::unbound(capability.short_name(), None))
    }

    /// 获取所有绑定
    fn bindings(&self) -> Vec<Binding>;
}

/// 依赖图节点
#[derive(Debug, Clone)]
pub struct DependencyGraphNode {
    /// 组件类型
    pub type_info: TypeInfo,
    /// 依赖的类型列表（参数依赖不参与建图）
    pub dependencies: Vec<TypeInfo>,
}

/// 循环依赖检测器
pub trait CircularDependencyDetector: Send + Sync {
    /// 检测循环依赖
    fn detect_circular_dependencies(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()>;

    /// 计算构建顺序：每个依赖都排在依赖它的组件之前
    fn topological_order(&self, graph: &[DependencyGraphNode]) -> DependencyResult<Vec<TypeInfo>>;
}

/// 默认循环依赖检测器
#[derive(Debug, Default)]
pub struct DefaultCircularDependencyDetector;

impl CircularDependencyDetector for DefaultCircularDependencyDetector {
    fn detect_circular_dependencies(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()> {
        self.topological_order(graph).map(|_| ())
    }

    fn topological_order(&self, graph: &[DependencyGraphNode]) -> DependencyResult<Vec<TypeInfo>> {
        // 使用深度优先搜索，后序即为拓扑序
        let mut visited = HashSet::new();
        let mut visiting = Vec::new();
        let mut order = Vec::with_capacity(graph.len());

        for node in graph {
            if !visited.contains(&node.type_info) {
                self.dfs_check(node.type_info, graph, &mut visited, &mut visiting, &mut order)?;
            }
        }

        Ok(order)
    }
}

impl DefaultCircularDependencyDetector {
    fn dfs_check(
        &self,
        current: TypeInfo,
        graph: &[DependencyGraphNode],
        visited: &mut HashSet<TypeInfo>,
        visiting: &mut Vec<TypeInfo>,
        order: &mut Vec<TypeInfo>,
    ) -> DependencyResult<()> {
        if let Some(start) = visiting.iter().position(|t| *t == current) {
            // 检测到循环依赖
            let chain = visiting[start..]
                .iter()
                .chain(std::iter::once(&current))
                .map(TypeInfo::short_name)
                .collect::<Vec<_>>()
                .join(" -> ");

            return Err(DependencyError::CyclicDependency {
                dependency_chain: chain,
            });
        }

        if visited.contains(&current) {
            return Ok(());
        }

        visiting.push(current);

        if let Some(node) = graph.iter().find(|n| n.type_info == current) {
            for dep in &node.dependencies {
                self.dfs_check(*dep, graph, visited, visiting, order)?;
            }
        }

        visiting.pop();
        visited.insert(current);
        order.push(current);

        Ok(())
    }
}
