//! 路线引擎错误类型定义

use thiserror::Error;

/// 路线引擎错误类型
#[derive(Debug, Error)]
pub enum RoutingError {
    /// 客户未找到
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// 线路未找到
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// 员工未找到
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// 客户已有互斥的线路归属
    #[error("Conflicting assignment: customer {customer_id} is already assigned to route {current_route_id}")]
    ConflictingAssignment {
        customer_id: String,
        current_route_id: String,
    },

    /// 无效的参数
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// 站点下标越界（排序器调用方的编程错误）
    #[error("Stop index {index} out of range for {len} stops")]
    IndexOutOfRange { index: usize, len: usize },

    /// 原子批量写被存储拒绝（无部分写入，可安全重试）
    #[error("Assignment batch write failed: {0}")]
    AssignmentFailed(String),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 路线引擎结果类型
pub type RoutingResult<T> = Result<T, RoutingError>;
