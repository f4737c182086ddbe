//! 实体存储边界
//!
//! 三个集合（Customers / Routes / Employees）按租户各自存放在托管文档库里。
//! 存储支持单文档读写、原子多文档批量写（全部成功或全部失败），以及按集合
//! 的变更订阅：每次变更推送当前全量文档集，协调器不依赖增量 diff。

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::model::{Customer, Employee, Route};
use crate::error::RoutingResult;

/// 单文档写入（均为 upsert 语义）
#[derive(Debug, Clone)]
pub enum DocumentWrite {
    Customer(Customer),
    Route(Route),
    Employee(Employee),
}

/// 原子批量写
///
/// 一次协调器操作涉及的所有文档写入都收敛到一个批次，由存储保证
/// 全部可见或全部不可见，不存在可观察的中间状态。
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    writes: Vec<DocumentWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer(&mut self, customer: Customer) -> &mut Self {
        self.writes.push(DocumentWrite::Customer(customer));
        self
    }

    pub fn set_route(&mut self, route: Route) -> &mut Self {
        self.writes.push(DocumentWrite::Route(route));
        self
    }

    pub fn set_employee(&mut self, employee: Employee) -> &mut Self {
        self.writes.push(DocumentWrite::Employee(employee));
        self
    }

    pub fn writes(&self) -> &[DocumentWrite] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// 客户集合变更通知（推送当前全量集合）
#[derive(Debug, Clone)]
pub struct CustomerSnapshot {
    pub customers: Vec<Customer>,
}

/// 实体存储接口（需要作为 trait 对象使用，保留 async-trait）
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_customer(&self, id: &str) -> RoutingResult<Option<Customer>>;
    async fn get_route(&self, id: &str) -> RoutingResult<Option<Route>>;
    async fn get_employee(&self, id: &str) -> RoutingResult<Option<Employee>>;

    async fn list_customers(&self) -> RoutingResult<Vec<Customer>>;
    async fn list_routes(&self) -> RoutingResult<Vec<Route>>;
    async fn list_employees(&self) -> RoutingResult<Vec<Employee>>;

    /// 原子提交批量写；失败时不产生任何部分写入
    async fn commit(&self, batch: WriteBatch) -> RoutingResult<()>;

    /// 订阅客户集合变更
    fn subscribe_customers(&self) -> broadcast::Receiver<CustomerSnapshot>;
}
