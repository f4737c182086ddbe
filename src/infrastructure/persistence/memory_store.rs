//! 内存版实体存储
//!
//! 测试与控制台演示模式使用的进程内实现。三个集合放在同一把
//! `RwLock` 后面，批量提交在持锁期间一次性应用，原子批量写的
//! "全部可见或全部不可见"由单锁保证。托管文档库的适配器在控制台
//! 后端，不在本 crate；`EntityStore` trait 是两边共同的接缝。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::domain::model::{Customer, Employee, Route};
use crate::domain::repository::{
    CustomerSnapshot, DocumentWrite, EntityStore, WriteBatch,
};
use crate::error::RoutingResult;

#[derive(Default)]
struct StoreState {
    customers: HashMap<String, Customer>,
    routes: HashMap<String, Route>,
    employees: HashMap<String, Employee>,
}

impl StoreState {
    fn customer_snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot {
            customers: self.customers.values().cloned().collect(),
        }
    }
}

/// 内存版实体存储
pub struct InMemoryEntityStore {
    state: Arc<RwLock<StoreState>>,
    customer_events: broadcast::Sender<CustomerSnapshot>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        let (customer_events, _) = broadcast::channel(64);
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            customer_events,
        }
    }

    /// 预置客户文档（模拟协调器之外的直接写入，会触发变更通知）
    pub async fn put_customer(&self, customer: Customer) {
        let mut state = self.state.write().await;
        state.customers.insert(customer.id.clone(), customer);
        let _ = self.customer_events.send(state.customer_snapshot());
    }

    /// 删除客户文档（旁路删除，会触发变更通知）
    pub async fn delete_customer(&self, id: &str) {
        let mut state = self.state.write().await;
        state.customers.remove(id);
        let _ = self.customer_events.send(state.customer_snapshot());
    }

    /// 预置线路文档
    pub async fn put_route(&self, route: Route) {
        let mut state = self.state.write().await;
        state.routes.insert(route.id.clone(), route);
    }

    /// 预置员工文档
    pub async fn put_employee(&self, employee: Employee) {
        let mut state = self.state.write().await;
        state.employees.insert(employee.id.clone(), employee);
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get_customer(&self, id: &str) -> RoutingResult<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state.customers.get(id).cloned())
    }

    async fn get_route(&self, id: &str) -> RoutingResult<Option<Route>> {
        let state = self.state.read().await;
        Ok(state.routes.get(id).cloned())
    }

    async fn get_employee(&self, id: &str) -> RoutingResult<Option<Employee>> {
        let state = self.state.read().await;
        Ok(state.employees.get(id).cloned())
    }

    async fn list_customers(&self) -> RoutingResult<Vec<Customer>> {
        let state = self.state.read().await;
        Ok(state.customers.values().cloned().collect())
    }

    async fn list_routes(&self) -> RoutingResult<Vec<Route>> {
        let state = self.state.read().await;
        Ok(state.routes.values().cloned().collect())
    }

    async fn list_employees(&self) -> RoutingResult<Vec<Employee>> {
        let state = self.state.read().await;
        Ok(state.employees.values().cloned().collect())
    }

    async fn commit(&self, batch: WriteBatch) -> RoutingResult<()> {
        let mut state = self.state.write().await;
        let mut customers_changed = false;

        for write in batch.writes() {
            match write {
                DocumentWrite::Customer(customer) => {
                    state.customers.insert(customer.id.clone(), customer.clone());
                    customers_changed = true;
                }
                DocumentWrite::Route(route) => {
                    state.routes.insert(route.id.clone(), route.clone());
                }
                DocumentWrite::Employee(employee) => {
                    state.employees.insert(employee.id.clone(), employee.clone());
                }
            }
        }
        debug!(writes = batch.len(), "Applied write batch");

        if customers_changed {
            let _ = self.customer_events.send(state.customer_snapshot());
        }
        Ok(())
    }

    fn subscribe_customers(&self) -> broadcast::Receiver<CustomerSnapshot> {
        self.customer_events.subscribe()
    }
}
