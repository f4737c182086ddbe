//! 路线查询服务
//!
//! 只读边界：为 UI 提供线路建议与待安排客户列表，读存储后交给
//! 纯函数解析器。

use std::sync::Arc;

use tracing::debug;

use crate::application::queries::SuggestRoutesQuery;
use crate::domain::model::{Customer, Route};
use crate::domain::repository::EntityStore;
use crate::domain::service::suggestion;
use crate::error::{RoutingError, RoutingResult};

/// 路线查询服务
pub struct RoutingQueryService {
    store: Arc<dyn EntityStore>,
}

impl RoutingQueryService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// 为客户计算可指派的线路建议
    pub async fn suggest_routes(&self, query: SuggestRoutesQuery) -> RoutingResult<Vec<Route>> {
        let customer = self
            .store
            .get_customer(&query.customer_id)
            .await?
            .ok_or_else(|| RoutingError::CustomerNotFound(query.customer_id.clone()))?;
        let routes = self.store.list_routes().await?;

        let suggested = suggestion::suggest_routes(&customer, &routes);
        debug!(
            customer_id = %query.customer_id,
            candidates = suggested.len(),
            "Computed route suggestions"
        );
        Ok(suggested)
    }

    /// 列出等待人工安排的客户
    pub async fn awaiting_placement(&self) -> RoutingResult<Vec<Customer>> {
        let customers = self.store.list_customers().await?;
        Ok(suggestion::awaiting_placement(&customers))
    }
}
