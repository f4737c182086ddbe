//! 未指派客户解析器
//!
//! 为缺少线路、或被标记为待排序的客户计算可指派的线路建议（按邮编覆盖
//! 匹配）。纯逻辑，自身不持久化任何状态；UI 的"快速指派"按钮拿着建议
//! 调回协调器。

use crate::domain::model::{Customer, Route};

/// 按邮编匹配候选线路
///
/// 返回 `zip_codes` 覆盖客户邮编的所有线路；客户没有邮编、或没有线路
/// 匹配时返回空。
pub fn suggest_routes(customer: &Customer, routes: &[Route]) -> Vec<Route> {
    let Some(zip) = customer.zip_code.as_deref() else {
        return Vec::new();
    };

    routes
        .iter()
        .filter(|route| route.covers_zip(zip))
        .cloned()
        .collect()
}

/// 等待人工安排的客户
///
/// 没有线路的客户、以及被移动后尚未重新排序的客户，都会出现在控制台的
/// 待安排面板里。
pub fn awaiting_placement(customers: &[Customer]) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| c.route_id.is_none() || c.needs_route_ordering)
        .cloned()
        .collect()
}
