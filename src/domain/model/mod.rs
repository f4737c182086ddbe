//! 路线领域模型
//!
//! 三个集合的文档模型（Customer / Route / Employee）以及内嵌的站点（Stop）。
//! 字段名序列化为 camelCase，与托管文档库中的既有文档保持一致。

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 服务类型
///
/// `twice-weekly` 是唯一允许同时归属多条线路的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// 每周一次
    Weekly,
    /// 每周两次（允许双线路归属）
    TwiceWeekly,
    /// 隔周一次
    BiWeekly,
    /// 单次服务
    OneTime,
}

impl ServiceType {
    /// 转换为文档存储的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Weekly => "weekly",
            ServiceType::TwiceWeekly => "twice-weekly",
            ServiceType::BiWeekly => "bi-weekly",
            ServiceType::OneTime => "one-time",
        }
    }

    /// 从文档字符串解析
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "weekly" => Some(ServiceType::Weekly),
            "twice-weekly" => Some(ServiceType::TwiceWeekly),
            "bi-weekly" => Some(ServiceType::BiWeekly),
            "one-time" => Some(ServiceType::OneTime),
            _ => None,
        }
    }

    /// 是否允许同时归属多条线路
    pub fn allows_multi_route(&self) -> bool {
        matches!(self, ServiceType::TwiceWeekly)
    }
}

/// 服务日（线路在每周的哪一天跑）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ServiceDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceDay::Monday => "monday",
            ServiceDay::Tuesday => "tuesday",
            ServiceDay::Wednesday => "wednesday",
            ServiceDay::Thursday => "thursday",
            ServiceDay::Friday => "friday",
            ServiceDay::Saturday => "saturday",
            ServiceDay::Sunday => "sunday",
        }
    }
}

/// 线路状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    /// 运行中
    Active,
    /// 停用
    Inactive,
    /// 已完成
    Completed,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Active => "active",
            RouteStatus::Inactive => "inactive",
            RouteStatus::Completed => "completed",
        }
    }
}

/// 客户的服务方案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    /// 服务类型
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    /// 服务犬只数量
    #[serde(default)]
    pub dogs: u32,
}

/// 客户文档
///
/// `route_id` 由指派协调器独占维护；其他 UI 代码只允许编辑联系信息等
/// 单文档字段（因此才需要后台校对兜底）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    /// 当前归属线路（无线路时为 None）
    #[serde(default)]
    pub route_id: Option<String>,
    /// 上一条归属线路（用于审计与回滚）
    #[serde(default)]
    pub previous_route_id: Option<String>,
    /// 是否等待人工排序（没有线路、或被移动后尚未重新排序时为 true）
    #[serde(default)]
    pub needs_route_ordering: bool,
    pub service: ServicePlan,
    #[serde(default)]
    pub total_spent: f64,
}

impl Customer {
    /// 是否允许双线路归属
    pub fn allows_multi_route(&self) -> bool {
        self.service.service_type.allows_multi_route()
    }
}

/// 线路上的一个站点（内嵌在 Route 文档中）
///
/// `customer_name` / `address` 是指派时刻的快照，客户之后改名或搬家
/// 不会同步到这里（接受的陈旧性，见协调器的缓存策略）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// 站点 ID：客户 ID + 指派时间戳，保证反复指派/移除后仍然唯一
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub address: String,
    /// 线路内的序号，1 起始、连续无空洞
    pub position: u32,
    #[serde(default)]
    pub time_window: Option<String>,
    pub service_type: ServiceType,
}

impl Stop {
    /// 为客户生成新站点，复制指派时刻的快照字段
    pub fn for_customer(customer: &Customer, position: u32) -> Self {
        Self {
            id: format!("{}-{}", customer.id, Utc::now().timestamp_millis()),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            address: customer.address.clone(),
            position,
            time_window: None,
            service_type: customer.service.service_type,
        }
    }
}

/// 指派技师的反规范化快照（缓存副本，权威数据在 Employee 文档）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTech {
    pub id: String,
    pub name: String,
    pub rating: f32,
}

impl AssignedTech {
    /// 从员工文档取一份新快照
    pub fn snapshot_of(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            rating: employee.rating,
        }
    }
}

/// 线路文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    /// 覆盖的邮编集合
    #[serde(default)]
    pub zip_codes: Vec<String>,
    pub service_day: ServiceDay,
    /// 指派技师快照（权威侧在 Employee.assigned_routes）
    #[serde(default)]
    pub assigned_tech: Option<AssignedTech>,
    /// 站点序列，position 为 1..N 的稠密排列
    #[serde(default)]
    pub stops: Vec<Stop>,
    pub status: RouteStatus,
}

impl Route {
    /// 线路是否覆盖指定邮编
    pub fn covers_zip(&self, zip: &str) -> bool {
        self.zip_codes.iter().any(|z| z == zip)
    }

    /// 线路上是否已有该客户的站点
    pub fn contains_stop_for(&self, customer_id: &str) -> bool {
        self.stops.iter().any(|s| s.customer_id == customer_id)
    }
}

/// 员工文档
///
/// `assigned_routes` 是员工↔线路关系的权威侧；Route.assigned_tech
/// 只是随之同步更新的缓存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub assigned_routes: Vec<String>,
}

impl Employee {
    /// 加入线路（幂等）
    pub fn add_route(&mut self, route_id: &str) {
        if !self.assigned_routes.iter().any(|r| r == route_id) {
            self.assigned_routes.push(route_id.to_string());
        }
    }

    /// 移出线路
    pub fn remove_route(&mut self, route_id: &str) {
        self.assigned_routes.retain(|r| r != route_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_roundtrip() {
        // 测试：文档字符串与枚举互转
        assert_eq!(ServiceType::from_str("twice-weekly"), Some(ServiceType::TwiceWeekly));
        assert_eq!(ServiceType::TwiceWeekly.as_str(), "twice-weekly");
        assert_eq!(ServiceType::from_str("monthly"), None);
    }

    #[test]
    fn test_multi_route_carveout() {
        // 测试：只有 twice-weekly 允许多线路
        assert!(ServiceType::TwiceWeekly.allows_multi_route());
        assert!(!ServiceType::Weekly.allows_multi_route());
        assert!(!ServiceType::BiWeekly.allows_multi_route());
        assert!(!ServiceType::OneTime.allows_multi_route());
    }

    #[test]
    fn test_employee_route_links_idempotent() {
        let mut employee = Employee {
            id: "e1".to_string(),
            name: "Alex".to_string(),
            rating: 4.8,
            assigned_routes: Vec::new(),
        };

        employee.add_route("r1");
        employee.add_route("r1");
        assert_eq!(employee.assigned_routes, vec!["r1".to_string()]);

        employee.remove_route("r1");
        assert!(employee.assigned_routes.is_empty());
    }

    #[test]
    fn test_stop_snapshot_fields() {
        let customer = Customer {
            id: "c1".to_string(),
            name: "Jordan".to_string(),
            address: "123 Clark St".to_string(),
            email: None,
            phone: None,
            zip_code: Some("60614".to_string()),
            route_id: None,
            previous_route_id: None,
            needs_route_ordering: true,
            service: ServicePlan {
                service_type: ServiceType::Weekly,
                dogs: 2,
            },
            total_spent: 0.0,
        };

        let stop = Stop::for_customer(&customer, 3);
        assert!(stop.id.starts_with("c1-"));
        assert_eq!(stop.customer_id, "c1");
        assert_eq!(stop.customer_name, "Jordan");
        assert_eq!(stop.address, "123 Clark St");
        assert_eq!(stop.position, 3);
        assert_eq!(stop.service_type, ServiceType::Weekly);
    }
}
