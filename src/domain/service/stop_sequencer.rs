//! 站点排序器
//!
//! 纯函数：给定线路的有序站点列表，产出 position 为 1..N 稠密排列的新列表。
//! 每次站点集合或顺序变化后都必须过一遍 `renumber`，这是序号不变式的
//! 唯一维护点。

use crate::domain::model::Stop;
use crate::error::{RoutingError, RoutingResult};

/// 按输入顺序重编号
///
/// 每个站点的 `position` 变为它在输入中的 1 起始下标，输入顺序原样保留
/// （稳定）。无失败路径。
pub fn renumber(mut stops: Vec<Stop>) -> Vec<Stop> {
    for (index, stop) in stops.iter_mut().enumerate() {
        stop.position = index as u32 + 1;
    }
    stops
}

/// 把 `from` 处的站点移动到 `to`，然后重编号
///
/// 下标越界返回 `IndexOutOfRange`，这是调用方的编程错误，UI 拖拽
/// 正常情况下不会触发。
pub fn move_stop(mut stops: Vec<Stop>, from: usize, to: usize) -> RoutingResult<Vec<Stop>> {
    let len = stops.len();
    if from >= len {
        return Err(RoutingError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(RoutingError::IndexOutOfRange { index: to, len });
    }

    let moved = stops.remove(from);
    stops.insert(to, moved);
    Ok(renumber(stops))
}
