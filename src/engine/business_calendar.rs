// ==========================================
// 数据发布里程碑跟踪 - 工作日历纯函数核心
// ==========================================
// 职责: 工作日判定、工作日计数、工作日偏移、到期判定
// 红线: 无状态突变、无副作用、无 I/O 操作
// 口径: 工作日 = 周一至周五; 节假日集合为注入扩展点, 默认为空
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

// ==========================================
// BusinessCalendar - 工作日历
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BusinessCalendar {
    /// 节假日集合 (扩展点; 本系统不自带任何节假日数据)
    holidays: HashSet<NaiveDate>,
}

impl BusinessCalendar {
    /// 仅排除周末的日历 (默认形态)
    pub fn new() -> Self {
        BusinessCalendar {
            holidays: HashSet::new(),
        }
    }

    /// 注入节假日集合
    pub fn with_holidays(holidays: HashSet<NaiveDate>) -> Self {
        BusinessCalendar { holidays }
    }

    /// 是否为工作日 (周一至周五且不在节假日集合)
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// 计算两个日期之间的工作日数
    ///
    /// # 规则
    /// - 口径为半开区间 (start, end]: 起点不计, 终点若为工作日则计入
    /// - start == end → 0
    /// - start > end → -count(end, start) (反方向取负)
    ///
    /// # 示例
    /// 周一 → 下周一 (+7 自然日) = 5 个工作日
    pub fn count_business_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        if start == end {
            return 0;
        }
        if start > end {
            return -self.count_business_days(end, start);
        }

        let mut count = 0i64;
        let mut d = start;
        while d < end {
            d += Duration::days(1);
            if self.is_business_day(d) {
                count += 1;
            }
        }
        count
    }

    /// 自锚点日期偏移 N 个工作日
    ///
    /// # 规则
    /// - 锚点本身不计入; 逐日推进, 只对工作日递减计数
    /// - n = 0 → 返回锚点原值 (即使锚点落在周末)
    /// - n < 0 → 向过去方向偏移
    pub fn add_business_days(&self, anchor: NaiveDate, n: i64) -> NaiveDate {
        let step = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        let mut d = anchor;
        while remaining > 0 {
            d += Duration::days(step);
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        d
    }

    /// 是否已逾期 (计划日期早于今天, 自然日比较)
    pub fn is_overdue(&self, scheduled: NaiveDate, today: NaiveDate) -> bool {
        scheduled < today
    }

    /// 是否即将到期
    ///
    /// # 规则
    /// - 未逾期, 且剩余工作日在 [0, window_days] 内 (含当天)
    pub fn is_due_soon(&self, scheduled: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
        if scheduled < today {
            return false;
        }
        let remaining = self.count_business_days(today, scheduled);
        (0..=window_days).contains(&remaining)
    }

    /// 剩余工作日数 (今天 → 计划日期)
    pub fn remaining_business_days(&self, today: NaiveDate, scheduled: NaiveDate) -> i64 {
        self.count_business_days(today, scheduled)
    }

    /// 自然日滞后 (today - date); 未来日期为负
    ///
    /// 逾期告警的 Días Rezago 使用本口径, 与工作日计数无关
    pub fn lag_calendar_days(date: NaiveDate, today: NaiveDate) -> i64 {
        (today - date).num_days()
    }
}
