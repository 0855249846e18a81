use std::time::Instant;

/// 性能统计 Guard：记录 elapsed_ms（Drop 时输出）
///
/// 使用方式：
/// ```ignore
/// let _perf = cronograma_core::perf::PerfGuard::new("validate_and_derive_all");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: Option<u64>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            items: None,
        }
    }

    /// 带处理条数的 Guard（批量操作用）
    pub fn with_items(op: &'static str, items: usize) -> Self {
        Self {
            op,
            start: Instant::now(),
            items: Some(items as u64),
        }
    }

    /// 当前已消耗的毫秒数（结果结构体需要 elapsed_ms 时使用）
    pub fn elapsed_ms(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        match self.items {
            Some(items) => {
                tracing::info!(target: "perf", op = self.op, elapsed_ms, items, "done");
            }
            None => {
                tracing::info!(target: "perf", op = self.op, elapsed_ms, "done");
            }
        }
    }
}
