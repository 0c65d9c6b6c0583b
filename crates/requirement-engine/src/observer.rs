//! 解析过程观察者
//!
//! 引擎通过注入的观察者输出日志，观察者不能影响计算结果。

use crate::kinds::RequirementKind;
use tracing::debug;

/// 解析事件回调
#[cfg_attr(test, mockall::automock)]
pub trait ResolutionObserver: Send + Sync {
    /// 单条要求解析完成
    fn requirement_resolved(&self, subject: &str, kind: RequirementKind, satisfied: bool);

    /// 遇到未知类型的要求
    fn unknown_requirement(&self, subject: &str, treated_as_satisfied: bool);

    /// 资格检查的课程代码不在目录中
    fn course_not_found(&self, code: &str);
}

/// 不输出任何内容
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {
    fn requirement_resolved(&self, _subject: &str, _kind: RequirementKind, _satisfied: bool) {}

    fn unknown_requirement(&self, _subject: &str, _treated_as_satisfied: bool) {}

    fn course_not_found(&self, _code: &str) {}
}

/// 通过 tracing 输出
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn requirement_resolved(&self, subject: &str, kind: RequirementKind, satisfied: bool) {
        debug!(subject = %subject, kind = %kind, satisfied, "要求解析完成");
    }

    fn unknown_requirement(&self, subject: &str, treated_as_satisfied: bool) {
        tracing::warn!(
            subject = %subject,
            treated_as_satisfied,
            "遇到未知类型的要求"
        );
    }

    fn course_not_found(&self, code: &str) {
        debug!(code = %code, "课程不在目录中");
    }
}
