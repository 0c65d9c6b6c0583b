//! 学习者进度快照
//!
//! 四个状态集合互不相交。引擎只读取快照，状态变更总是生成新的快照。

use crate::kinds::CourseStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 单次状态变更记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: CourseStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub previous_status: Option<CourseStatus>,
}

/// 学习者进度
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub completed: HashSet<String>,
    #[serde(default)]
    pub in_progress: HashSet<String>,
    #[serde(default)]
    pub waiting_for_grade: HashSet<String>,
    #[serde(default)]
    pub available: HashSet<String>,
    /// 课程代码 -> 最近一次状态变更
    #[serde(default)]
    pub history: HashMap<String, StatusChange>,
    /// 课程代码 -> 完成时间
    #[serde(default)]
    pub completion_dates: HashMap<String, DateTime<Utc>>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已完成课程列表构造
    pub fn with_completed<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed: codes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 查询课程当前状态
    pub fn status_of(&self, code: &str) -> CourseStatus {
        if self.completed.contains(code) {
            CourseStatus::Completed
        } else if self.in_progress.contains(code) {
            CourseStatus::InProgress
        } else if self.waiting_for_grade.contains(code) {
            CourseStatus::WaitingForGrade
        } else if self.available.contains(code) {
            CourseStatus::Available
        } else {
            CourseStatus::NotStarted
        }
    }

    pub fn is_completed(&self, code: &str) -> bool {
        self.completed.contains(code)
    }

    /// 状态变更，返回新快照
    ///
    /// 先从四个集合中移除该代码，再放入目标集合，保证集合互不相交。
    /// 变为 `Completed` 时记录完成时间，离开 `Completed` 时清除完成时间。
    pub fn with_status(&self, code: &str, status: CourseStatus, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        let previous = self.status_of(code);

        next.completed.remove(code);
        next.in_progress.remove(code);
        next.waiting_for_grade.remove(code);
        next.available.remove(code);

        let target = match status {
            CourseStatus::Completed => Some(&mut next.completed),
            CourseStatus::InProgress => Some(&mut next.in_progress),
            CourseStatus::WaitingForGrade => Some(&mut next.waiting_for_grade),
            CourseStatus::Available => Some(&mut next.available),
            CourseStatus::NotStarted => None,
        };
        if let Some(set) = target {
            set.insert(code.to_string());
        }

        if status == CourseStatus::Completed {
            next.completion_dates.insert(code.to_string(), at);
        } else {
            next.completion_dates.remove(code);
        }

        next.history.insert(
            code.to_string(),
            StatusChange {
                status,
                timestamp: at,
                previous_status: Some(previous),
            },
        );

        next
    }

    /// 完成时间；缺少历史数据时返回 None
    pub fn completed_at(&self, code: &str) -> Option<DateTime<Utc>> {
        self.completion_dates
            .get(code)
            .copied()
            .or_else(|| match self.history.get(code) {
                Some(change) if change.status == CourseStatus::Completed => Some(change.timestamp),
                _ => None,
            })
    }

    /// 检查四个集合是否互不相交，返回冲突的课程代码
    pub fn overlapping_codes(&self) -> Vec<String> {
        let sets = [
            &self.completed,
            &self.in_progress,
            &self.waiting_for_grade,
            &self.available,
        ];
        let mut seen: HashSet<&str> = HashSet::new();
        let mut overlaps: Vec<String> = Vec::new();
        for set in sets {
            for code in set {
                if !seen.insert(code.as_str()) && !overlaps.contains(code) {
                    overlaps.push(code.clone());
                }
            }
        }
        overlaps.sort();
        overlaps
    }
}
