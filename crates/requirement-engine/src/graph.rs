//! 先修关系图查询
//!
//! 正向（哪些课程是它的先修）与反向（完成它能解锁哪些课程）查询。
//! 只读取目录，与学习者状态无关，可按目录版本缓存。

use crate::compiler::Catalog;
use crate::models::Course;
use std::collections::HashSet;

/// 图查询服务
pub struct GraphQuery<'a> {
    catalog: &'a Catalog,
}

impl<'a> GraphQuery<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// 课程的全部先修课程
    ///
    /// 多选一组中的所有备选项都会列出；目录中不存在的代码被跳过；结果去重并保持声明顺序。
    /// 课程不存在时返回空列表。
    pub fn prerequisites_for_course(&self, code: &str) -> Vec<&'a Course> {
        let Some(course) = self.catalog.course(code) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        course
            .prerequisites
            .iter()
            .flat_map(|p| p.referenced_codes())
            .filter(|code| seen.insert(*code))
            .filter_map(|code| self.catalog.course(code))
            .collect()
    }

    /// 直接或在多选一组中引用了该代码的全部课程（目录顺序）
    pub fn courses_unlocked_by(&self, code: &str) -> Vec<&'a Course> {
        self.catalog
            .courses()
            .iter()
            .filter(|course| {
                course
                    .prerequisites
                    .iter()
                    .any(|p| p.referenced_codes().contains(&code))
            })
            .collect()
    }
}
