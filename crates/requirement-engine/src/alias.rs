//! 课程别名解析
//!
//! 可互换的课程代码映射到同一个主代码。是否启用由 `ResolverOptions` 决定，
//! 启用后同时作用于“要求的代码”和“已完成的代码”。

use std::collections::HashMap;
use tracing::warn;

/// 别名表
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// 别名 -> 主代码
    primary: HashMap<String, String>,
}

impl AliasTable {
    /// 从 别名 -> 主代码 映射构建
    ///
    /// 链式别名（A -> B -> C）会被展开到最终主代码。出现环时，环上所有代码以及
    /// 指向环的别名统一映射到环中字典序最小的代码，并记录警告。
    pub fn new(aliases: &HashMap<String, String>) -> Self {
        let mut primary = HashMap::with_capacity(aliases.len());

        for alias in aliases.keys() {
            let resolved = Self::resolve_chain(aliases, alias);
            if resolved != alias.as_str() {
                primary.insert(alias.clone(), resolved.to_string());
            }
        }

        Self { primary }
    }

    /// 沿别名链走到主代码；遇到环时返回环中最小的代码
    fn resolve_chain<'a>(aliases: &'a HashMap<String, String>, start: &'a str) -> &'a str {
        let mut path: Vec<&str> = vec![start];
        let mut current = start;

        while let Some(next) = aliases.get(current) {
            let next = next.as_str();
            if let Some(pos) = path.iter().position(|&code| code == next) {
                let cycle = &path[pos..];
                let representative = cycle.iter().copied().min().unwrap_or(next);
                // 每个环只在代表代码自身解析时告警一次
                if start == representative {
                    warn!(
                        cycle = ?cycle,
                        primary = %representative,
                        "课程别名存在循环，统一映射到最小代码"
                    );
                }
                return representative;
            }
            path.push(next);
            current = next;
        }

        current
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// 规范化课程代码，不是别名时原样返回
    pub fn canonical<'a>(&'a self, code: &'a str) -> &'a str {
        self.primary.get(code).map(String::as_str).unwrap_or(code)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> AliasTable {
        let map = pairs
            .iter()
            .map(|(a, p)| (a.to_string(), p.to_string()))
            .collect();
        AliasTable::new(&map)
    }

    #[test]
    fn test_canonical() {
        let aliases = table(&[("OLD-101", "NEW-101")]);
        assert_eq!(aliases.canonical("OLD-101"), "NEW-101");
        assert_eq!(aliases.canonical("NEW-101"), "NEW-101");
        assert_eq!(aliases.canonical("OTHER"), "OTHER");
    }

    #[test]
    fn test_chained_aliases_resolve_to_final_primary() {
        let aliases = table(&[("A", "B"), ("B", "C")]);
        assert_eq!(aliases.canonical("A"), "C");
        assert_eq!(aliases.canonical("B"), "C");
    }

    #[test]
    fn test_cycle_members_share_smallest_code() {
        let aliases = table(&[("A", "B"), ("B", "A")]);

        assert_eq!(aliases.canonical("A"), "A");
        assert_eq!(aliases.canonical("B"), "A");
        assert_eq!(aliases.canonical("A"), aliases.canonical("B"));
        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn test_chain_into_cycle_uses_cycle_representative() {
        let aliases = table(&[("Z", "C"), ("C", "D"), ("D", "B"), ("B", "C")]);

        assert_eq!(aliases.canonical("Z"), "B");
        assert_eq!(aliases.canonical("C"), "B");
        assert_eq!(aliases.canonical("D"), "B");
        assert_eq!(aliases.canonical("B"), "B");
    }

    #[test]
    fn test_self_alias_is_ignored() {
        let aliases = table(&[("A", "A")]);

        assert!(aliases.is_empty());
        assert_eq!(aliases.canonical("A"), "A");
    }
}
