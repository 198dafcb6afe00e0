//! 通用结果表格
//!
//! 不同样本的模型暴露的反应集合不同，所以拼接时按列并集对齐，
//! 缺失单元格填充 NA 标记。列顺序为首次出现顺序。

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use std::path::Path;

/// 缺失值标记
pub const NA: &str = "NA";

/// 结果表格（字符串单元格，列按首次出现顺序）
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: IndexSet<String>,
    rows: Vec<IndexMap<String, String>>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.columns.iter()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// 追加一行，新列自动加入列集合
    pub fn push_row(&mut self, row: IndexMap<String, String>) {
        for col in row.keys() {
            self.columns.insert(col.clone());
        }
        self.rows.push(row);
    }

    /// 读取单元格，缺失列返回 None
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }

    /// 给每一行补充统一的标记列（sample / condition / tradeoff 等）
    pub fn tag(&mut self, column: &str, value: &str) {
        self.columns.insert(column.to_string());
        for row in &mut self.rows {
            row.insert(column.to_string(), value.to_string());
        }
    }

    /// 按列并集拼接多张表
    ///
    /// 总行数等于各表行数之和；某张表缺失的列在写出时填 NA。
    pub fn concat(tables: Vec<DataTable>) -> DataTable {
        let mut combined = DataTable::new();
        for table in tables {
            for col in &table.columns {
                combined.columns.insert(col.clone());
            }
            combined.rows.extend(table.rows);
        }
        combined
    }

    /// 写出为 CSV，缺失单元格填 NA
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("无法创建CSV文件: {}", path.display()))?;

        writer.write_record(self.columns.iter())?;
        for row in &self.rows {
            let record: Vec<&str> = self
                .columns
                .iter()
                .map(|col| row.get(col).map(String::as_str).unwrap_or(NA))
                .collect();
            writer.write_record(&record)?;
        }

        writer
            .flush()
            .with_context(|| format!("CSV写入失败: {}", path.display()))?;
        Ok(())
    }
}

/// 构造一行的便捷宏风格辅助函数
pub fn row_of(pairs: &[(&str, String)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// 数值单元格的统一格式化
pub fn fmt_num(v: f64) -> String {
    format!("{}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_column_union_and_row_counts() {
        let mut a = DataTable::new();
        a.push_row(row_of(&[("taxon", "sp1".to_string()), ("EX_glc", "1.5".to_string())]));
        a.push_row(row_of(&[("taxon", "sp2".to_string()), ("EX_glc", "0.5".to_string())]));

        let mut b = DataTable::new();
        b.push_row(row_of(&[("taxon", "sp3".to_string()), ("EX_o2", "2.0".to_string())]));

        let combined = DataTable::concat(vec![a, b]);

        // 行数 = 各表行数之和
        assert_eq!(combined.n_rows(), 3);
        // 列并集
        assert!(combined.has_column("EX_glc"));
        assert!(combined.has_column("EX_o2"));
        // 缺失单元格在读取时为 None（写出时补 NA）
        assert_eq!(combined.get(0, "EX_o2"), None);
        assert_eq!(combined.get(2, "EX_glc"), None);
        assert_eq!(combined.get(2, "EX_o2"), Some("2.0"));
    }

    #[test]
    fn test_tag_applies_to_all_rows() {
        let mut t = DataTable::new();
        t.push_row(row_of(&[("taxon", "sp1".to_string())]));
        t.push_row(row_of(&[("taxon", "sp2".to_string())]));

        t.tag("sample", "S1");
        t.tag("tradeoff", "0.8");

        assert_eq!(t.get(0, "sample"), Some("S1"));
        assert_eq!(t.get(1, "tradeoff"), Some("0.8"));
    }

    #[test]
    fn test_write_csv_fills_na() {
        let mut a = DataTable::new();
        a.push_row(row_of(&[("taxon", "sp1".to_string()), ("EX_glc", "1.5".to_string())]));
        let mut b = DataTable::new();
        b.push_row(row_of(&[("taxon", "sp2".to_string()), ("EX_o2", "2.0".to_string())]));
        let combined = DataTable::concat(vec![a, b]);

        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("out.csv");
        combined.write_csv(&path).expect("写CSV失败");

        let content = std::fs::read_to_string(&path).expect("读CSV失败");
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("taxon,EX_glc,EX_o2"));
        assert_eq!(lines.next(), Some("sp1,1.5,NA"));
        assert_eq!(lines.next(), Some("sp2,NA,2.0"));
    }
}
