//------------ Memory reporting ----------------------------------------------
//
// Per-component byte accounting, generalized from per-stride-width
// tables to the index's own component tree: nested records of
// `{name, totalBytes, children}`, serializable to JSON via
// `serde::Serialize`.

use serde_derive::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MemoryReport {
    pub name: String,
    #[serde(rename = "totalBytes")]
    pub total_bytes: usize,
    pub children: Vec<MemoryReport>,
}

impl MemoryReport {
    pub fn leaf(name: impl Into<String>, total_bytes: usize) -> MemoryReport {
        MemoryReport { name: name.into(), total_bytes, children: Vec::new() }
    }

    pub fn branch(name: impl Into<String>, children: Vec<MemoryReport>) -> MemoryReport {
        let total_bytes = children.iter().map(|c| c.total_bytes).sum();
        MemoryReport { name: name.into(), total_bytes, children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_sums_children() {
        let report = MemoryReport::branch(
            "index",
            vec![MemoryReport::leaf("dict", 10), MemoryReport::leaf("rloc", 20)],
        );
        assert_eq!(report.total_bytes, 30);
    }

    #[test]
    fn serializes_to_json() {
        let report = MemoryReport::leaf("dict", 10);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"totalBytes\":10"));
    }
}
