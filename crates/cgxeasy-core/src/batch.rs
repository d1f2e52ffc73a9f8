// ── Batch results ──

use serde::Serialize;

use crate::ops::OpResult;

/// Per-item results of an operation fanned out over several targets.
///
/// Items are independent: one failure never changes another item's
/// result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub results: Vec<OpResult>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: OpResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// `true` when no item failed (an empty batch counts as success).
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OpResult> {
        self.results.iter()
    }
}

impl From<OpResult> for BatchReport {
    fn from(result: OpResult) -> Self {
        Self {
            results: vec![result],
        }
    }
}

impl FromIterator<OpResult> for BatchReport {
    fn from_iter<I: IntoIterator<Item = OpResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl Extend<OpResult> for BatchReport {
    fn extend<I: IntoIterator<Item = OpResult>>(&mut self, iter: I) {
        self.results.extend(iter);
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a OpResult;
    type IntoIter = std::slice::Iter<'a, OpResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn ok(target: &str) -> OpResult {
        OpResult {
            operation: "interface_tag_add".into(),
            target: target.into(),
            success: true,
            message: "tag added".into(),
            change: Some(crate::ops::Change::Updated),
            error: None,
        }
    }

    #[test]
    fn counts_split_by_outcome() {
        let mut report: BatchReport = [ok("a"), ok("b")].into_iter().collect();
        report.push(OpResult::failed(
            "interface_tag_add",
            "c",
            &CoreError::not_found("Element", "c"),
        ));
        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn empty_batch_is_success() {
        assert!(BatchReport::new().all_succeeded());
    }
}
