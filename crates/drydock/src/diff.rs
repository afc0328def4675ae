//! Structural diff between the committed and staged documents.
//!
//! The diff is always fully recomputed from the two documents, never
//! incrementally patched, so it cannot drift from the state it derives
//! from.

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Counts per change class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub added_count: usize,
    pub modified_count: usize,
    pub deleted_count: usize,
}

/// Derived classification of staged changes against the committed
/// baseline. Consumers must treat each published value as a wholesale
/// replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffState {
    /// True iff `changed_paths` is non-empty.
    pub has_changes: bool,
    /// One opaque token (`features[<id>]`) per affected feature, in
    /// traversal order: staged-array order, then committed-array order.
    pub changed_paths: Vec<String>,
    /// Counts per change class.
    pub summary: DiffSummary,
}

impl DiffState {
    /// The diff of two equal documents.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Human-readable one-liner, e.g. `"2 added, 1 modified"`.
    pub fn summary_text(&self) -> String {
        if !self.has_changes {
            return "No changes".to_string();
        }
        let mut parts = Vec::new();
        if self.summary.added_count > 0 {
            parts.push(format!("{} added", self.summary.added_count));
        }
        if self.summary.modified_count > 0 {
            parts.push(format!("{} modified", self.summary.modified_count));
        }
        if self.summary.deleted_count > 0 {
            parts.push(format!("{} deleted", self.summary.deleted_count));
        }
        parts.join(", ")
    }
}

fn feature_token(id: &str) -> String {
    format!("features[{id}]")
}

/// Classify every feature as added, modified, or deleted by id.
///
/// Features present in `staged` but not `committed` are added; present
/// in both but unequal (deep, field-by-field comparison) are modified;
/// present only in `committed` are deleted. The two passes are mutually
/// exclusive per id, so a feature is recorded at most once.
///
/// # Examples
///
/// ```
/// use drydock::{calculate_diff, Document, Feature};
///
/// let committed = Document {
///     count: 0,
///     features: vec![Feature::new("1", "A")],
/// };
/// let staged = Document {
///     count: 0,
///     features: vec![Feature::new("1", "A"), Feature::new("2", "B")],
/// };
///
/// let diff = calculate_diff(&committed, &staged);
/// assert!(diff.has_changes);
/// assert_eq!(diff.changed_paths, vec!["features[2]"]);
/// assert_eq!(diff.summary.added_count, 1);
/// ```
pub fn calculate_diff(committed: &Document, staged: &Document) -> DiffState {
    let mut changed_paths = Vec::new();
    let mut summary = DiffSummary::default();

    for feature in &staged.features {
        match committed.features.iter().find(|f| f.id == feature.id) {
            None => {
                summary.added_count += 1;
                changed_paths.push(feature_token(&feature.id));
            }
            Some(committed_feature) if committed_feature != feature => {
                summary.modified_count += 1;
                changed_paths.push(feature_token(&feature.id));
            }
            Some(_) => {}
        }
    }

    for feature in &committed.features {
        if !staged.features.iter().any(|f| f.id == feature.id) {
            summary.deleted_count += 1;
            changed_paths.push(feature_token(&feature.id));
        }
    }

    DiffState {
        has_changes: !changed_paths.is_empty(),
        changed_paths,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Feature;

    fn doc(features: Vec<Feature>) -> Document {
        Document { count: 0, features }
    }

    #[test]
    fn test_identical_documents_are_clean() {
        let a = doc(vec![Feature::new("1", "A")]);
        let diff = calculate_diff(&a, &a);
        assert!(!diff.has_changes);
        assert!(diff.changed_paths.is_empty());
        assert_eq!(diff, DiffState::clean());
    }

    #[test]
    fn test_empty_documents_are_clean() {
        let diff = calculate_diff(&Document::new(), &Document::new());
        assert!(!diff.has_changes);
    }

    #[test]
    fn test_added_feature() {
        let committed = doc(vec![Feature::new("1", "A")]);
        let staged = doc(vec![Feature::new("1", "A"), Feature::new("2", "B")]);
        let diff = calculate_diff(&committed, &staged);

        assert!(diff.has_changes);
        assert_eq!(diff.changed_paths, vec!["features[2]"]);
        assert_eq!(diff.summary.added_count, 1);
        assert_eq!(diff.summary.modified_count, 0);
        assert_eq!(diff.summary.deleted_count, 0);
    }

    #[test]
    fn test_modified_feature() {
        let committed = doc(vec![Feature::new("1", "A")]);
        let staged = doc(vec![Feature::new("1", "Z")]);
        let diff = calculate_diff(&committed, &staged);

        assert_eq!(diff.changed_paths, vec!["features[1]"]);
        assert_eq!(diff.summary.modified_count, 1);
        assert_eq!(diff.summary.added_count, 0);
        assert_eq!(diff.summary.deleted_count, 0);
    }

    #[test]
    fn test_deleted_feature() {
        let committed = doc(vec![Feature::new("1", "A")]);
        let staged = doc(vec![]);
        let diff = calculate_diff(&committed, &staged);

        assert_eq!(diff.changed_paths, vec!["features[1]"]);
        assert_eq!(diff.summary.deleted_count, 1);
        assert_eq!(diff.summary.added_count, 0);
        assert_eq!(diff.summary.modified_count, 0);
    }

    #[test]
    fn test_description_change_is_modified() {
        let committed = doc(vec![Feature::new("1", "A").with_description("old")]);
        let staged = doc(vec![Feature::new("1", "A").with_description("new")]);
        let diff = calculate_diff(&committed, &staged);
        assert_eq!(diff.summary.modified_count, 1);
    }

    #[test]
    fn test_card_attribute_change_is_modified() {
        let base = Feature::new("25", "Sparkmouse");
        let mut card = base.clone();
        card.hp = Some(60);
        let diff = calculate_diff(&doc(vec![base]), &doc(vec![card]));
        assert_eq!(diff.summary.modified_count, 1);
    }

    #[test]
    fn test_traversal_order_staged_then_committed() {
        let committed = doc(vec![Feature::new("a", "A"), Feature::new("b", "B")]);
        let staged = doc(vec![Feature::new("b", "B2"), Feature::new("c", "C")]);
        let diff = calculate_diff(&committed, &staged);

        // Staged pass records b (modified), c (added); committed pass
        // records a (deleted).
        assert_eq!(
            diff.changed_paths,
            vec!["features[b]", "features[c]", "features[a]"]
        );
        assert_eq!(diff.summary.modified_count, 1);
        assert_eq!(diff.summary.added_count, 1);
        assert_eq!(diff.summary.deleted_count, 1);
    }

    #[test]
    fn test_deterministic_output() {
        let committed = doc(vec![Feature::new("1", "A"), Feature::new("2", "B")]);
        let staged = doc(vec![Feature::new("2", "B2"), Feature::new("3", "C")]);
        let first = calculate_diff(&committed, &staged);
        let second = calculate_diff(&committed, &staged);
        assert_eq!(first, second);
    }

    #[test]
    fn test_feature_never_recorded_twice() {
        let committed = doc(vec![Feature::new("1", "A")]);
        let staged = doc(vec![Feature::new("1", "Z")]);
        let diff = calculate_diff(&committed, &staged);
        assert_eq!(
            diff.changed_paths
                .iter()
                .filter(|p| *p == "features[1]")
                .count(),
            1
        );
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(DiffState::clean().summary_text(), "No changes");

        let committed = doc(vec![Feature::new("1", "A"), Feature::new("2", "B")]);
        let staged = doc(vec![Feature::new("1", "Z"), Feature::new("3", "C")]);
        let diff = calculate_diff(&committed, &staged);
        assert_eq!(diff.summary_text(), "1 added, 1 modified, 1 deleted");
    }
}
