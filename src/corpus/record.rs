// Catalog row model: categories, class labels, and partitions.
//
// These are the types that flow through the pipeline. The category and
// class mappings are fixed; the external classifier was trained on these
// exact codes and silently changing them would corrupt its labels.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Degree of plagiarism assigned to a document in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Written without reference to the source text.
    Non,
    /// Heavily rewritten from the source.
    Heavy,
    /// Lightly rewritten from the source.
    Light,
    /// Copied with minor edits.
    Cut,
    /// The source text itself, one per task.
    Orig,
}

impl Category {
    /// Parse a catalog label. The set is closed; anything else is an error.
    pub fn parse(label: &str) -> Result<Self, PipelineError> {
        match label {
            "non" => Ok(Category::Non),
            "heavy" => Ok(Category::Heavy),
            "light" => Ok(Category::Light),
            "cut" => Ok(Category::Cut),
            "orig" => Ok(Category::Orig),
            other => Err(PipelineError::UnknownCategory(other.to_string())),
        }
    }

    /// Numeric category code: non 0, heavy 1, light 2, cut 3, orig -1.
    pub fn code(&self) -> i8 {
        match self {
            Category::Non => 0,
            Category::Heavy => 1,
            Category::Light => 2,
            Category::Cut => 3,
            Category::Orig => -1,
        }
    }

    /// Binary class label: 0 clean, 1 any plagiarized degree, -1 source.
    pub fn class(&self) -> i8 {
        match self {
            Category::Non => 0,
            Category::Heavy | Category::Light | Category::Cut => 1,
            Category::Orig => -1,
        }
    }

    /// Whether this record is a task's ground-truth source text.
    pub fn is_source(&self) -> bool {
        matches!(self, Category::Orig)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Non => "non",
            Category::Heavy => "heavy",
            Category::Light => "light",
            Category::Cut => "cut",
            Category::Orig => "orig",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Train/test assignment for a record. Source records stay `Orig` and
/// never feed either array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    Train,
    Test,
    Orig,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test => "test",
            Partition::Orig => "orig",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One answer or source document, with its canonical token text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Catalog file name. Unique across the corpus; the join key for
    /// labels, partitions, and feature rows.
    pub file: String,
    /// Which source document this record answers.
    pub task: String,
    pub category: Category,
    /// Canonical text from `normalize`: lowercase, space-separated tokens.
    pub text: String,
}

impl Record {
    /// Binary class label derived from the category.
    pub fn class(&self) -> i8 {
        self.category.class()
    }

    pub fn is_source(&self) -> bool {
        self.category.is_source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_match_fixed_mapping() {
        let expected = [
            ("non", 0, 0),
            ("heavy", 1, 1),
            ("light", 2, 1),
            ("cut", 3, 1),
            ("orig", -1, -1),
        ];
        for (label, code, class) in expected {
            let category = Category::parse(label).unwrap();
            assert_eq!(category.code(), code, "code for {label}");
            assert_eq!(category.class(), class, "class for {label}");
            assert_eq!(category.as_str(), label);
        }
    }

    #[test]
    fn unknown_category_is_an_error() {
        let err = Category::parse("medium").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownCategory(ref l) if l == "medium"));
    }

    #[test]
    fn only_orig_is_a_source() {
        assert!(Category::Orig.is_source());
        for category in [Category::Non, Category::Heavy, Category::Light, Category::Cut] {
            assert!(!category.is_source());
        }
    }

    #[test]
    fn partition_labels() {
        assert_eq!(Partition::Train.as_str(), "train");
        assert_eq!(Partition::Test.as_str(), "test");
        assert_eq!(Partition::Orig.as_str(), "orig");
    }
}
