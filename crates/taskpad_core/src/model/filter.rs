//! List filter criteria.

use crate::model::task::{Category, Task};
use std::fmt::{Display, Formatter};

/// Which slice of the task list is displayed.
///
/// Category criteria match regardless of completion; `Completed` matches
/// across all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterCriterion {
    #[default]
    All,
    Personal,
    Work,
    Urgent,
    Completed,
}

impl FilterCriterion {
    pub const ALL: [FilterCriterion; 5] = [
        FilterCriterion::All,
        FilterCriterion::Personal,
        FilterCriterion::Work,
        FilterCriterion::Urgent,
        FilterCriterion::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Urgent => "urgent",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "personal" => Some(Self::Personal),
            "work" => Some(Self::Work),
            "urgent" => Some(Self::Urgent),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Category this criterion selects, if it is a category criterion.
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Personal => Some(Category::Personal),
            Self::Work => Some(Category::Work),
            Self::Urgent => Some(Category::Urgent),
            Self::All | Self::Completed => None,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            other => other.category() == Some(task.category),
        }
    }
}

impl From<Category> for FilterCriterion {
    fn from(value: Category) -> Self {
        match value {
            Category::Personal => Self::Personal,
            Category::Work => Self::Work,
            Category::Urgent => Self::Urgent,
        }
    }
}

impl Display for FilterCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
