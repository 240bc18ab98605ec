//! Display-only due-date classification, recomputed on every render.

pub const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Normal,
}

impl DueStatus {
    /// Style hook name for the rendering surface.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueSoon => "due-soon",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueLabel {
    pub status: DueStatus,
    pub text: String,
}

/// `ceil((due - now) / 1 day)`, saturating at the i64 range.
pub fn days_until(due_ms: i64, now_ms: i64) -> i64 {
    -now_ms.saturating_sub(due_ms).div_euclid(DAY_MS)
}

pub fn classify_due(due_ms: i64, now_ms: i64) -> DueLabel {
    let days = days_until(due_ms, now_ms);
    if due_ms < now_ms {
        return DueLabel {
            status: DueStatus::Overdue,
            text: format!("Overdue ({} days ago)", days.unsigned_abs()),
        };
    }
    if days <= 1 {
        let text = if days == 0 { "Due today" } else { "Due tomorrow" };
        return DueLabel {
            status: DueStatus::DueSoon,
            text: text.to_string(),
        };
    }
    DueLabel {
        status: DueStatus::Normal,
        text: format!("Due in {days} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_due, days_until, DueStatus, DAY_MS};

    #[test]
    fn days_until_rounds_up() {
        assert_eq!(days_until(0, 0), 0);
        assert_eq!(days_until(1, 0), 1);
        assert_eq!(days_until(DAY_MS, 0), 1);
        assert_eq!(days_until(DAY_MS + 1, 0), 2);
        assert_eq!(days_until(-DAY_MS / 2, 0), 0);
        assert_eq!(days_until(-DAY_MS * 3 / 2, 0), -1);
    }

    #[test]
    fn labels_cover_each_bucket() {
        let now = 10 * DAY_MS;
        assert_eq!(classify_due(now, now).text, "Due today");
        assert_eq!(classify_due(now + 3_600_000, now).text, "Due tomorrow");
        assert_eq!(classify_due(now + 3_600_000, now).status, DueStatus::DueSoon);

        let later = classify_due(now + 3 * DAY_MS, now);
        assert_eq!(later.status, DueStatus::Normal);
        assert_eq!(later.text, "Due in 3 days");

        let overdue = classify_due(now - 2 * DAY_MS - 1, now);
        assert_eq!(overdue.status, DueStatus::Overdue);
        assert_eq!(overdue.text, "Overdue (2 days ago)");
        assert_eq!(classify_due(now - DAY_MS - 1, now).text, "Overdue (1 days ago)");
        assert_eq!(classify_due(now - 1, now).text, "Overdue (0 days ago)");
    }

    #[test]
    fn extreme_instants_do_not_overflow() {
        let now = 1_792_411_200_000;
        let past = classify_due(i64::MIN, now);
        assert_eq!(past.status, DueStatus::Overdue);
        assert_eq!(
            past.text,
            format!("Overdue ({} days ago)", (i64::MIN / DAY_MS).unsigned_abs())
        );
        assert_eq!(classify_due(i64::MAX, -now).status, DueStatus::Normal);
        assert_eq!(days_until(i64::MAX, i64::MIN), i64::MAX / DAY_MS + 1);
    }
}
