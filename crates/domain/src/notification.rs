use crate::{assignment::ReviewAssignment, reviewer::Reviewer, shared::entity::ID};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Urgency of a consolidated reminder, derived from its most urgent item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    DueToday,
    DueSoon,
}

impl Urgency {
    pub fn from_days_until_deadline(days: i64) -> Self {
        if days < 0 {
            Self::Urgent
        } else if days == 0 {
            Self::DueToday
        } else {
            Self::DueSoon
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::DueToday => "due today",
            Self::DueSoon => "due soon",
        }
    }
}

/// One line of a consolidated reminder
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    pub assignment_id: ID,
    pub product_id: ID,
    pub round_id: Option<ID>,
    pub deadline: NaiveDate,
    pub days_until_deadline: i64,
}

impl ReminderItem {
    fn new(assignment: ReviewAssignment, today: NaiveDate) -> Option<Self> {
        let deadline = assignment.deadline?;
        let days_until_deadline = assignment.days_until_deadline(today)?;
        Some(Self {
            days_until_deadline,
            assignment_id: assignment.id,
            product_id: assignment.product_id,
            round_id: assignment.round_id,
            deadline,
        })
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::from_days_until_deadline(self.days_until_deadline)
    }

    pub fn due_label(&self) -> String {
        match self.days_until_deadline {
            d if d < -1 => format!("overdue by {} days", -d),
            -1 => "overdue by 1 day".into(),
            0 => "due today".into(),
            1 => "due tomorrow".into(),
            d => format!("due in {} days", d),
        }
    }
}

/// All currently eligible assignments of one reviewer, most urgent first
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewerDigest {
    pub reviewer_id: ID,
    pub items: Vec<ReminderItem>,
}

/// A rendered reminder ready to be handed to a mail transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub to_name: String,
    pub to_address: String,
    pub subject: String,
    pub body: String,
}

impl ReviewerDigest {
    /// Any overdue item makes the whole message urgent, otherwise any item due
    /// today makes it due today.
    pub fn urgency(&self) -> Urgency {
        self.items
            .iter()
            .map(ReminderItem::urgency)
            .min()
            .unwrap_or(Urgency::DueSoon)
    }

    pub fn assignment_ids(&self) -> Vec<ID> {
        self.items.iter().map(|i| i.assignment_id.clone()).collect()
    }

    pub fn subject(&self) -> String {
        let count = self.items.len();
        let reviews = if count == 1 { "review" } else { "reviews" };
        match self.urgency() {
            Urgency::Urgent => format!("[Urgent] {} product {} overdue or due soon", count, reviews),
            Urgency::DueToday => format!("[Due today] {} product {} due soon", count, reviews),
            Urgency::DueSoon => format!("[Reminder] {} product {} due soon", count, reviews),
        }
    }

    pub fn compose(&self, reviewer: &Reviewer) -> ReminderMessage {
        let items = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "- Product {} (deadline {}): {}",
                    item.product_id,
                    item.deadline.format("%Y-%m-%d"),
                    item.due_label()
                )
            })
            .join("\n");
        let body = format!(
            "Hi {},\n\nThe following product reviews assigned to you need your attention:\n\n{}\n\nThank you for reviewing.\n",
            reviewer.name, items
        );

        ReminderMessage {
            to_name: reviewer.name.clone(),
            to_address: reviewer.email.clone(),
            subject: self.subject(),
            body,
        }
    }
}

/// Groups eligible assignments into one digest per reviewer.
///
/// Items within a digest are ordered by ascending days until deadline. Digests
/// themselves are ordered by their most urgent item and then by reviewer id, so
/// a run processes reviewers in a stable order.
pub fn group_by_reviewer(eligible: Vec<ReviewAssignment>, today: NaiveDate) -> Vec<ReviewerDigest> {
    let mut digests = eligible
        .into_iter()
        .filter_map(|a| {
            let reviewer_id = a.reviewer_id.clone();
            ReminderItem::new(a, today).map(|item| (reviewer_id, item))
        })
        .into_group_map()
        .into_iter()
        .map(|(reviewer_id, mut items)| {
            items.sort_by(|i1, i2| {
                i1.days_until_deadline
                    .cmp(&i2.days_until_deadline)
                    .then_with(|| i1.assignment_id.cmp(&i2.assignment_id))
            });
            ReviewerDigest { reviewer_id, items }
        })
        .collect::<Vec<_>>();

    digests.sort_by(|d1, d2| {
        let most_urgent = |d: &ReviewerDigest| d.items.first().map(|i| i.days_until_deadline);
        most_urgent(d1)
            .cmp(&most_urgent(d2))
            .then_with(|| d1.reviewer_id.cmp(&d2.reviewer_id))
    });
    digests
}
