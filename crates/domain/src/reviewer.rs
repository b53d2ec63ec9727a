use crate::shared::entity::{Entity, ID};

/// The person behind a reviewer identity, as far as reminders are concerned
#[derive(Debug, Clone, PartialEq)]
pub struct Reviewer {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl Reviewer {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
        }
    }
}

impl Entity for Reviewer {
    fn id(&self) -> &ID {
        &self.id
    }
}
