use serde::{Deserialize, Serialize};

/// A Policy decides which actions a caller can and cannot take.
///
/// Callers authenticated with the admin api key get a `Policy` allowing
/// everything. Bearer tokens carry their own `Policy` in the `kuratorPolicy`
/// claim. Every `UseCase` lists the `Permission`s it requires and the request
/// is rejected if the `Policy` does not authorize all of them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    pub fn allow_all() -> Self {
        Self {
            allow: Some(vec![Permission::All]),
            reject: None,
        }
    }

    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            if allowed.contains(&Permission::All) {
                return true;
            }

            return permissions
                .iter()
                .all(|permission| allowed.contains(permission));
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    ManageReminderSettings,
    RunReminders,
    ReadReminders,
    ManageReviewRounds,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permissions() {
        let policy = Policy::default();
        assert!(policy.authorize(&[]));
        assert!(!policy.authorize(&[Permission::RunReminders]));

        let policy = Policy::allow_all();
        assert!(policy.authorize(&[Permission::RunReminders]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: Some(vec![Permission::RunReminders]),
        };
        assert!(!policy.authorize(&[Permission::RunReminders]));
        assert!(policy.authorize(&[Permission::ReadReminders]));

        let policy = Policy {
            allow: Some(vec![Permission::ReadReminders]),
            reject: Some(Vec::new()),
        };
        assert!(policy.authorize(&[Permission::ReadReminders]));
        assert!(!policy.authorize(&[
            Permission::ReadReminders,
            Permission::ManageReminderSettings
        ]));

        let policy = Policy {
            allow: Some(vec![Permission::ManageReviewRounds]),
            reject: Some(vec![Permission::All]),
        };
        assert!(!policy.authorize(&[Permission::ManageReviewRounds]));
    }

    #[test]
    fn it_parses_policy_claims() {
        let policy: Policy =
            serde_json::from_str(r#"{"allow": ["*"], "reject": ["RunReminders"]}"#).unwrap();
        assert!(policy.authorize(&[Permission::ManageReviewRounds]));
        assert!(!policy.authorize(&[Permission::RunReminders]));
    }
}
