use serde::{Deserialize, Serialize};

/// A Policy is set on a `User` and decides which actions it can and cannot take.
///
/// The `Policy` is carried in the json web token claims minted by the hub.
/// Every mutating `UseCase` contains a list of `Permission`s that is required
/// for a `User` to execute it, if the `User`s `Policy` is not authorized
/// some of these `Permission`s the request will be rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
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
            // First loop to check if All exists
            if allowed.contains(&Permission::All) {
                return true;
            }

            // Check that all permissions are in allowed
            for permission in permissions {
                if !allowed.contains(permission) {
                    return false;
                }
            }

            return true;
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    ReadReminders,
    CreateReminder,
    CreateGlobalReminder,
    UpdateReminder,
    UpdateGlobalReminder,
    DeleteReminder,
    DeleteGlobalReminder,
}

/// Decides whether a user holding `policy` may update or delete an existing
/// reminder. Personal reminders can only be modified by their owner. Global
/// reminders are shared, so modifying them takes the matching global
/// permission whether or not the caller created them.
pub fn can_modify_reminder(
    policy: &Policy,
    is_owner: bool,
    is_global: bool,
    own: Permission,
    global: Permission,
) -> bool {
    if is_global {
        policy.authorize(&[global])
    } else {
        is_owner && policy.authorize(&[own])
    }
}
