//! ACL expression parsing
//!
//! An expression is either the wildcard `*` or a comma-separated user list,
//! optionally followed by a space and a comma-separated group list:
//!
//! ```text
//! *                     everyone
//! user1,user2 group1    users and groups
//!  group1,group2        groups only (leading space, empty user list)
//! ```

use crate::acl::types::Identity;
use std::collections::BTreeSet;
use std::fmt;

/// Token granting access to every identity
pub const WILDCARD_ACL_VALUE: &str = "*";

/// Parsed ACL expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControlList {
    all_allowed: bool,
    users: BTreeSet<String>,
    groups: BTreeSet<String>,
}

impl AccessControlList {
    /// Parse an ACL expression.
    ///
    /// The wildcard is only recognized when the whole trimmed expression is
    /// `*`. The user list ends at the first space (`' '`); everything
    /// after it is the group list. Tokens are trimmed and empty tokens dropped.
    pub fn parse(expression: &str) -> Self {
        if expression.trim() == WILDCARD_ACL_VALUE {
            return Self::all_allowed();
        }

        let (user_part, group_part) = match expression.split_once(' ') {
            Some((users, groups)) => (users, Some(groups)),
            None => (expression, None),
        };

        Self {
            all_allowed: false,
            users: split_names(user_part),
            groups: group_part.map(split_names).unwrap_or_default(),
        }
    }

    /// An ACL that grants access to everyone
    pub fn all_allowed() -> Self {
        Self {
            all_allowed: true,
            users: BTreeSet::new(),
            groups: BTreeSet::new(),
        }
    }

    pub fn is_all_allowed(&self) -> bool {
        self.all_allowed
    }

    pub fn users(&self) -> &BTreeSet<String> {
        &self.users
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Check whether the list names nobody
    pub fn is_empty(&self) -> bool {
        !self.all_allowed && self.users.is_empty() && self.groups.is_empty()
    }

    /// Check if an identity is granted by this list.
    ///
    /// User and group names are compared exactly (case-sensitive). An empty
    /// user name never matches a user entry.
    pub fn is_user_allowed(&self, identity: &Identity) -> bool {
        if self.all_allowed {
            return true;
        }

        let user = identity.user();
        if !user.is_empty() && self.users.contains(user) {
            return true;
        }

        identity.groups().iter().any(|g| self.groups.contains(g))
    }
}

impl fmt::Display for AccessControlList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_allowed {
            return f.write_str(WILDCARD_ACL_VALUE);
        }

        let users = self.users.iter().map(String::as_str).collect::<Vec<_>>();
        f.write_str(&users.join(","))?;
        if !self.groups.is_empty() {
            let groups = self.groups.iter().map(String::as_str).collect::<Vec<_>>();
            write!(f, " {}", groups.join(","))?;
        }
        Ok(())
    }
}

fn split_names(part: &str) -> BTreeSet<String> {
    part.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
