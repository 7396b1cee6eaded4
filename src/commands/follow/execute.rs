use std::error::Error;

use serde::Serialize;

use super::FollowCmd;
use crate::commands::Execute;
use crate::db::DatabaseBackend;
use crate::store::{followers, users, StoreError};
use crate::types::{Follower, User};

/// The stored edge with both users resolved
#[derive(Debug, Clone, Serialize)]
pub struct FollowResult {
    pub follower: Follower,
    pub from: User,
    pub to: User,
}

fn load_user(db: &dyn DatabaseBackend, id: i64) -> Result<User, Box<dyn Error>> {
    users::get_user(db, id)?.ok_or_else(|| {
        StoreError::NotFound {
            relation: "user".to_string(),
            id,
        }
        .into()
    })
}

impl Execute for FollowCmd {
    type Output = FollowResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        let follower = followers::follow(db, self.from, self.to)?;
        Ok(FollowResult {
            from: load_user(db, follower.user_from_id)?,
            to: load_user(db, follower.user_to_id)?,
            follower,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::as_store_error;
    use crate::test_utils::{execute_cmd, seeded_db};
    use rstest::rstest;

    #[test]
    fn test_follow_creates_edge() {
        let db = seeded_db();
        let result = execute_cmd(FollowCmd { from: 3, to: 1 }, db.as_ref()).unwrap();

        assert_eq!(result.follower.id, 4);
        assert_eq!(result.from.username, "carol");
        assert_eq!(result.to.username, "alice");
        let alice_followers = users::followers_of(db.as_ref(), 1).unwrap();
        assert!(alice_followers.iter().any(|u| u.username == "carol"));
    }

    #[test]
    fn test_follow_unknown_user_fails() {
        let db = seeded_db();
        let err = execute_cmd(FollowCmd { from: 1, to: 42 }, db.as_ref()).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::ForeignKeyViolation { value: 42, .. })
        ));
    }

    crate::execute_empty_db_test! {
        cmd_type: FollowCmd,
        cmd: FollowCmd { from: 1, to: 2 },
    }
}
