//! Output formatting for follow command results.

use super::FollowResult;
use crate::output::Outputable;

impl Outputable for FollowResult {
    fn to_table(&self) -> String {
        format!(
            "Follow #{}: {} (#{}) now follows {} (#{})\n",
            self.follower.id, self.from.username, self.from.id, self.to.username, self.to.id
        )
    }
}
