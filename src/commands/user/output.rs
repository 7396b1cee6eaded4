//! Output formatting for user command results.

use super::UserResult;
use crate::output::{list_section, Outputable};
use crate::types::User;

fn user_line(user: &User) -> String {
    format!("#{} {}", user.id, user.username)
}

impl Outputable for UserResult {
    fn to_table(&self) -> String {
        let user = &self.user;
        let mut output = format!("User #{}: {} <{}>\n", user.id, user.username, user.email);
        output.push_str(&format!("  Name: {}\n\n", user.display_name()));

        output.push_str(&list_section("Followers", &self.followers, user_line));
        output.push_str(&list_section("Following", &self.following, user_line));
        output.push_str(&list_section("Posts", &self.posts, |p| format!("#{}", p.id)));
        output.push_str(&list_section("Comments", &self.comments, |c| {
            format!("#{} on post #{}: {}", c.id, c.post_id, c.comment_text)
        }));
        output
    }
}
