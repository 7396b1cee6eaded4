//! Output formatting for import command results.

use crate::output::Outputable;
use crate::store::import::ImportResult;

impl Outputable for ImportResult {
    fn to_table(&self) -> String {
        let mut output = String::new();

        if self.cleared {
            output.push_str("Cleared existing data.\n\n");
        }

        output.push_str("Import Summary:\n");
        output.push_str(&format!("  Users: {}\n", self.users_imported));
        output.push_str(&format!("  Followers: {}\n", self.followers_imported));
        output.push_str(&format!("  Posts: {}\n", self.posts_imported));
        output.push_str(&format!("  Media: {}\n", self.media_imported));
        output.push_str(&format!("  Comments: {}\n", self.comments_imported));

        output
    }
}
