//! Output formatting for post command results.

use super::PostResult;
use crate::output::{list_section, Outputable};

impl Outputable for PostResult {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Post #{} by {} (#{})\n\n",
            self.post.id, self.owner.username, self.owner.id
        );
        output.push_str(&list_section("Media", &self.media, |m| {
            format!("#{} [{}] {}", m.id, m.media_type, m.url)
        }));
        output.push_str(&list_section("Comments", &self.comments, |c| {
            format!("#{} by user #{}: {}", c.id, c.author_id, c.comment_text)
        }));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, Media, MediaType, Post, User};
    use rstest::{fixture, rstest};

    #[fixture]
    fn result() -> PostResult {
        PostResult {
            post: Post { id: 1, user_id: 1 },
            owner: User {
                id: 1,
                username: "alice".to_string(),
                firstname: None,
                lastname: None,
                email: "alice@example.com".to_string(),
            },
            media: vec![Media {
                id: 1,
                media_type: MediaType::Video,
                url: "https://cdn.example.com/p1.mp4".to_string(),
                post_id: 1,
            }],
            comments: vec![],
        }
    }

    crate::output_table_test! {
        test_name: test_table_output,
        fixture: result,
        fixture_type: PostResult,
        expected: "Post #1 by alice (#1)\n\nMedia (1):\n  #1 [video] https://cdn.example.com/p1.mp4\nComments (0):\n  (none)\n",
    }

    crate::output_json_test! {
        test_name: test_json_media_type,
        fixture: result,
        fixture_type: PostResult,
        assertions: {
            "media": serde_json::json!([{
                "id": 1,
                "type": "video",
                "url": "https://cdn.example.com/p1.mp4",
                "post_id": 1
            }]),
        },
    }
}
