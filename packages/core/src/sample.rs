//! Placeholder content shown when the API cannot be reached.
//!
//! Only used when sample fallback is switched on; every caller logs a
//! warning before substituting these.

use chrono::Local;
use rand::Rng;

use crate::models::{Author, Comment, PostDetail, PostSummary};

const SAMPLE_CREATED_AT: &str = "2021-01-01 00:00:00";
const SAMPLE_COMMENT_COUNT: i64 = 3;

fn sample_author(id: i64) -> Author {
    Author {
        user_id: 1,
        nickname: Some(format!("sample author {}", id)),
        profile_image_url: None,
    }
}

/// One page worth of posts, numbered as if the server had served `page`.
pub fn sample_posts(page: u32, size: u32) -> Vec<PostSummary> {
    let mut rng = rand::thread_rng();
    let first = i64::from(page.saturating_sub(1)) * i64::from(size);

    (1..=i64::from(size))
        .map(|i| {
            let post_id = first + i;
            PostSummary {
                post_id,
                title: format!("Title {}", post_id),
                likes: rng.gen_range(0..2_000),
                comments: rng.gen_range(0..1_000),
                views: rng.gen_range(0..5_000),
                created_at: SAMPLE_CREATED_AT.to_string(),
                author: Some(sample_author(post_id)),
            }
        })
        .collect()
}

pub fn sample_post(post_id: i64) -> PostDetail {
    let mut rng = rand::thread_rng();
    PostDetail {
        post_id,
        title: format!("Title {}", post_id),
        content: "The board could not be reached, so this is placeholder content.".to_string(),
        likes: rng.gen_range(0..2_000),
        comments: SAMPLE_COMMENT_COUNT as u64,
        views: rng.gen_range(0..5_000),
        created_at: SAMPLE_CREATED_AT.to_string(),
        author: Some(sample_author(post_id)),
        images: Vec::new(),
        liked_by_me: false,
    }
}

pub fn sample_comments(post_id: i64) -> Vec<Comment> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    (1..=SAMPLE_COMMENT_COUNT)
        .map(|i| Comment {
            comment_id: post_id * 100 + i,
            content: format!("Sample comment {}", i),
            created_at: now.clone(),
            author: Some(Author {
                user_id: 1 + i,
                nickname: Some(format!("commenter {}", i)),
                profile_image_url: None,
            }),
        })
        .collect()
}
