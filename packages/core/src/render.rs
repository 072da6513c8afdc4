//! Plain-text rendering of board content for the terminal.

use std::fmt::Write;

use crate::format::{format_count, format_datetime, truncate_text};
use crate::models::{Author, Comment, PostSummary, UserProfile};
use crate::pages::post_detail::PostDetailView;
use crate::validation::TITLE_MAX_LEN;

fn author_name(author: Option<&Author>) -> &str {
    author.map(Author::display_name).unwrap_or("anonymous")
}

fn stats_line(likes: u64, comments: u64, views: u64) -> String {
    format!(
        "likes {}  comments {}  views {}",
        format_count(likes),
        format_count(comments),
        format_count(views)
    )
}

pub fn post_card(post: &PostSummary) -> String {
    format!(
        "#{:<6} {}\n        {}\n        {} · {}",
        post.post_id,
        truncate_text(&post.title, TITLE_MAX_LEN),
        stats_line(post.likes, post.comments, post.views),
        format_datetime(&post.created_at),
        author_name(post.author.as_ref()),
    )
}

pub fn post_list(posts: &[PostSummary]) -> String {
    if posts.is_empty() {
        return "No posts yet.".to_string();
    }
    posts.iter().map(post_card).collect::<Vec<_>>().join("\n\n")
}

pub fn comment(comment: &Comment, mine: bool) -> String {
    format!(
        "  [{}] {} · {}{}\n    {}",
        comment.comment_id,
        author_name(comment.author.as_ref()),
        format_datetime(&comment.created_at),
        if mine { " (you)" } else { "" },
        comment.content,
    )
}

pub fn post_detail(view: &PostDetailView) -> String {
    let post = &view.post;
    let mut out = String::new();

    let _ = writeln!(out, "{}", post.title);
    let _ = writeln!(
        out,
        "{} · {}{}",
        author_name(post.author.as_ref()),
        format_datetime(&post.created_at),
        if view.can_modify() { "  [edit/delete]" } else { "" }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", post.content);

    for image in &post.images {
        if let Some(url) = image.image_url.as_deref().or(image.file_name.as_deref()) {
            let _ = writeln!(out, "[image] {}", url);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}{}",
        stats_line(post.likes, post.comments, post.views),
        if view.liked { "  (liked)" } else { "" }
    );
    let _ = writeln!(out);

    if view.comments.is_empty() {
        let _ = write!(out, "  No comments yet.");
    } else {
        let rendered: Vec<String> = view
            .comments
            .iter()
            .map(|c| comment(c, view.can_modify_comment(c)))
            .collect();
        let _ = write!(out, "{}", rendered.join("\n"));
    }

    out
}

pub fn profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    if let Some(email) = &profile.email {
        let _ = writeln!(out, "email:    {}", email);
    }
    let _ = writeln!(out, "nickname: {}", profile.nickname);
    let _ = write!(
        out,
        "image:    {}",
        profile.profile_image_url.as_deref().unwrap_or("(none)")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PostSummary {
        PostSummary {
            post_id: 3,
            title: "An unusually long title that keeps going".into(),
            likes: 1_500,
            comments: 12,
            views: 123_456,
            created_at: "2024-02-19 14:30:00".into(),
            author: None,
        }
    }

    #[test]
    fn card_truncates_title_and_compacts_counts() {
        let card = post_card(&summary());
        assert!(card.contains("An unusually long title th\n"));
        assert!(card.contains("likes 1k"));
        assert!(card.contains("views 123k"));
        assert!(card.contains("anonymous"));
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(post_list(&[]), "No posts yet.");
    }

    #[test]
    fn profile_without_image() {
        let rendered = profile(&UserProfile {
            user_id: Some(1),
            email: None,
            nickname: "neo".into(),
            profile_image_url: None,
        });
        assert_eq!(rendered, "nickname: neo\nimage:    (none)");
    }
}
