//! Post listing with infinite scroll.
//!
//! `PostFeed` remembers how far the reader has scrolled. Each
//! [`PostFeed::load_next`] call is one "reached the bottom" event: it fetches
//! the following page until the server reports the last one.

use crate::error::AppError;
use crate::models::PostSummary;
use crate::sample;
use crate::services::provider::BoardApi;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct PostFeed {
    page_size: u32,
    current_page: u32,
    has_more: bool,
    sample_fallback: bool,
}

impl PostFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
            has_more: true,
            sample_fallback: false,
        }
    }

    /// Start after `page - 1` already-read pages.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.current_page = page.saturating_sub(1);
        self
    }

    pub fn with_sample_fallback(mut self, enabled: bool) -> Self {
        self.sample_fallback = enabled;
        self
    }

    /// Last page successfully loaded, `0` before the first load.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Fetch the next page. Once the feed is exhausted this returns an empty
    /// list without calling the API.
    pub async fn load_next(&mut self, api: &dyn BoardApi) -> Result<Vec<PostSummary>, AppError> {
        if !self.has_more {
            return Ok(Vec::new());
        }

        let page = self.current_page + 1;
        match api.list_posts(page, self.page_size).await {
            Ok(result) => {
                self.current_page = page;
                if result.pageable.page >= result.pageable.total_pages || result.content.is_empty()
                {
                    self.has_more = false;
                }
                tracing::debug!(
                    "Loaded page {} ({} posts, more: {})",
                    page,
                    result.content.len(),
                    self.has_more
                );
                Ok(result.content)
            }
            Err(err) if self.sample_fallback && err.is_network() => {
                tracing::warn!("Post list unavailable ({}); showing sample posts", err);
                self.current_page = page;
                Ok(sample::sample_posts(page, self.page_size))
            }
            Err(err) => Err(err),
        }
    }

    /// Scroll up to `pages` times, stopping early at the end of the feed.
    pub async fn load_pages(
        &mut self,
        api: &dyn BoardApi,
        pages: u32,
    ) -> Result<Vec<PostSummary>, AppError> {
        let mut posts = Vec::new();
        for _ in 0..pages {
            if !self.has_more {
                break;
            }
            posts.extend(self.load_next(api).await?);
        }
        Ok(posts)
    }
}

impl Default for PostFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_board::MockBoard;

    #[tokio::test]
    async fn loads_pages_until_last_one() {
        let api = MockBoard::new().with_user(1).with_posts(25, 1);
        let mut feed = PostFeed::new(10);

        assert_eq!(feed.load_next(&api).await.unwrap().len(), 10);
        assert!(feed.has_more());
        assert_eq!(feed.load_next(&api).await.unwrap().len(), 10);
        assert!(feed.has_more());

        let last = feed.load_next(&api).await.unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].post_id, 21);
        assert!(!feed.has_more());
        assert_eq!(feed.current_page(), 3);
    }

    #[tokio::test]
    async fn exhausted_feed_does_not_call_the_api() {
        let api = MockBoard::new().with_user(1).with_posts(3, 1);
        let mut feed = PostFeed::new(10);

        feed.load_next(&api).await.unwrap();
        assert!(!feed.has_more());
        assert!(feed.load_next(&api).await.unwrap().is_empty());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_board_ends_the_feed() {
        let api = MockBoard::new().with_user(1);
        let mut feed = PostFeed::default();

        assert!(feed.load_next(&api).await.unwrap().is_empty());
        assert!(!feed.has_more());
    }

    #[tokio::test]
    async fn load_pages_stops_at_the_end() {
        let api = MockBoard::new().with_user(1).with_posts(15, 1);
        let mut feed = PostFeed::new(10);

        let posts = feed.load_pages(&api, 5).await.unwrap();
        assert_eq!(posts.len(), 15);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn starting_page_is_respected() {
        let api = MockBoard::new().with_user(1).with_posts(30, 1);
        let mut feed = PostFeed::new(10).starting_at(2);

        let posts = feed.load_next(&api).await.unwrap();
        assert_eq!(posts[0].post_id, 11);
    }

    #[tokio::test]
    async fn offline_without_fallback_is_an_error() {
        let api = MockBoard::new().with_user(1).offline();
        let mut feed = PostFeed::new(10);

        assert!(feed.load_next(&api).await.unwrap_err().is_network());
        assert_eq!(feed.current_page(), 0);
    }

    #[tokio::test]
    async fn offline_with_fallback_yields_sample_posts() {
        let api = MockBoard::new().with_user(1).offline();
        let mut feed = PostFeed::new(5).with_sample_fallback(true);

        let first = feed.load_next(&api).await.unwrap();
        let second = feed.load_next(&api).await.unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(second[0].post_id, 6);
        assert!(feed.has_more());
    }
}
