use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};
use entity::prelude::*;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

/// Posts served to a caller, with whether they came from the cache.
#[derive(Clone, Debug, PartialEq)]
pub struct PostsSnapshot {
    pub posts: Vec<SocialPostEntity>,
    pub cached: bool,
    /// set only when the snapshot is served from the cache
    pub next_update: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct CachedPosts {
    posts: Vec<SocialPostEntity>,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

/// Single-slot cache of the last successful fan-out. The lock is held
/// across the fetch so concurrent misses trigger one upstream call.
#[derive(Debug)]
pub struct PostCache {
    window: Duration,
    state: Mutex<Option<CachedPosts>>,
}

impl PostCache {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(None),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> PostsSnapshot
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<SocialPostEntity>>,
    {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if !cached.posts.is_empty()
                && cached.fetched_at.elapsed() < self.window
            {
                let next_update = chrono::Duration::from_std(self.window)
                    .ok()
                    .and_then(|window| {
                        cached.fetched_at_utc.checked_add_signed(window)
                    });

                return PostsSnapshot {
                    posts: cached.posts.clone(),
                    cached: true,
                    next_update,
                };
            }
        }

        let posts = fetch().await;
        info!(task = "refresh post cache", count = posts.len());

        *state = Some(CachedPosts {
            posts: posts.clone(),
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        });

        PostsSnapshot {
            posts,
            cached: false,
            next_update: None,
        }
    }

    pub async fn clear(&self) {
        *self.state.lock().await = None;
    }
}
