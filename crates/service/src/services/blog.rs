use std::sync::Arc;

use models::BlogPost;
use tracing::instrument;

use crate::defaults::{sample_posts, BLOG_LIMIT};
use crate::resolver::{Resolution, Resolver};
use crate::storage::DocumentStore;

/// Blog listing: plain fetch capped at `BLOG_LIMIT`, sample posts on failure.
pub struct BlogService {
    resolver: Resolver<BlogPost>,
}

impl BlogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { resolver: Resolver::new(store, sample_posts()).with_limit(BLOG_LIMIT) }
    }

    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> Resolution<BlogPost> {
        self.resolver.resolve().await
    }
}
