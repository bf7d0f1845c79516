//! `/blogs`.

use crate::{ApiClient, FetchError, HttpTransport};
use serde::Deserialize;
use tienda_commerce::blog::BlogPost;
use tienda_commerce::PostId;

/// Blog endpoints.
pub struct BlogsApi<'a, T> {
    client: &'a ApiClient<T>,
}

/// The list endpoint answers either a bare array or a page object.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlogList {
    Items(Vec<BlogPost>),
    Page {
        #[serde(default)]
        items: Vec<BlogPost>,
    },
}

impl BlogList {
    fn into_posts(self) -> Vec<BlogPost> {
        match self {
            BlogList::Items(items) | BlogList::Page { items } => items,
        }
    }
}

impl<'a, T: HttpTransport> BlogsApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<BlogPost>, FetchError> {
        self.list_with(&[]).await
    }

    /// List posts with backend filters such as `category`.
    pub async fn list_with(&self, params: &[(&str, &str)]) -> Result<Vec<BlogPost>, FetchError> {
        let list: Option<BlogList> = self
            .client
            .get_json_with("/blogs", params)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "fetching blogs failed"))?;
        let posts = list.map(BlogList::into_posts).unwrap_or_default();
        tracing::debug!(count = posts.len(), "fetched blogs");
        Ok(posts)
    }

    pub async fn get(&self, id: &PostId) -> Result<BlogPost, FetchError> {
        self.client
            .get_json(&format!("/blogs/{id}"))
            .await
            .inspect_err(|e| tracing::error!(error = %e, id = %id, "fetching blog failed"))
    }

    /// Categories known to the backend.
    pub async fn categories(&self) -> Result<Vec<String>, FetchError> {
        let categories: Option<Vec<String>> = self
            .client
            .get_json("/blogs/categories")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "fetching blog categories failed"))?;
        Ok(categories.unwrap_or_default())
    }

    pub async fn create(&self, post: &BlogPost) -> Result<BlogPost, FetchError> {
        self.client
            .post_json("/blogs", post)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "creating blog failed"))
    }

    pub async fn update(&self, id: &PostId, post: &BlogPost) -> Result<BlogPost, FetchError> {
        self.client
            .put_json(&format!("/blogs/{id}"), post)
            .await
            .inspect_err(|e| tracing::error!(error = %e, id = %id, "updating blog failed"))
    }

    pub async fn delete(&self, id: &PostId) -> Result<(), FetchError> {
        self.client
            .delete(&format!("/blogs/{id}"))
            .await
            .inspect_err(|e| tracing::error!(error = %e, id = %id, "deleting blog failed"))
    }
}
