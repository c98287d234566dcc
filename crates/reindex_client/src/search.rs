use reindex_core::{Hit, PageDirection, ResultsPage};

use crate::transport::{build_client, endpoint, post_json, HttpSettings};
use crate::TransportError;

/// Cursor over the remote search results.
#[async_trait::async_trait]
pub trait SearchPager: Send + Sync {
    async fn prev(&self) -> Result<Vec<Hit>, TransportError>;
    async fn next(&self) -> Result<Vec<Hit>, TransportError>;
    async fn is_first_page(&self) -> Result<bool, TransportError>;
    async fn is_last_page(&self) -> Result<bool, TransportError>;
}

/// Moves the cursor and reads back its position.
pub async fn fetch_page(
    pager: &dyn SearchPager,
    direction: PageDirection,
) -> Result<ResultsPage, TransportError> {
    let hits = match direction {
        PageDirection::Prev => pager.prev().await?,
        PageDirection::Next => pager.next().await?,
    };
    let is_first_page = pager.is_first_page().await?;
    let is_last_page = pager.is_last_page().await?;
    Ok(ResultsPage {
        hits,
        is_first_page,
        is_last_page,
    })
}

#[derive(Debug, Clone)]
pub struct HttpSearchPager {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSearchPager {
    pub fn new(base_url: impl Into<String>, http: &HttpSettings) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(http)?,
        })
    }

    async fn call<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, TransportError> {
        let url = endpoint(&self.base_url, method)?;
        post_json::<(), T>(&self.client, url, None).await
    }
}

#[async_trait::async_trait]
impl SearchPager for HttpSearchPager {
    async fn prev(&self) -> Result<Vec<Hit>, TransportError> {
        self.call("prev").await
    }

    async fn next(&self) -> Result<Vec<Hit>, TransportError> {
        self.call("next").await
    }

    async fn is_first_page(&self) -> Result<bool, TransportError> {
        self.call("isFirstPage").await
    }

    async fn is_last_page(&self) -> Result<bool, TransportError> {
        self.call("isLastPage").await
    }
}
