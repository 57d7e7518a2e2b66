// News endpoints

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::{Dispatcher, RequestOptions};
use crate::error::Error;
use crate::models::{Cid, NewsPost, NewsPostForm};
use crate::shape::{List, NoBody};

/// Client for `/news/...`.
#[derive(Debug, Clone)]
pub struct NewsClient {
    dispatcher: Arc<Dispatcher>,
}

impl NewsClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// `GET /news/`
    pub async fn get_news(&self) -> Result<Vec<NewsPost>, Error> {
        self.dispatcher
            .get::<List<NewsPost>>("/news/", RequestOptions::new())
            .await
    }

    /// `POST /news/`
    pub async fn create_news(
        &self,
        facility: &str,
        author_cid: Cid,
        title: &str,
        body: &str,
        banner_image_url: &str,
        publish: bool,
    ) -> Result<bool, Error> {
        debug!(facility, title, "creating news post");
        let options = RequestOptions::new().form(&NewsPostForm {
            facility,
            author_cid,
            title,
            body,
            banner_image_url,
            publish,
        })?;
        self.dispatcher.post::<NoBody>("/news/", options).await?;
        Ok(true)
    }

    /// `PUT /news/{post_id}`
    pub async fn update_news_post(
        &self,
        post_id: u64,
        facility: &str,
        author_cid: Cid,
        title: &str,
        body: &str,
        banner_image_url: &str,
        publish: bool,
    ) -> Result<bool, Error> {
        debug!(post_id, "updating news post");
        let options = RequestOptions::new().form(&NewsPostForm {
            facility,
            author_cid,
            title,
            body,
            banner_image_url,
            publish,
        })?;
        self.dispatcher
            .put::<NoBody>(&format!("/news/{post_id}"), options)
            .await?;
        Ok(true)
    }

    /// `DELETE /news/{post_id}`
    pub async fn delete_news_post(&self, post_id: u64) -> Result<bool, Error> {
        debug!(post_id, "deleting news post");
        self.dispatcher
            .delete::<NoBody>(&format!("/news/{post_id}"), RequestOptions::new())
            .await?;
        Ok(true)
    }
}
