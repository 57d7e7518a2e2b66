// News records

use serde::{Deserialize, Serialize};

use super::controller::Cid;

/// A news post as listed by `/news/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: u64,
    pub facility: String,
    pub author_cid: Cid,
    pub title: String,
    pub body: String,
    pub banner_image_url: Option<String>,
    pub publish: bool,
}

/// Fields sent when creating or updating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsPostForm<'a> {
    pub facility: &'a str,
    pub author_cid: Cid,
    pub title: &'a str,
    pub body: &'a str,
    pub banner_image_url: &'a str,
    pub publish: bool,
}
