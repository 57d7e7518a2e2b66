//! News command handlers.

use tabled::Tabled;
use vatusa_api::VatusaClient;
use vatusa_api::models::NewsPost;

use crate::cli::{GlobalOpts, NewsArgs, NewsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NewsRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Facility")]
    facility: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: u32,
    #[tabled(rename = "Published")]
    published: bool,
}

impl From<&NewsPost> for NewsRow {
    fn from(p: &NewsPost) -> Self {
        Self {
            id: p.id,
            facility: p.facility.clone(),
            title: p.title.clone(),
            author: p.author_cid,
            published: p.publish,
        }
    }
}

pub async fn handle(
    client: &VatusaClient,
    args: NewsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NewsCommand::List => {
            let posts = client.news.get_news().await?;
            let out = output::render_list(
                global.output,
                &posts,
                |p| NewsRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NewsCommand::Create {
            facility,
            author_cid,
            title,
            body,
            banner_image_url,
            publish,
        } => {
            client
                .news
                .create_news(
                    &facility,
                    author_cid,
                    &title,
                    &body,
                    &banner_image_url,
                    publish,
                )
                .await?;
            util::done(&format!("Created news post '{title}'"), global.quiet);
            Ok(())
        }

        NewsCommand::Delete { post_id } => {
            if !util::confirm(&format!("Delete news post {post_id}?"), global.yes)? {
                return Ok(());
            }
            client
                .news
                .delete_news_post(post_id)
                .await
                .map_err(|e| CliError::from(e).or_not_found("news post", post_id))?;
            util::done(&format!("Deleted news post {post_id}"), global.quiet);
            Ok(())
        }
    }
}
