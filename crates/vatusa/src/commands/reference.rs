//! Reference data: ratings and role catalogues.

use tabled::Tabled;
use vatusa_api::VatusaClient;
use vatusa_api::models::{Config, ConfigItemRating};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RatingRow {
    #[tabled(rename = "Rating")]
    rating: i32,
    #[tabled(rename = "Short")]
    short: String,
    #[tabled(rename = "Name")]
    long: String,
}

impl From<&ConfigItemRating> for RatingRow {
    fn from(r: &ConfigItemRating) -> Self {
        Self {
            rating: r.rating,
            short: r.short.clone(),
            long: r.long.clone(),
        }
    }
}

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn detail(config: &Config) -> String {
    let ratings: Vec<RatingRow> = config.ratings.iter().map(RatingRow::from).collect();
    let global: Vec<RoleRow> = config
        .global_roles
        .iter()
        .map(|r| RoleRow {
            role: r.role.clone(),
            name: r.name.clone(),
        })
        .collect();
    let facility: Vec<RoleRow> = config
        .facility_roles
        .iter()
        .map(|r| RoleRow {
            role: r.role.clone(),
            name: r.name.clone(),
        })
        .collect();

    format!(
        "Ratings\n{}\n\nGlobal roles\n{}\n\nFacility roles\n{}",
        output::render_table(&ratings),
        output::render_table(&global),
        output::render_table(&facility),
    )
}

pub async fn handle(client: &VatusaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let config = client.config.get().await?;
    let out = output::render_single(global.output, &config, detail, |c| {
        c.ratings
            .iter()
            .map(|r| r.short.clone())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
