//! Controller command handlers.

use tabled::Tabled;
use vatusa_api::models::{ControllerActionLog, ControllerData, ControllerDetails};
use vatusa_api::{ControllerSearch, VatusaClient};

use crate::cli::{ControllerArgs, ControllerCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct ControllerRow {
    #[tabled(rename = "CID")]
    cid: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Facility")]
    facility: String,
    #[tabled(rename = "Roles")]
    roles: String,
}

impl From<&ControllerData> for ControllerRow {
    fn from(c: &ControllerData) -> Self {
        Self {
            cid: c.cid,
            name: c.full_name(),
            rating: c.rating_short.clone(),
            facility: c.facility.clone(),
            roles: c.facility_roles.join(","),
        }
    }
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "By")]
    admin: String,
    #[tabled(rename = "Entry")]
    log: String,
}

impl From<&ControllerActionLog> for LogRow {
    fn from(l: &ControllerActionLog) -> Self {
        Self {
            date: l.log_date.to_string(),
            admin: util::or_dash(l.admin_controller.as_ref().map(|a| a.name.clone())),
            log: l.log.clone(),
        }
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn controller_detail(c: &ControllerData) -> String {
    let visits = c
        .visits
        .iter()
        .map(|v| v.facility.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    output::detail_block(&[
        ("CID", c.cid.to_string()),
        ("Name", c.full_name()),
        ("Email", util::or_dash(c.email.as_deref())),
        ("Rating", format!("{} ({})", c.rating_short, c.rating)),
        ("Facility", c.facility.clone()),
        ("Facility roles", c.facility_roles.join(", ")),
        ("Global roles", c.global_roles.join(", ")),
        ("Flags", c.flags.join(", ")),
        ("Visiting", visits),
        ("Joined", util::or_dash(c.facility_date.as_deref())),
        ("Promoted", util::or_dash(c.promotion_date.as_deref())),
    ])
}

fn details_detail(d: &ControllerDetails) -> String {
    let status = &d.transfer_status;
    let mut out = controller_detail(&d.controller);
    out.push_str("\n\n");
    out.push_str(&output::detail_block(&[
        ("Home controller", status.is_home_controller.to_string()),
        ("Transfer eligible", status.is_transfer_eligible.to_string()),
        ("Pending transfer", status.is_pending_transfer.to_string()),
        ("Staff", status.is_staff.to_string()),
        ("Instructor", status.is_instructor.to_string()),
        ("Transfers", d.transfers.len().to_string()),
        ("Promotions", d.promotions.len().to_string()),
    ]));
    if !d.action_log.is_empty() {
        let rows: Vec<LogRow> = d.action_log.iter().map(LogRow::from).collect();
        out.push_str("\n\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &VatusaClient,
    args: ControllerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ControllerCommand::Get { cid } => {
            let data = client
                .controller
                .get(cid)
                .await
                .map_err(|e| CliError::from(e).or_not_found("controller", cid))?;
            let out = output::render_single(global.output, &data, controller_detail, |c| {
                c.cid.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ControllerCommand::Details { cid } => {
            let details = client
                .controller
                .get_details(cid)
                .await
                .map_err(|e| CliError::from(e).or_not_found("controller", cid))?;
            let out = output::render_single(global.output, &details, details_detail, |d| {
                d.controller.cid.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ControllerCommand::Search {
            first_name,
            last_name,
            facility,
            rating,
            email,
        } => {
            let filters = ControllerSearch {
                first_name,
                last_name,
                facility,
                rating,
                email,
            };
            let results = client.controller.search(&filters).await?;
            let out = output::render_list(
                global.output,
                &results,
                |c| ControllerRow::from(c),
                |c| c.cid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ControllerCommand::Log { cid } => {
            let log = client
                .controller
                .get_action_log(cid)
                .await
                .map_err(|e| CliError::from(e).or_not_found("controller", cid))?;
            let out = output::render_list(
                global.output,
                &log,
                |l| LogRow::from(l),
                |l| l.log_date.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ControllerCommand::SetRating {
            cid,
            rating,
            admin_cid,
        } => {
            client
                .controller
                .update_rating(cid, admin_cid, rating)
                .await?;
            util::done(&format!("Rating for {cid} set to {rating}"), global.quiet);
            Ok(())
        }

        ControllerCommand::SetFlag {
            cid,
            flag,
            value,
            admin_cid,
        } => {
            client
                .controller
                .set_flag(cid, admin_cid, &flag, value)
                .await?;
            util::done(&format!("Flag {flag} for {cid} set to {value}"), global.quiet);
            Ok(())
        }
    }
}
