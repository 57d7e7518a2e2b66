//! Facility command handlers.

use tabled::Tabled;
use vatusa_api::VatusaClient;
use vatusa_api::models::{FacilityData, FacilityRequestsData};

use crate::cli::{FacilityArgs, FacilityCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::controller::ControllerRow;
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FacilityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: u32,
    #[tabled(rename = "ATM")]
    atm: String,
    #[tabled(rename = "Active")]
    active: bool,
}

impl From<&FacilityData> for FacilityRow {
    fn from(f: &FacilityData) -> Self {
        Self {
            id: f.facility.clone(),
            name: f.name.clone(),
            region: f.region,
            atm: util::or_dash(f.atm.as_ref().map(|c| c.name.clone())),
            active: f.is_active,
        }
    }
}

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "CID")]
    cid: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

fn request_rows(requests: &FacilityRequestsData) -> Vec<RequestRow> {
    let transfers = requests.transfers.iter().map(|t| RequestRow {
        kind: "transfer",
        cid: t.controller.cid,
        name: t.controller.name.clone(),
        from: t.from_facility.clone(),
        created: t.create_date.to_string(),
        reason: t.reason.clone(),
    });
    let visits = requests.visit_requests.iter().map(|v| RequestRow {
        kind: "visit",
        cid: v.controller.cid,
        name: v.controller.name.clone(),
        from: v.controller.facility.clone(),
        created: v.create_date.to_string(),
        reason: v.reason.clone(),
    });
    transfers.chain(visits).collect()
}

// ── Detail views ────────────────────────────────────────────────────

fn facility_detail(f: &FacilityData) -> String {
    let mut pairs = vec![
        ("ID", f.facility.clone()),
        ("Name", f.name.clone()),
        ("URL", f.url.clone()),
        ("Region", f.region.to_string()),
        ("Active", f.is_active.to_string()),
    ];
    for (role, holder) in f.staff() {
        pairs.push((
            role,
            util::or_dash(holder.map(|c| format!("{} ({})", c.name, c.cid))),
        ));
    }
    output::detail_block(&pairs)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &VatusaClient,
    args: FacilityArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FacilityCommand::List => {
            let facilities = client.facility.all().await?;
            let out = output::render_list(
                global.output,
                &facilities,
                |f| FacilityRow::from(f),
                |f| f.facility.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilityCommand::Get { facility } => {
            let data = client
                .facility
                .get(&facility)
                .await
                .map_err(|e| CliError::from(e).or_not_found("facility", &facility))?;
            let out = output::render_single(global.output, &data, facility_detail, |f| {
                f.facility.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilityCommand::Roster {
            facility,
            home_only,
            visitors_only,
        } => {
            let (home, visitor) = FacilityCommand::roster_groups(home_only, visitors_only);
            let roster = client
                .facility
                .get_roster(&facility, home, visitor)
                .await
                .map_err(|e| CliError::from(e).or_not_found("facility", &facility))?;
            let out = output::render_list(
                global.output,
                &roster,
                |c| ControllerRow::from(c),
                |c| c.cid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilityCommand::Requests { facility } => {
            let requests = client
                .facility
                .get_requests(&facility)
                .await
                .map_err(|e| CliError::from(e).or_not_found("facility", &facility))?;
            let out = output::render_single(
                global.output,
                &requests,
                |r| output::render_table(&request_rows(r)),
                |r| {
                    request_rows(r)
                        .iter()
                        .map(|row| row.cid.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilityCommand::Staff { facility } => {
            let staff = client
                .facility
                .get_staff(&facility)
                .await
                .map_err(|e| CliError::from(e).or_not_found("facility", &facility))?;
            let out = output::render_single(
                global.output,
                &staff,
                |v| format!("{v:#}"),
                ToString::to_string,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilityCommand::AddVisitor {
            facility,
            cid,
            reason,
        } => {
            client
                .facility
                .add_visitor(&facility, cid, reason.as_deref())
                .await?;
            util::done(&format!("Added {cid} to {facility} as visitor"), global.quiet);
            Ok(())
        }

        FacilityCommand::Remove {
            facility,
            cid,
            reason,
        } => {
            if !util::confirm(
                &format!("Remove {cid} from the {facility} roster?"),
                global.yes,
            )? {
                return Ok(());
            }
            client
                .facility
                .remove_controller(&facility, cid, reason.as_deref())
                .await?;
            util::done(&format!("Removed {cid} from {facility}"), global.quiet);
            Ok(())
        }
    }
}
