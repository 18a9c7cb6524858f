use super::Workspace;
use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use presscrm_core::{
    intake::{intake_url, FileSelection, IntakeForm, SelectedFile},
    types::LeadStatus,
};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum IntakeSubcommand {
    /// Print the link a customer uses to send their details
    Link { lead: String },
    /// Record the details a customer sent back for a lead
    Submit {
        lead: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long = "alt-mobile")]
        alt_mobile: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Attach a file (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
}

pub fn run(
    root: &Path,
    as_user: Option<&str>,
    subcmd: IntakeSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut ws = Workspace::load(root)?;
    match subcmd {
        IntakeSubcommand::Link { lead } => link(&ws, as_user, &lead, json),
        IntakeSubcommand::Submit {
            lead,
            name,
            mobile,
            alt_mobile,
            notes,
            files,
        } => {
            let form = IntakeForm {
                name,
                mobile,
                alternative_mobile: alt_mobile,
                notes,
                files: Vec::new(),
            };
            submit(&mut ws, root, &lead, form, &files, json)
        }
    }
}

fn link(ws: &Workspace, as_user: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let actor = ws.actor(as_user)?;
    let lead = ws.data.lead_for(actor, id)?;
    let url = lead.customer_input_url.clone().unwrap_or_else(|| {
        intake_url(&ws.config.company.intake_base_url, &lead.customer_name, &lead.id)
    });
    if json {
        print_json(&serde_json::json!({ "lead": lead.id, "url": url }))?;
    } else {
        println!("{url}");
    }
    Ok(())
}

fn submit(
    ws: &mut Workspace,
    root: &Path,
    id: &str,
    mut form: IntakeForm,
    paths: &[PathBuf],
    json: bool,
) -> anyhow::Result<()> {
    let mut selection = FileSelection::new(ws.config.intake.max_files);
    let batch = paths
        .iter()
        .map(|p| {
            SelectedFile::from_path(p).with_context(|| format!("cannot attach {}", p.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    selection.add(batch)?;
    let attached: Vec<String> = selection
        .files()
        .iter()
        .map(|f| format!("{} ({} KB)", f.name, f.size_kb()))
        .collect();
    form.files = selection.into_files();

    let lead = ws.data.lead_mut(id)?;
    if lead.status != LeadStatus::WaitingForCustomerInput {
        tracing::warn!(lead = id, status = %lead.status, "intake recorded outside customer input stage");
    }
    let input = form.submit(Utc::now())?;
    let input_id = input.id.clone();
    let files = input.files.clone();
    lead.attach_customer_input(input);
    ws.save(root)?;
    tracing::info!(lead = id, input = %input_id, "customer input recorded");

    if json {
        print_json(&serde_json::json!({
            "lead": id,
            "input": input_id,
            "files": files,
        }))?;
    } else {
        println!("Recorded customer input for '{id}'");
        for f in &attached {
            println!("  - {f}");
        }
    }
    Ok(())
}
