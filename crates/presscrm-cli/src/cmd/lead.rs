use super::Workspace;
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use presscrm_core::{
    format::{format_currency, format_date},
    lead::Lead,
    query::{LeadQuery, SortOrder},
    types::LeadStatus,
    CrmError,
};
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum LeadSubcommand {
    /// List leads visible to the acting user
    List {
        /// Match customer name, phone or requirements (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Only leads in this status, e.g. "In Progress"
        #[arg(long)]
        status: Option<String>,
        /// newest, oldest or amount (default from config)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show lead details
    Show { id: String },
    /// Statuses the acting user may move a lead into
    Next { id: String },
    /// Move a lead to a new status
    Transition {
        id: String,
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Assign a lead to another user
    Assign {
        id: String,
        user: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

pub fn run(
    root: &Path,
    as_user: Option<&str>,
    subcmd: LeadSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut ws = Workspace::load(root)?;
    match subcmd {
        LeadSubcommand::List {
            search,
            status,
            sort,
        } => list(&ws, as_user, search, status.as_deref(), sort.as_deref(), json),
        LeadSubcommand::Show { id } => show(&ws, as_user, &id, json),
        LeadSubcommand::Next { id } => next(&ws, as_user, &id, json),
        LeadSubcommand::Transition { id, status, notes } => {
            transition(&mut ws, root, as_user, &id, &status, notes, json)
        }
        LeadSubcommand::Assign { id, user, notes } => {
            assign(&mut ws, root, as_user, &id, &user, notes, json)
        }
    }
}

fn list(
    ws: &Workspace,
    as_user: Option<&str>,
    search: Option<String>,
    status: Option<&str>,
    sort: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let actor = ws.actor(as_user)?;
    let query = LeadQuery {
        search,
        status: status
            .filter(|s| *s != "All")
            .map(LeadStatus::from_str)
            .transpose()
            .context("bad --status")?,
        sort: sort
            .map(SortOrder::from_str)
            .transpose()
            .context("bad --sort")?
            .unwrap_or(ws.config.leads.default_sort),
    };
    let visible = ws.data.visible_to(actor);
    let leads = query.apply(&visible);

    if json {
        print_json(&leads)?;
        return Ok(());
    }

    if leads.is_empty() {
        if query.search.is_some() || query.status.is_some() {
            println!("No leads found. Try adjusting your search or filters.");
        } else {
            println!("No leads found.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = leads
        .iter()
        .map(|l| {
            vec![
                l.id.clone(),
                l.status.to_string(),
                l.customer_name.clone(),
                format_currency(l.total_amount),
                ws.data.display_name(&l.assigned_to).to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "CUSTOMER", "AMOUNT", "ASSIGNED"], rows);
    Ok(())
}

fn show(ws: &Workspace, as_user: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let actor = ws.actor(as_user)?;
    let lead = ws.data.lead_for(actor, id)?;

    if json {
        print_json(lead)?;
        return Ok(());
    }

    println!("Lead:      {} ({})", lead.id, lead.customer_name);
    println!("Status:    {}", lead.status);
    println!("Phone:     {}", lead.customer_phone);
    if let Some(ref email) = lead.customer_email {
        println!("Email:     {email}");
    }
    println!("Needs:     {} (qty {})", lead.requirements, lead.quantity);
    println!(
        "Amount:    {} total, {} advance, {} pending",
        format_currency(lead.total_amount),
        format_currency(lead.advance_amount),
        format_currency(lead.pending_amount)
    );
    if let Some(due) = lead.expected_delivery_date {
        println!("Due:       {}", format_date(due));
    }
    println!("Created:   {} by {}", format_date(lead.created_at), ws.data.display_name(&lead.created_by));
    println!("Assigned:  {}", ws.data.display_name(&lead.assigned_to));
    if let Some(ref notes) = lead.notes {
        println!("Notes:     {notes}");
    }

    println!("\nStatus history:");
    for h in &lead.status_history {
        println!(
            "  {:<12} {:<28} {}",
            format_date(h.changed_at),
            h.status.to_string(),
            ws.data.display_name(&h.changed_by)
        );
    }

    if !lead.assignment_history.is_empty() {
        println!("\nAssignments:");
        for a in &lead.assignment_history {
            println!(
                "  {:<12} {} → {}",
                format_date(a.assigned_at),
                ws.data.display_name(&a.assigned_by),
                ws.data.display_name(&a.assigned_to)
            );
        }
    }

    if let Some(ref input) = lead.customer_input {
        println!("\nCustomer input ({}):", format_date(input.submitted_at));
        println!("  {} {}", input.name, input.mobile);
        for f in &input.files {
            println!("  - {f}");
        }
    }

    print_available(lead, lead.available_transitions(actor));
    Ok(())
}

fn next(ws: &Workspace, as_user: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let actor = ws.actor(as_user)?;
    let lead = ws.data.lead_for(actor, id)?;
    let available = lead.available_transitions(actor);

    if json {
        print_json(&serde_json::json!({
            "lead": lead.id,
            "status": lead.status,
            "role": actor.role,
            "next": available,
        }))?;
        return Ok(());
    }

    print_available(lead, available);
    Ok(())
}

fn print_available(lead: &Lead, available: &[LeadStatus]) {
    if available.is_empty() {
        println!("\nNo actions available on '{}' ({}).", lead.id, lead.status);
        return;
    }
    println!("\nAvailable actions:");
    for status in available {
        println!("  → {status}");
    }
}

#[allow(clippy::too_many_arguments)]
fn transition(
    ws: &mut Workspace,
    root: &Path,
    as_user: Option<&str>,
    id: &str,
    status: &str,
    notes: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let target = LeadStatus::from_str(status).with_context(|| format!("unknown status: {status}"))?;
    let actor = ws.actor(as_user)?.clone();
    ws.data.lead_for(&actor, id)?;

    let lead = ws.data.lead_mut(id)?;
    let from = lead.status;
    lead.apply_transition(target, &actor, notes, Utc::now())
        .with_context(|| format!("cannot move '{id}' to {target}"))?;
    ws.save(root)?;
    tracing::info!(lead = id, %from, to = %target, by = %actor.id, "lead transitioned");

    if json {
        print_json(&serde_json::json!({
            "lead": id,
            "from": from,
            "status": target,
        }))?;
    } else {
        println!("Moved '{id}' from {from} to {target}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn assign(
    ws: &mut Workspace,
    root: &Path,
    as_user: Option<&str>,
    id: &str,
    user_id: &str,
    notes: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let actor = ws.actor(as_user)?.clone();
    if !actor.role.can_reassign() {
        return Err(CrmError::Forbidden(format!("role '{}' cannot reassign leads", actor.role)).into());
    }
    ws.data.lead_for(&actor, id)?;
    let assignee = ws.data.user(user_id)?.clone();

    let lead = ws.data.lead_mut(id)?;
    lead.reassign(&assignee, &actor, notes, Utc::now());
    ws.save(root)?;

    if json {
        print_json(&serde_json::json!({ "lead": id, "assigned_to": assignee.id }))?;
    } else {
        println!("Assigned '{id}' to {} ({})", assignee.name, assignee.role);
    }
    Ok(())
}
