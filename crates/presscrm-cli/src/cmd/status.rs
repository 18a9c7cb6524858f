use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use presscrm_core::{policy, types::LeadStatus};

#[derive(Subcommand)]
pub enum StatusSubcommand {
    /// Statuses a role may move a lead into from STATUS
    Next {
        /// Current status, e.g. "Waiting for Customer Input"
        status: String,
        /// Acting role, e.g. design
        role: String,
        /// Print nothing instead of failing on an unknown status or role
        #[arg(long)]
        lenient: bool,
    },
    /// All statuses in workflow order
    List,
}

pub fn run(subcmd: StatusSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StatusSubcommand::Next {
            status,
            role,
            lenient,
        } => next(&status, &role, lenient, json),
        StatusSubcommand::List => list(json),
    }
}

fn next(status: &str, role: &str, lenient: bool, json: bool) -> anyhow::Result<()> {
    let next = if lenient {
        policy::next_statuses_lenient(status, role)
    } else {
        policy::next_statuses_for(status, role)
            .with_context(|| format!("cannot look up transitions for '{status}' as '{role}'"))?
    };

    if json {
        print_json(&next)?;
        return Ok(());
    }
    for s in &next {
        println!("{s}");
    }
    Ok(())
}

fn list(json: bool) -> anyhow::Result<()> {
    if json {
        let rows: Vec<_> = LeadStatus::all()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "status": s,
                    "terminal": s.is_terminal(),
                    "tone": s.tone(),
                    "gated_by": policy::gating_roles(*s),
                })
            })
            .collect();
        print_json(&rows)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = LeadStatus::all()
        .iter()
        .map(|s| {
            let roles: Vec<_> = policy::gating_roles(*s).iter().map(|r| r.as_str()).collect();
            vec![
                s.to_string(),
                if s.is_terminal() { "terminal".to_string() } else { String::new() },
                s.tone().to_string(),
                roles.join(", "),
            ]
        })
        .collect();
    print_table(&["STATUS", "KIND", "TONE", "ADVANCED BY"], rows);
    Ok(())
}
