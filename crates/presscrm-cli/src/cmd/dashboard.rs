use super::Workspace;
use crate::output::print_json;
use presscrm_core::{dashboard::DashboardSummary, format::format_currency};
use std::path::Path;

pub fn run(root: &Path, as_user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let ws = Workspace::load(root)?;
    let actor = ws.actor(as_user)?;
    let visible = ws.data.visible_to(actor);
    let summary = DashboardSummary::compute(&visible, ws.config.dashboard.recent_limit);

    if json {
        print_json(&summary)?;
        return Ok(());
    }

    println!("Dashboard for {} ({})", actor.name, actor.role);
    println!();
    println!("  Total leads:  {}", summary.total);
    println!("  Pending:      {}", summary.pending);
    println!("  In progress:  {}", summary.in_progress);
    println!("  Completed:    {}", summary.completed);

    println!("\nRecent activity:");
    if summary.recent.is_empty() {
        println!("  No recent activity found");
    }
    for r in &summary.recent {
        println!("  {:<8} {:<24} {}", r.id, r.customer_name, r.status);
    }

    if !summary.distribution.is_empty() {
        println!("\nStatus distribution:");
        for c in &summary.distribution {
            println!("  {:<28} {:>3}  {:>5.1}%", c.status.to_string(), c.count, c.percent);
        }
    }

    let pipeline: u64 = visible
        .iter()
        .filter(|l| !l.status.is_terminal())
        .map(|l| l.pending_amount)
        .sum();
    println!("\nOutstanding: {}", format_currency(pipeline));

    let preview = ws.config.dashboard.preview_limit;
    let mut newest = visible.clone();
    newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if !newest.is_empty() {
        println!("\nLatest leads:");
        for l in newest.iter().take(preview) {
            println!(
                "  {:<8} {:<24} {:<28} {}",
                l.id,
                l.customer_name,
                l.status.to_string(),
                format_currency(l.total_amount)
            );
        }
    }
    if newest.len() > preview {
        println!("\nShowing {preview} of {}. Run: presscrm lead list", newest.len());
    }
    Ok(())
}
