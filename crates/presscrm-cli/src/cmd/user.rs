use super::Workspace;
use crate::output::{print_json, print_table};
use clap::Subcommand;
use presscrm_core::{format::format_date, visibility::Visibility};
use std::path::Path;

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List team members
    List,
    /// Show a team member
    Show { id: String },
}

pub fn run(root: &Path, subcmd: UserSubcommand, json: bool) -> anyhow::Result<()> {
    let ws = Workspace::load(root)?;
    match subcmd {
        UserSubcommand::List => list(&ws, json),
        UserSubcommand::Show { id } => show(&ws, &id, json),
    }
}

fn list(ws: &Workspace, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&ws.data.users)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ws
        .data
        .users
        .iter()
        .map(|u| {
            vec![
                u.id.clone(),
                u.name.clone(),
                u.role.to_string(),
                u.team.to_string(),
                u.email.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "ROLE", "TEAM", "EMAIL"], rows);
    Ok(())
}

fn show(ws: &Workspace, id: &str, json: bool) -> anyhow::Result<()> {
    let user = ws.data.user(id)?;
    let scope = Visibility::for_role(user.role);
    let visible = ws.data.visible_to(user).len();

    if json {
        print_json(&serde_json::json!({
            "user": user,
            "visibility": scope,
            "visible_leads": visible,
        }))?;
        return Ok(());
    }

    println!("User:     {} {} ({})", user.id, user.name, user.initials());
    println!("Email:    {}", user.email);
    println!("Role:     {}", user.role);
    println!("Team:     {}", user.team);
    println!("Joined:   {}", format_date(user.created_at));
    println!("Sees:     {visible} lead(s), scope {scope:?}");
    Ok(())
}
