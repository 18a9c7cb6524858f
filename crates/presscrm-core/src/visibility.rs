//! Role-scoped lead visibility.

use crate::error::Result;
use crate::lead::Lead;
use crate::types::UserRole;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which leads a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Every lead.
    All,
    /// Leads the actor created or is assigned to.
    OwnedOrAssigned,
    /// Leads awaiting or finished with payment, regardless of assignment.
    PaymentStages,
    /// Only leads assigned to the actor.
    AssignedOnly,
}

impl Visibility {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin | UserRole::Admin => Visibility::All,
            UserRole::TeleSales => Visibility::OwnedOrAssigned,
            UserRole::Accounts => Visibility::PaymentStages,
            UserRole::Quotation
            | UserRole::Design
            | UserRole::DigitalProduction
            | UserRole::OffsetProduction => Visibility::AssignedOnly,
        }
    }

    fn admits(self, lead: &Lead, actor_id: &str) -> bool {
        match self {
            Visibility::All => true,
            Visibility::OwnedOrAssigned => {
                lead.created_by == actor_id || lead.assigned_to == actor_id
            }
            Visibility::PaymentStages => lead.status.is_payment_stage(),
            Visibility::AssignedOnly => lead.assigned_to == actor_id,
        }
    }
}

pub fn can_view(lead: &Lead, actor: &User) -> bool {
    Visibility::for_role(actor.role).admits(lead, &actor.id)
}

/// The leads `actor` may see, in their original order.
pub fn visible_leads<'a>(leads: &'a [Lead], actor: &User) -> Vec<&'a Lead> {
    let scope = Visibility::for_role(actor.role);
    leads
        .iter()
        .filter(|lead| scope.admits(lead, &actor.id))
        .collect()
}

/// Visibility for an actor known only by id and a raw role value.
///
/// Fails with `InvalidRole` for a role outside the closed set; an unknown
/// role never widens what is visible.
pub fn visible_leads_for<'a>(leads: &'a [Lead], actor_id: &str, role: &str) -> Result<Vec<&'a Lead>> {
    let scope = Visibility::for_role(UserRole::from_str(role)?);
    Ok(leads
        .iter()
        .filter(|lead| scope.admits(lead, actor_id))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
