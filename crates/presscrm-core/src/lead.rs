use crate::error::{CrmError, Result};
use crate::policy;
use crate::types::{LeadStatus, PaymentMethod, PaymentType};
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// History entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    pub id: String,
    pub status: LeadStatus,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentHistory {
    pub id: String,
    pub assigned_to: String,
    pub assigned_by: String,
    pub assigned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Payment / CustomerInput
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: u64,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What a customer sent back through the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub id: String,
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_mobile: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Lead
// ---------------------------------------------------------------------------

/// A customer order tracked through the printing workflow. Users are
/// referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub requirements: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub status: LeadStatus,
    #[serde(default)]
    pub status_history: Vec<StatusHistory>,
    pub assigned_to: String,
    #[serde(default)]
    pub assignment_history: Vec<AssignmentHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_input_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_input: Option<CustomerInput>,
    pub total_amount: u64,
    #[serde(default)]
    pub advance_amount: u64,
    #[serde(default)]
    pub pending_amount: u64,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Lead {
    /// A fresh lead in `Initiated`, created by and assigned to `creator`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        requirements: impl Into<String>,
        quantity: u32,
        total_amount: u64,
        creator: &User,
        now: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        Self {
            status_history: vec![StatusHistory {
                id: format!("sh-{}-1", id),
                status: LeadStatus::Initiated,
                changed_by: creator.id.clone(),
                changed_at: now,
                notes: None,
            }],
            id,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            customer_email: None,
            requirements: requirements.into(),
            quantity,
            expected_delivery_date: None,
            status: LeadStatus::Initiated,
            assigned_to: creator.id.clone(),
            assignment_history: Vec::new(),
            customer_input_url: None,
            customer_input: None,
            total_amount,
            advance_amount: 0,
            pending_amount: total_amount,
            payments: Vec::new(),
            created_by: creator.id.clone(),
            created_at: now,
            updated_at: now,
            files: Vec::new(),
            notes: None,
        }
    }

    /// Statuses `actor` may move this lead into right now.
    pub fn available_transitions(&self, actor: &User) -> &'static [LeadStatus] {
        policy::next_statuses(self.status, actor.role)
    }

    // -----------------------------------------------------------------------
    // Mutations (applied by the caller after choosing from the policy)
    // -----------------------------------------------------------------------

    pub fn apply_transition(
        &mut self,
        target: LeadStatus,
        actor: &User,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !policy::can_transition(self.status, target, actor.role) {
            let allowed = self.available_transitions(actor);
            let reason = if allowed.is_empty() {
                format!("role '{}' cannot advance a lead in '{}'", actor.role, self.status)
            } else {
                let names: Vec<_> = allowed.iter().map(|s| s.as_str()).collect();
                format!("role '{}' may only choose: {}", actor.role, names.join(", "))
            };
            return Err(CrmError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
                reason,
            });
        }

        self.status = target;
        self.status_history.push(StatusHistory {
            id: format!("sh-{}-{}", self.id, self.status_history.len() + 1),
            status: target,
            changed_by: actor.id.clone(),
            changed_at: now,
            notes,
        });
        self.updated_at = now;
        Ok(())
    }

    pub fn reassign(&mut self, to: &User, by: &User, notes: Option<String>, now: DateTime<Utc>) {
        self.assigned_to = to.id.clone();
        self.assignment_history.push(AssignmentHistory {
            id: format!("ah-{}-{}", self.id, self.assignment_history.len() + 1),
            assigned_to: to.id.clone(),
            assigned_by: by.id.clone(),
            assigned_at: now,
            notes,
        });
        self.updated_at = now;
    }

    /// Record a payment and recompute the advance and pending amounts.
    pub fn record_payment(&mut self, payment: Payment) {
        self.updated_at = self.updated_at.max(payment.date);
        self.payments.push(payment);
        self.recompute_amounts();
    }

    pub fn attach_customer_input(&mut self, input: CustomerInput) {
        self.updated_at = self.updated_at.max(input.submitted_at);
        self.customer_input = Some(input);
    }

    pub fn paid_amount(&self) -> u64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    fn recompute_amounts(&mut self) {
        self.advance_amount = self
            .payments
            .iter()
            .filter(|p| p.payment_type == PaymentType::Advance)
            .map(|p| p.amount)
            .sum();
        self.pending_amount = self.total_amount.saturating_sub(self.paid_amount());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
