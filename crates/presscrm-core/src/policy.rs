//! Status transition policy.
//!
//! Maps a lead's current status and the acting role to the statuses that
//! role may move the lead into next. The policy is advisory: it never
//! touches a lead. Callers apply a chosen status themselves (see
//! [`crate::lead::Lead::apply_transition`]).

use crate::error::Result;
use crate::types::{LeadStatus, UserRole};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Every status reachable from `status` in one step, ignoring who acts.
/// Order is the canonical presentation order.
pub fn successors(status: LeadStatus) -> &'static [LeadStatus] {
    match status {
        LeadStatus::Initiated => &[LeadStatus::Confirmed],
        LeadStatus::Confirmed => &[
            LeadStatus::OnHold,
            LeadStatus::Closed,
            LeadStatus::Rejected,
            LeadStatus::WaitingForAdvancePayment,
        ],
        LeadStatus::OnHold => &[
            LeadStatus::Closed,
            LeadStatus::Rejected,
            LeadStatus::WaitingForAdvancePayment,
        ],
        LeadStatus::WaitingForAdvancePayment => &[LeadStatus::WaitingForCustomerInput],
        LeadStatus::WaitingForCustomerInput => &[LeadStatus::InProgress],
        LeadStatus::InProgress => &[LeadStatus::OutForProduction],
        LeadStatus::OutForProduction => &[LeadStatus::ProductionCompleted],
        LeadStatus::ProductionCompleted => &[LeadStatus::WaitingForFullPayment],
        LeadStatus::WaitingForFullPayment => &[LeadStatus::Dispatched],
        LeadStatus::Dispatched => &[LeadStatus::Delivered],
        LeadStatus::Closed | LeadStatus::Rejected | LeadStatus::Delivered => &[],
    }
}

/// Roles allowed to advance a lead out of `status`. Empty for terminal
/// statuses.
pub fn gating_roles(status: LeadStatus) -> &'static [UserRole] {
    match status {
        LeadStatus::Initiated => &[UserRole::Quotation],
        LeadStatus::Confirmed
        | LeadStatus::OnHold
        | LeadStatus::WaitingForAdvancePayment
        | LeadStatus::ProductionCompleted
        | LeadStatus::WaitingForFullPayment
        | LeadStatus::Dispatched => &[UserRole::TeleSales],
        LeadStatus::WaitingForCustomerInput => &[UserRole::TeleSales, UserRole::Design],
        LeadStatus::InProgress => &[UserRole::Design],
        LeadStatus::OutForProduction => {
            &[UserRole::DigitalProduction, UserRole::OffsetProduction]
        }
        LeadStatus::Closed | LeadStatus::Rejected | LeadStatus::Delivered => &[],
    }
}

/// Statuses `role` may move a lead in `current` into. An empty slice means
/// the role has no action on this lead right now; that is not an error.
pub fn next_statuses(current: LeadStatus, role: UserRole) -> &'static [LeadStatus] {
    if gating_roles(current).contains(&role) {
        successors(current)
    } else {
        &[]
    }
}

pub fn can_transition(from: LeadStatus, to: LeadStatus, role: UserRole) -> bool {
    next_statuses(from, role).contains(&to)
}

// ---------------------------------------------------------------------------
// String boundary
// ---------------------------------------------------------------------------

/// Parse raw status and role values and look up the permitted transitions.
///
/// Fails with `InvalidStatus` or `InvalidRole` when either value is outside
/// its closed set.
pub fn next_statuses_for(status: &str, role: &str) -> Result<Vec<LeadStatus>> {
    let status = LeadStatus::from_str(status)?;
    let role = UserRole::from_str(role)?;
    Ok(next_statuses(status, role).to_vec())
}

/// Like [`next_statuses_for`], but malformed input yields no transitions.
/// The parse failure is reported through `tracing` instead of returned.
pub fn next_statuses_lenient(status: &str, role: &str) -> Vec<LeadStatus> {
    match next_statuses_for(status, role) {
        Ok(next) => next,
        Err(e) => {
            tracing::warn!(status, role, error = %e, "offering no transitions");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use LeadStatus::*;

    /// Written out independently of the match arms above: (status, role, next).
    fn expected_grants() -> Vec<(LeadStatus, UserRole, Vec<LeadStatus>)> {
        vec![
            (Initiated, UserRole::Quotation, vec![Confirmed]),
            (
                Confirmed,
                UserRole::TeleSales,
                vec![OnHold, Closed, Rejected, WaitingForAdvancePayment],
            ),
            (
                OnHold,
                UserRole::TeleSales,
                vec![Closed, Rejected, WaitingForAdvancePayment],
            ),
            (
                WaitingForAdvancePayment,
                UserRole::TeleSales,
                vec![WaitingForCustomerInput],
            ),
            (WaitingForCustomerInput, UserRole::TeleSales, vec![InProgress]),
            (WaitingForCustomerInput, UserRole::Design, vec![InProgress]),
            (InProgress, UserRole::Design, vec![OutForProduction]),
            (
                OutForProduction,
                UserRole::DigitalProduction,
                vec![ProductionCompleted],
            ),
            (
                OutForProduction,
                UserRole::OffsetProduction,
                vec![ProductionCompleted],
            ),
            (
                ProductionCompleted,
                UserRole::TeleSales,
                vec![WaitingForFullPayment],
            ),
            (WaitingForFullPayment, UserRole::TeleSales, vec![Dispatched]),
            (Dispatched, UserRole::TeleSales, vec![Delivered]),
        ]
    }

    #[test]
    fn every_status_role_pair_matches_table() {
        let grants = expected_grants();
        for status in LeadStatus::all() {
            for role in UserRole::all() {
                let expected = grants
                    .iter()
                    .find(|(s, r, _)| s == status && r == role)
                    .map(|(_, _, next)| next.clone())
                    .unwrap_or_default();
                assert_eq!(
                    next_statuses(*status, *role).to_vec(),
                    expected,
                    "{status} as {role}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_yield_no_transitions() {
        for status in [Closed, Rejected, Delivered] {
            assert!(successors(status).is_empty());
            assert!(gating_roles(status).is_empty());
            for role in UserRole::all() {
                assert!(next_statuses(status, *role).is_empty());
            }
        }
    }

    #[test]
    fn non_terminal_states_have_a_gate() {
        for status in LeadStatus::all().iter().filter(|s| !s.is_terminal()) {
            assert!(!successors(*status).is_empty(), "{status}");
            assert!(!gating_roles(*status).is_empty(), "{status}");
        }
    }

    #[test]
    fn literal_scenarios() {
        assert_eq!(
            next_statuses_for("Initiated", "quotation").unwrap(),
            vec![Confirmed]
        );
        assert!(next_statuses_for("Initiated", "tele_sales")
            .unwrap()
            .is_empty());
        assert_eq!(
            next_statuses_for("Confirmed", "tele_sales").unwrap(),
            vec![OnHold, Closed, Rejected, WaitingForAdvancePayment]
        );
        assert_eq!(
            next_statuses_for("Waiting for Customer Input", "design").unwrap(),
            vec![InProgress]
        );
        assert!(next_statuses_for("Waiting for Customer Input", "accounts")
            .unwrap()
            .is_empty());
        assert_eq!(
            next_statuses_for("Out for Production", "digital_production").unwrap(),
            vec![ProductionCompleted]
        );
    }

    #[test]
    fn admins_cannot_advance_anything() {
        for status in LeadStatus::all() {
            assert!(next_statuses(*status, UserRole::SuperAdmin).is_empty());
            assert!(next_statuses(*status, UserRole::Admin).is_empty());
        }
    }

    #[test]
    fn can_transition_checks_target() {
        assert!(can_transition(Confirmed, OnHold, UserRole::TeleSales));
        assert!(!can_transition(Confirmed, Delivered, UserRole::TeleSales));
        assert!(!can_transition(Confirmed, OnHold, UserRole::Design));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(matches!(
            next_statuses_for("Shipped", "tele_sales"),
            Err(crate::error::CrmError::InvalidStatus(_))
        ));
        assert!(matches!(
            next_statuses_for("Confirmed", "intern"),
            Err(crate::error::CrmError::InvalidRole(_))
        ));
    }

    #[test]
    fn lenient_lookup_recovers_to_empty() {
        assert!(next_statuses_lenient("Shipped", "tele_sales").is_empty());
        assert!(next_statuses_lenient("Confirmed", "intern").is_empty());
        assert_eq!(
            next_statuses_lenient("Dispatched", "tele_sales"),
            vec![Delivered]
        );
    }
}
