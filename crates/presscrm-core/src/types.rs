use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    TeleSales,
    Quotation,
    Design,
    DigitalProduction,
    OffsetProduction,
    Accounts,
}

impl UserRole {
    pub fn all() -> &'static [UserRole] {
        &[
            UserRole::SuperAdmin,
            UserRole::Admin,
            UserRole::TeleSales,
            UserRole::Quotation,
            UserRole::Design,
            UserRole::DigitalProduction,
            UserRole::OffsetProduction,
            UserRole::Accounts,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::TeleSales => "tele_sales",
            UserRole::Quotation => "quotation",
            UserRole::Design => "design",
            UserRole::DigitalProduction => "digital_production",
            UserRole::OffsetProduction => "offset_production",
            UserRole::Accounts => "accounts",
        }
    }

    /// Roles that may reassign leads to another user.
    pub fn can_reassign(self) -> bool {
        matches!(
            self,
            UserRole::SuperAdmin | UserRole::Admin | UserRole::TeleSales
        )
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = crate::error::CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| crate::error::CrmError::InvalidRole(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// UserTeam
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserTeam {
    Management,
    Sales,
    Quotation,
    Design,
    #[serde(rename = "Digital Production")]
    DigitalProduction,
    #[serde(rename = "Offset Production")]
    OffsetProduction,
    Accounts,
}

impl UserTeam {
    pub fn as_str(self) -> &'static str {
        match self {
            UserTeam::Management => "Management",
            UserTeam::Sales => "Sales",
            UserTeam::Quotation => "Quotation",
            UserTeam::Design => "Design",
            UserTeam::DigitalProduction => "Digital Production",
            UserTeam::OffsetProduction => "Offset Production",
            UserTeam::Accounts => "Accounts",
        }
    }
}

impl fmt::Display for UserTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LeadStatus
// ---------------------------------------------------------------------------

/// Workflow position of a lead. Variant order is workflow order, not
/// alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeadStatus {
    Initiated,
    Confirmed,
    #[serde(rename = "On Hold")]
    OnHold,
    Closed,
    Rejected,
    #[serde(rename = "Waiting for Advance Payment")]
    WaitingForAdvancePayment,
    #[serde(rename = "Waiting for Customer Input")]
    WaitingForCustomerInput,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Out for Production")]
    OutForProduction,
    #[serde(rename = "Production Completed")]
    ProductionCompleted,
    #[serde(rename = "Waiting for Full Payment")]
    WaitingForFullPayment,
    Dispatched,
    Delivered,
}

impl LeadStatus {
    pub fn all() -> &'static [LeadStatus] {
        &[
            LeadStatus::Initiated,
            LeadStatus::Confirmed,
            LeadStatus::OnHold,
            LeadStatus::Closed,
            LeadStatus::Rejected,
            LeadStatus::WaitingForAdvancePayment,
            LeadStatus::WaitingForCustomerInput,
            LeadStatus::InProgress,
            LeadStatus::OutForProduction,
            LeadStatus::ProductionCompleted,
            LeadStatus::WaitingForFullPayment,
            LeadStatus::Dispatched,
            LeadStatus::Delivered,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::Initiated => "Initiated",
            LeadStatus::Confirmed => "Confirmed",
            LeadStatus::OnHold => "On Hold",
            LeadStatus::Closed => "Closed",
            LeadStatus::Rejected => "Rejected",
            LeadStatus::WaitingForAdvancePayment => "Waiting for Advance Payment",
            LeadStatus::WaitingForCustomerInput => "Waiting for Customer Input",
            LeadStatus::InProgress => "In Progress",
            LeadStatus::OutForProduction => "Out for Production",
            LeadStatus::ProductionCompleted => "Production Completed",
            LeadStatus::WaitingForFullPayment => "Waiting for Full Payment",
            LeadStatus::Dispatched => "Dispatched",
            LeadStatus::Delivered => "Delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeadStatus::Closed | LeadStatus::Rejected | LeadStatus::Delivered
        )
    }

    /// Statuses where a payment is due or has just settled.
    pub fn is_payment_stage(self) -> bool {
        matches!(
            self,
            LeadStatus::WaitingForAdvancePayment
                | LeadStatus::WaitingForFullPayment
                | LeadStatus::Delivered
        )
    }

    /// Badge colour used when rendering the status.
    pub fn tone(self) -> &'static str {
        match self {
            LeadStatus::Initiated | LeadStatus::InProgress => "blue",
            LeadStatus::Confirmed | LeadStatus::ProductionCompleted | LeadStatus::Delivered => {
                "green"
            }
            LeadStatus::OnHold => "yellow",
            LeadStatus::Closed => "gray",
            LeadStatus::Rejected => "red",
            LeadStatus::WaitingForAdvancePayment | LeadStatus::WaitingForFullPayment => "purple",
            LeadStatus::WaitingForCustomerInput => "orange",
            LeadStatus::OutForProduction => "cyan",
            LeadStatus::Dispatched => "indigo",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = crate::error::CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| crate::error::CrmError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Payment enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Advance,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "UPI")]
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_workflow_ordering() {
        assert!(LeadStatus::Initiated < LeadStatus::Confirmed);
        assert!(LeadStatus::Dispatched < LeadStatus::Delivered);
        assert_eq!(LeadStatus::all().len(), 13);
        for (i, status) in LeadStatus::all().iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn status_literal_spelling() {
        assert_eq!(
            LeadStatus::from_str("Waiting for Advance Payment").unwrap(),
            LeadStatus::WaitingForAdvancePayment
        );
        assert_eq!(LeadStatus::from_str("On Hold").unwrap(), LeadStatus::OnHold);
        assert!(LeadStatus::from_str("on hold").is_err());
        assert!(LeadStatus::from_str("OnHold").is_err());
    }

    #[test]
    fn status_serde_uses_display_names() {
        let yaml = serde_yaml::to_string(&LeadStatus::OutForProduction).unwrap();
        assert_eq!(yaml.trim(), "Out for Production");
        let parsed: LeadStatus = serde_yaml::from_str("Production Completed").unwrap();
        assert_eq!(parsed, LeadStatus::ProductionCompleted);
        assert!(serde_yaml::from_str::<LeadStatus>("Shipped").is_err());
    }

    #[test]
    fn unknown_status_is_invalid_status() {
        let err = LeadStatus::from_str("Shipped").unwrap_err();
        assert!(matches!(err, crate::error::CrmError::InvalidStatus(s) if s == "Shipped"));
    }

    #[test]
    fn role_parse_matches_serde() {
        for role in UserRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(UserRole::from_str(role.as_str()).unwrap(), *role);
        }
    }

    #[test]
    fn unknown_role_is_invalid_role() {
        let err = UserRole::from_str("intern").unwrap_err();
        assert!(matches!(err, crate::error::CrmError::InvalidRole(s) if s == "intern"));
    }

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = LeadStatus::all()
            .iter()
            .filter(|s| s.is_terminal())
            .copied()
            .collect();
        assert_eq!(
            terminal,
            vec![LeadStatus::Closed, LeadStatus::Rejected, LeadStatus::Delivered]
        );
    }

    #[test]
    fn team_serde_names() {
        let yaml = serde_yaml::to_string(&UserTeam::OffsetProduction).unwrap();
        assert_eq!(yaml.trim(), "Offset Production");
    }
}
