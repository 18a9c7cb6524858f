use crate::lead::Lead;
use crate::types::LeadStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Amount,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Amount => "amount",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = crate::error::CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "amount" => Ok(SortOrder::Amount),
            _ => Err(crate::error::CrmError::Validation(format!(
                "unknown sort order '{s}': expected newest, oldest or amount"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// LeadQuery
// ---------------------------------------------------------------------------

/// Search, status filter and ordering applied to an already visible set of
/// leads.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub search: Option<String>,
    /// `None` means every status.
    pub status: Option<LeadStatus>,
    pub sort: SortOrder,
}

impl LeadQuery {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                [&lead.customer_name, &lead.customer_phone, &lead.requirements]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
            }
        }
    }

    pub fn apply<'a>(&self, leads: &[&'a Lead]) -> Vec<&'a Lead> {
        let mut results: Vec<&Lead> = leads.iter().copied().filter(|l| self.matches(l)).collect();
        match self.sort {
            SortOrder::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => results.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Amount => results.sort_by(|a, b| b.total_amount.cmp(&a.total_amount)),
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn leads() -> Vec<Lead> {
        sample::leads(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    fn ids(leads: &[&Lead]) -> Vec<String> {
        leads.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn default_is_newest_first() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let out = LeadQuery::default().apply(&refs);
        assert_eq!(ids(&out), vec!["lead1", "lead2", "lead3", "lead4"]);
    }

    #[test]
    fn oldest_and_amount_orders() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let oldest = LeadQuery {
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&oldest.apply(&refs)), vec!["lead4", "lead3", "lead2", "lead1"]);
        let amount = LeadQuery {
            sort: SortOrder::Amount,
            ..Default::default()
        };
        assert_eq!(ids(&amount.apply(&refs)), vec!["lead4", "lead3", "lead1", "lead2"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let by_name = LeadQuery {
            search: Some("acme".into()),
            ..Default::default()
        };
        assert_eq!(ids(&by_name.apply(&refs)), vec!["lead1"]);
        let by_phone = LeadQuery {
            search: Some("+98765".into()),
            ..Default::default()
        };
        assert_eq!(ids(&by_phone.apply(&refs)), vec!["lead2"]);
        let by_requirements = LeadQuery {
            search: Some("TRI-FOLD".into()),
            ..Default::default()
        };
        assert_eq!(ids(&by_requirements.apply(&refs)), vec!["lead3"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let q = LeadQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(q.apply(&refs).len(), 4);
    }

    #[test]
    fn status_filter() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let q = LeadQuery {
            status: Some(LeadStatus::InProgress),
            ..Default::default()
        };
        assert_eq!(ids(&q.apply(&refs)), vec!["lead3"]);
        let none = LeadQuery {
            status: Some(LeadStatus::Delivered),
            ..Default::default()
        };
        assert!(none.apply(&refs).is_empty());
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!(SortOrder::from_str("amount").unwrap(), SortOrder::Amount);
        assert!(SortOrder::from_str("price").is_err());
    }
}
