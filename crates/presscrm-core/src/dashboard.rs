use crate::lead::Lead;
use crate::types::LeadStatus;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
    pub percent: f64,
}

/// Recently updated lead, as listed under recent activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentLead {
    pub id: String,
    pub customer_name: String,
    pub status: LeadStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    /// Not yet delivered, closed or rejected.
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub recent: Vec<RecentLead>,
    /// Nonzero counts only, in workflow order.
    pub distribution: Vec<StatusCount>,
}

impl DashboardSummary {
    pub fn compute(leads: &[&Lead], recent_limit: usize) -> Self {
        let total = leads.len();
        let count = |pred: fn(&Lead) -> bool| leads.iter().filter(|l| pred(**l)).count();

        let mut by_update: Vec<&Lead> = leads.to_vec();
        by_update.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let recent = by_update
            .into_iter()
            .take(recent_limit)
            .map(|l| RecentLead {
                id: l.id.clone(),
                customer_name: l.customer_name.clone(),
                status: l.status,
            })
            .collect();

        let mut counts = [0usize; 13];
        for lead in leads {
            counts[lead.status.index()] += 1;
        }
        let distribution = LeadStatus::all()
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(status, n)| StatusCount {
                status: *status,
                count: n,
                percent: n as f64 * 100.0 / total as f64,
            })
            .collect();

        Self {
            total,
            pending: count(|l| !l.status.is_terminal()),
            in_progress: count(|l| l.status == LeadStatus::InProgress),
            completed: count(|l| l.status == LeadStatus::Delivered),
            recent,
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use chrono::{TimeZone, Utc};

    fn leads() -> Vec<Lead> {
        sample::leads(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn metrics_over_sample() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let summary = DashboardSummary::compute(&refs, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pending, 4);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.completed, 0);
        let recent: Vec<_> = summary.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, vec!["lead4", "lead1", "lead2"]);
    }

    #[test]
    fn distribution_skips_zero_and_keeps_workflow_order() {
        let all = leads();
        let refs: Vec<&Lead> = all.iter().collect();
        let summary = DashboardSummary::compute(&refs, 3);
        let statuses: Vec<_> = summary.distribution.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                LeadStatus::Confirmed,
                LeadStatus::WaitingForAdvancePayment,
                LeadStatus::InProgress,
                LeadStatus::ProductionCompleted,
            ]
        );
        assert!(summary.distribution.iter().all(|c| c.count == 1 && c.percent == 25.0));
    }

    #[test]
    fn terminal_leads_are_not_pending() {
        let mut all = leads();
        all[0].status = LeadStatus::Closed;
        all[1].status = LeadStatus::Delivered;
        let refs: Vec<&Lead> = all.iter().collect();
        let summary = DashboardSummary::compute(&refs, 10);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.recent.len(), 4);
    }

    #[test]
    fn empty_set() {
        let summary = DashboardSummary::compute(&[], 3);
        assert_eq!(summary.total, 0);
        assert!(summary.recent.is_empty());
        assert!(summary.distribution.is_empty());
    }
}
