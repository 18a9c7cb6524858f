//! Built-in sample data: a seven-person print shop and four leads at
//! different points in the workflow. Dates are relative to `now`.

use crate::dataset::Dataset;
use crate::lead::{AssignmentHistory, CustomerInput, Lead, Payment, StatusHistory};
use crate::types::{LeadStatus, PaymentMethod, PaymentType, UserRole, UserTeam};
use crate::user::User;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn dataset(now: DateTime<Utc>) -> Dataset {
    Dataset::new(users(), leads(now))
}

pub fn users() -> Vec<User> {
    let rows = [
        ("u1", "John Admin", "admin", UserRole::SuperAdmin, UserTeam::Management, (2023, 1, 1)),
        ("u2", "Sarah Sales", "sarah", UserRole::TeleSales, UserTeam::Sales, (2023, 1, 15)),
        ("u3", "Mike Quote", "mike", UserRole::Quotation, UserTeam::Quotation, (2023, 2, 1)),
        ("u4", "Emily Design", "emily", UserRole::Design, UserTeam::Design, (2023, 2, 15)),
        ("u5", "David Digital", "david", UserRole::DigitalProduction, UserTeam::DigitalProduction, (2023, 3, 1)),
        ("u6", "Lisa Offset", "lisa", UserRole::OffsetProduction, UserTeam::OffsetProduction, (2023, 3, 15)),
        ("u7", "Tom Accounting", "tom", UserRole::Accounts, UserTeam::Accounts, (2023, 4, 1)),
    ];
    rows.into_iter()
        .map(|(id, name, mailbox, role, team, (y, m, d))| {
            let created = Utc
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_default();
            let mut user = User::new(id, name, format!("{mailbox}@attracta.com"), role, team, created);
            user.avatar = Some(format!(
                "https://ui-avatars.com/api/?name={}&background=0D8ABC&color=fff",
                name.replace(' ', "+")
            ));
            user
        })
        .collect()
}

fn days_ago(now: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    now - Duration::days(n)
}

fn status(id: &str, status: LeadStatus, by: &str, at: DateTime<Utc>, notes: &str) -> StatusHistory {
    StatusHistory {
        id: id.to_string(),
        status,
        changed_by: by.to_string(),
        changed_at: at,
        notes: Some(notes.to_string()),
    }
}

fn assignment(id: &str, to: &str, by: &str, at: DateTime<Utc>, notes: &str) -> AssignmentHistory {
    AssignmentHistory {
        id: id.to_string(),
        assigned_to: to.to_string(),
        assigned_by: by.to_string(),
        assigned_at: at,
        notes: Some(notes.to_string()),
    }
}

fn urls(names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|n| format!("https://example.com/uploads/{n}"))
        .collect()
}

pub fn leads(now: DateTime<Utc>) -> Vec<Lead> {
    let ago = |n| days_ago(now, n);
    vec![
        Lead {
            id: "lead1".into(),
            customer_name: "Acme Corporation".into(),
            customer_phone: "+1234567890".into(),
            customer_email: Some("contact@acme.com".into()),
            requirements: "Promotional flex banner for upcoming event, 10ft x 5ft, full color, with grommets".into(),
            quantity: 5,
            expected_delivery_date: Some(now + Duration::days(7)),
            status: LeadStatus::Confirmed,
            status_history: vec![
                status("sh1", LeadStatus::Initiated, "u2", ago(3), "Initial contact with customer"),
                status("sh2", LeadStatus::Confirmed, "u3", ago(2), "Quotation confirmed"),
            ],
            assigned_to: "u3".into(),
            assignment_history: vec![assignment("ah1", "u3", "u2", ago(3), "Assigned for quotation")],
            customer_input_url: Some("attracta.com/customer-input/acme-corporation/12345".into()),
            customer_input: None,
            total_amount: 2500,
            advance_amount: 0,
            pending_amount: 2500,
            payments: Vec::new(),
            created_by: "u2".into(),
            created_at: ago(3),
            updated_at: ago(2),
            files: Vec::new(),
            notes: Some("Important client, handle with priority".into()),
        },
        Lead {
            id: "lead2".into(),
            customer_name: "TechStart Inc".into(),
            customer_phone: "+9876543210".into(),
            customer_email: Some("info@techstart.com".into()),
            requirements: "Business cards, 3.5x2 inches, double-sided, glossy finish".into(),
            quantity: 500,
            expected_delivery_date: Some(now + Duration::days(5)),
            status: LeadStatus::WaitingForAdvancePayment,
            status_history: vec![
                status("sh3", LeadStatus::Initiated, "u2", ago(5), "Initial contact with customer"),
                status("sh4", LeadStatus::Confirmed, "u3", ago(4), "Quotation confirmed"),
                status(
                    "sh5",
                    LeadStatus::WaitingForAdvancePayment,
                    "u2",
                    ago(3),
                    "Customer confirmed order, waiting for payment",
                ),
            ],
            assigned_to: "u2".into(),
            assignment_history: vec![
                assignment("ah2", "u3", "u2", ago(5), "Assigned for quotation"),
                assignment("ah3", "u2", "u3", ago(4), "Quotation complete, assigned back to sales"),
            ],
            customer_input_url: Some("attracta.com/customer-input/techstart-inc/67890".into()),
            customer_input: None,
            total_amount: 750,
            advance_amount: 0,
            pending_amount: 750,
            payments: Vec::new(),
            created_by: "u2".into(),
            created_at: ago(5),
            updated_at: ago(3),
            files: Vec::new(),
            notes: None,
        },
        Lead {
            id: "lead3".into(),
            customer_name: "Green Gardens".into(),
            customer_phone: "+1122334455".into(),
            customer_email: Some("contact@greengardens.com".into()),
            requirements: "Brochures, A4 size, tri-fold, 100gsm art paper, full color".into(),
            quantity: 1000,
            expected_delivery_date: Some(now + Duration::days(10)),
            status: LeadStatus::InProgress,
            status_history: vec![
                status("sh6", LeadStatus::Initiated, "u2", ago(10), "Initial contact with customer"),
                status("sh7", LeadStatus::Confirmed, "u3", ago(9), "Quotation confirmed"),
                status("sh8", LeadStatus::WaitingForAdvancePayment, "u2", ago(8), "Customer confirmed order"),
                status("sh9", LeadStatus::WaitingForCustomerInput, "u2", ago(7), "Advance payment received"),
                status("sh10", LeadStatus::InProgress, "u4", ago(5), "Customer input received, design started"),
            ],
            assigned_to: "u4".into(),
            assignment_history: vec![
                assignment("ah4", "u3", "u2", ago(10), "Assigned for quotation"),
                assignment("ah5", "u2", "u3", ago(9), "Quotation complete, assigned back to sales"),
                assignment("ah6", "u4", "u2", ago(6), "Customer input received, assigned to design team"),
            ],
            customer_input_url: Some("attracta.com/customer-input/green-gardens/13579".into()),
            customer_input: Some(CustomerInput {
                id: "ci1".into(),
                name: "Green Gardens".into(),
                mobile: "+1122334455".into(),
                alternative_mobile: Some("+5566778899".into()),
                files: urls(&["greengardens-logo.jpg", "greengardens-content.pdf"]),
                notes: Some("Please use eco-friendly design theme".into()),
                submitted_at: ago(6),
            }),
            total_amount: 3500,
            advance_amount: 1750,
            pending_amount: 1750,
            payments: vec![Payment {
                id: "p1".into(),
                amount: 1750,
                payment_type: PaymentType::Advance,
                date: ago(7),
                method: PaymentMethod::BankTransfer,
                notes: Some("50% advance payment".into()),
            }],
            created_by: "u2".into(),
            created_at: ago(10),
            updated_at: ago(5),
            files: urls(&["greengardens-draft1.jpg", "greengardens-draft2.jpg"]),
            notes: Some("Customer prefers green color scheme, eco-friendly messaging".into()),
        },
        Lead {
            id: "lead4".into(),
            customer_name: "Luxe Hotels".into(),
            customer_phone: "+5544332211".into(),
            customer_email: Some("marketing@luxehotels.com".into()),
            requirements: "Hotel directory, A5 size, hardcover, 50 pages, premium finish".into(),
            quantity: 100,
            expected_delivery_date: Some(now + Duration::days(15)),
            status: LeadStatus::ProductionCompleted,
            status_history: vec![
                status("sh11", LeadStatus::Initiated, "u2", ago(20), "Initial contact with customer"),
                status("sh12", LeadStatus::Confirmed, "u3", ago(19), "Quotation confirmed"),
                status("sh13", LeadStatus::WaitingForAdvancePayment, "u2", ago(18), "Customer confirmed order"),
                status("sh14", LeadStatus::WaitingForCustomerInput, "u2", ago(17), "Advance payment received"),
                status("sh15", LeadStatus::InProgress, "u4", ago(15), "Customer input received, design started"),
                status("sh16", LeadStatus::OutForProduction, "u4", ago(7), "Design completed, sent for production"),
                status("sh17", LeadStatus::ProductionCompleted, "u6", ago(1), "Production completed"),
            ],
            assigned_to: "u2".into(),
            assignment_history: vec![
                assignment("ah7", "u3", "u2", ago(20), "Assigned for quotation"),
                assignment("ah8", "u2", "u3", ago(19), "Quotation complete, assigned back to sales"),
                assignment("ah9", "u4", "u2", ago(16), "Customer input received, assigned to design team"),
                assignment(
                    "ah10",
                    "u6",
                    "u4",
                    ago(7),
                    "Design completed, assigned to offset production due to premium quality requirements",
                ),
                assignment(
                    "ah11",
                    "u2",
                    "u6",
                    ago(1),
                    "Production completed, assigned back to sales for final payment",
                ),
            ],
            customer_input_url: Some("attracta.com/customer-input/luxe-hotels/24680".into()),
            customer_input: Some(CustomerInput {
                id: "ci2".into(),
                name: "Luxe Hotels".into(),
                mobile: "+5544332211".into(),
                alternative_mobile: Some("+9988776655".into()),
                files: urls(&[
                    "luxehotels-logo.jpg",
                    "luxehotels-photos.zip",
                    "luxehotels-content.docx",
                ]),
                notes: Some("Gold embossing on the cover, high-quality images inside".into()),
                submitted_at: ago(16),
            }),
            total_amount: 15000,
            advance_amount: 7500,
            pending_amount: 7500,
            payments: vec![Payment {
                id: "p2".into(),
                amount: 7500,
                payment_type: PaymentType::Advance,
                date: ago(17),
                method: PaymentMethod::CreditCard,
                notes: Some("50% advance payment".into()),
            }],
            created_by: "u2".into(),
            created_at: ago(20),
            updated_at: ago(1),
            files: urls(&[
                "luxehotels-cover-draft.jpg",
                "luxehotels-pages-draft.pdf",
                "luxehotels-final-proof.pdf",
            ]),
            notes: Some("Premium client, ensure highest quality, gold embossing on cover".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::visible_leads;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn every_reference_resolves() {
        let data = dataset(now());
        for lead in &data.leads {
            assert!(data.user(&lead.created_by).is_ok());
            assert!(data.user(&lead.assigned_to).is_ok());
            for h in &lead.status_history {
                assert!(data.user(&h.changed_by).is_ok());
            }
            for a in &lead.assignment_history {
                assert!(data.user(&a.assigned_to).is_ok());
                assert!(data.user(&a.assigned_by).is_ok());
            }
        }
    }

    #[test]
    fn history_ends_at_current_status() {
        for lead in leads(now()) {
            assert_eq!(lead.status_history.last().map(|h| h.status), Some(lead.status));
        }
    }

    #[test]
    fn visibility_over_sample() {
        let data = dataset(now());
        let ids = |uid: &str| -> Vec<String> {
            let actor = data.user(uid).unwrap();
            visible_leads(&data.leads, actor)
                .iter()
                .map(|l| l.id.clone())
                .collect()
        };
        assert_eq!(ids("u1").len(), 4);
        assert_eq!(ids("u2"), vec!["lead1", "lead2", "lead3", "lead4"]);
        assert_eq!(ids("u3"), vec!["lead1"]);
        assert_eq!(ids("u4"), vec!["lead3"]);
        assert!(ids("u5").is_empty());
        assert_eq!(ids("u7"), vec!["lead2"]);
    }
}
