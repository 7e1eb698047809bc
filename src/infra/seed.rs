use chrono::{DateTime, Duration, Utc};
use log::info;
use uuid::Uuid;

use crate::domain::entities::audit::{AuditEntry, AuditResult};
use crate::domain::entities::campaign::Campaign;
use crate::domain::entities::contact::{Contact, ContactKind, ContactStatus};
use crate::domain::entities::project::Project;
use crate::domain::entities::record::Record;
use crate::domain::entities::task::{TaskStatus, VolunteerTask};
use crate::domain::entities::user::{UserEntry, UserRole};
use crate::usecase::ports::source::{RecordSource, SourceError};
use crate::usecase::services::audit_service::new_session_id;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn sample_users() -> Vec<UserEntry> {
    let user = |name: &str, email: &str, role: UserRole, enabled: bool| {
        UserEntry::new(new_id(), name, email, role, enabled)
    };
    vec![
        user("CEO Account", "ceo@luminary.com", UserRole::Ceo, true),
        user("IT Admin", "itadmin@luminary.com", UserRole::Admin, true),
        user("Volunteer 1", "volunteer1@luminary.com", UserRole::Volunteer, true),
        user("Donor 1", "donor1@luminary.com", UserRole::Donor, false),
        user("Volunteer 2", "volunteer2@luminary.com", UserRole::Volunteer, true),
        user("Donor 2", "donor2@luminary.com", UserRole::Donor, false),
        user("Staff A", "staffA@luminary.com", UserRole::Admin, true),
        user("Staff B", "staffB@luminary.com", UserRole::Admin, false),
    ]
}

/// Eight entries spread over the three hours before `now`.
pub fn sample_audit_logs(now: DateTime<Utc>) -> Vec<AuditEntry> {
    let rows = [
        (5, "IT Admin", "LOGIN", "Auth", true),
        (12, "IT Admin", "UPDATE_ROLE", "User: volunteer1@luminary.com", true),
        (25, "CEO Account", "EXPORT_REPORT", "Reports: Q1 Impact", true),
        (40, "IT Admin", "DISABLE_USER", "User: donor1@luminary.com", true),
        (55, "Unknown", "LOGIN", "Auth", false),
        (80, "IT Admin", "CHANGE_SETTINGS", "Session Timeout", true),
        (120, "CEO Account", "VIEW_FINANCE", "Finance Dashboard", true),
        (170, "Unknown", "ACCESS_DENIED", "Admin Panel", false),
    ];

    rows.iter()
        .enumerate()
        .map(|(idx, &(mins_ago, actor, action, target, ok))| AuditEntry {
            id: new_id(),
            timestamp: now - Duration::minutes(mins_ago),
            actor: actor.to_string(),
            action: action.to_string(),
            target: target.to_string(),
            result: if ok {
                AuditResult::Success
            } else {
                AuditResult::Fail
            },
            ip: format!("197.232.12.{}", 10 + idx * 11),
            device: "Android • Pixel".to_string(),
            session: new_session_id(),
        })
        .collect()
}

pub fn sample_contacts() -> Vec<Contact> {
    let contact = |name: &str, kind, status, note: &str, last_contact: &str| Contact {
        id: new_id(),
        name: name.to_string(),
        kind,
        status,
        note: note.to_string(),
        last_contact: last_contact.to_string(),
    };
    vec![
        contact(
            "LumiSphere Fund",
            ContactKind::Donor,
            ContactStatus::Active,
            "KES 3,200,000",
            "Today",
        ),
        contact(
            "UNICEF Kenya",
            ContactKind::Partner,
            ContactStatus::Active,
            "MoU signed",
            "Yesterday",
        ),
        contact(
            "Safaricom Foundation",
            ContactKind::Donor,
            ContactStatus::Active,
            "KES 1,500,000",
            "2 days ago",
        ),
        contact(
            "County Government",
            ContactKind::Partner,
            ContactStatus::Pending,
            "Proposal submitted",
            "1 week ago",
        ),
    ]
}

pub fn sample_tasks() -> Vec<VolunteerTask> {
    let task = |title: &str, description: &str, status, due: &str, location: &str, update: &str| {
        VolunteerTask {
            id: new_id(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            due_date: due.to_string(),
            location: location.to_string(),
            last_update: update.to_string(),
        }
    };
    vec![
        task(
            "Collect beneficiary forms",
            "Visit assigned households and collect completed registration forms.",
            TaskStatus::Assigned,
            "Today",
            "Kibera",
            "No updates yet",
        ),
        task(
            "Upload event attendance",
            "Upload attendance list to the system and confirm totals.",
            TaskStatus::InProgress,
            "Tomorrow",
            "Mathare",
            "Started uploading (10 mins ago)",
        ),
        task(
            "Submit weekly field report",
            "Summarize progress, blockers, and next week plan.",
            TaskStatus::Done,
            "Friday",
            "HQ",
            "Submitted report (Yesterday)",
        ),
    ]
}

/// Two ongoing, one completed and one at-risk project.
pub fn sample_projects() -> Vec<Project> {
    let project = |name: &str, budget, spent, progress, last_updated: &str| Project {
        id: new_id(),
        name: name.to_string(),
        budget,
        spent,
        progress,
        last_updated: last_updated.to_string(),
    };
    vec![
        project("Clean Water Initiative", 120_000, 90_000, 0.72, "2 days ago"),
        project("Youth Skills Program", 80_000, 70_000, 0.45, "Today"),
        project("School Renovation", 50_000, 50_000, 1.0, "1 week ago"),
        project("Community Health Outreach", 200_000, 150_000, 0.30, "Yesterday"),
    ]
}

pub fn sample_campaigns() -> Vec<Campaign> {
    let campaign = |title: &str, category: &str, location: &str, goal, raised, update: &str| {
        Campaign {
            id: new_id(),
            title: title.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            goal_amount: goal,
            raised_amount: raised,
            last_update: update.to_string(),
        }
    };
    vec![
        campaign("Clean Water Initiative", "Water", "Kibera", 200_000, 120_000, "2 days ago"),
        campaign("Youth Skills Program", "Education", "Mathare", 150_000, 65_000, "Today"),
        campaign("Community Health Outreach", "Health", "Kayole", 300_000, 210_000, "Yesterday"),
    ]
}

/// Adds `records` only when the source is empty. Returns how many were added.
pub fn seed_if_empty<R: Record>(
    source: &dyn RecordSource<R>,
    records: Vec<R>,
) -> Result<usize, SourceError> {
    if !source.list()?.is_empty() {
        return Ok(0);
    }
    let count = records.len();
    // Added in reverse so the source lists them in the given order.
    for record in records.into_iter().rev() {
        source.add(record)?;
    }
    info!("seeded {count} records");
    Ok(count)
}
