use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use luminary::config::AppConfig;
use luminary::domain::entities::audit::AuditEntry;
use luminary::domain::entities::campaign::Campaign;
use luminary::domain::entities::contact::Contact;
use luminary::domain::entities::project::Project;
use luminary::domain::entities::query::ResultPage;
use luminary::domain::entities::record::Record;
use luminary::domain::entities::task::VolunteerTask;
use luminary::domain::entities::user::UserEntry;
use luminary::infra::memory::store::MemoryStore;
use luminary::infra::seed::{
    sample_audit_logs, sample_campaigns, sample_contacts, sample_projects, sample_tasks,
    sample_users, seed_if_empty,
};
use luminary::infra::sqlite::queries::SqlRecord;
use luminary::infra::sqlite::repo::SqliteRepo;
use luminary::usecase::ports::source::RecordSource;
use luminary::usecase::services::audit_service::AuditService;
use luminary::usecase::services::user_service::UserService;
use luminary::usecase::services::view_controller::ViewController;

/// Usage: `luminary [search] [sort-column]`
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let sort_column = args.next();
    info!("using database {}", config.db_path.display());

    let users = open_seeded(&config, sample_users())?;
    let audit_logs = open_seeded(&config, sample_audit_logs(Utc::now()))?;
    let contacts = open_seeded(&config, sample_contacts())?;

    let user_stats = UserService::new(users.clone()).stats()?;
    println!(
        "Users: {} total, {} active, {} disabled",
        user_stats.total, user_stats.active, user_stats.disabled
    );
    let audit_stats = AuditService::new(audit_logs.clone()).stats(Utc::now())?;
    println!(
        "Audit logs: {} total, {} today",
        audit_stats.total, audit_stats.today
    );

    let mut user_view = open_view::<UserEntry>(users, &config, &search, sort_column.as_deref());
    print_page("User Management", user_view.result(), |user| {
        format!(
            "{:<20} {:<28} {:<10} {}",
            user.name,
            user.email,
            user.role,
            user.status_text()
        )
    });

    let mut audit_view =
        open_view::<AuditEntry>(audit_logs, &config, &search, sort_column.as_deref());
    print_page("Audit Logs", audit_view.result(), |entry| {
        format!(
            "{:<14} {:<12} {:<16} {:<32} {}",
            entry.time_text(),
            entry.actor,
            entry.action,
            entry.target,
            entry.result
        )
    });

    let mut contact_view = open_view::<Contact>(contacts, &config, &search, sort_column.as_deref());
    print_page("Partners & Donors", contact_view.result(), |contact| {
        format!(
            "{:<22} {:<8} {:<8} {:<20} {}",
            contact.name,
            contact.kind.name(),
            contact.status.name(),
            contact.note,
            contact.last_contact
        )
    });

    let mut project_view = open_view::<Project>(
        Arc::new(MemoryStore::with_records(sample_projects())?),
        &config,
        &search,
        sort_column.as_deref(),
    );
    print_page("Projects & Operations", project_view.result(), |project| {
        format!(
            "{:<28} {:<10} {:>3}% {:>10}",
            project.name,
            project.health().name(),
            project.progress_percent(),
            project.budget
        )
    });

    let mut task_view = open_view::<VolunteerTask>(
        Arc::new(MemoryStore::with_records(sample_tasks())?),
        &config,
        &search,
        sort_column.as_deref(),
    );
    print_page("My Tasks", task_view.result(), |task| {
        format!(
            "{:<28} {:<12} {:<10} {}",
            task.title,
            task.status.name(),
            task.location,
            task.due_date
        )
    });

    let mut campaign_view = open_view::<Campaign>(
        Arc::new(MemoryStore::with_records(sample_campaigns())?),
        &config,
        &search,
        sort_column.as_deref(),
    );
    print_page("Campaigns", campaign_view.result(), |campaign| {
        format!(
            "{:<28} {:<10} {:<10} {:>3}%",
            campaign.title,
            campaign.category,
            campaign.location,
            campaign.progress_percent()
        )
    });

    Ok(())
}

fn open_seeded<R: SqlRecord>(config: &AppConfig, seed: Vec<R>) -> Result<Arc<SqliteRepo<R>>> {
    let repo = Arc::new(SqliteRepo::<R>::open(&config.db_path)?);
    seed_if_empty(repo.as_ref(), seed)?;
    Ok(repo)
}

fn open_view<R: Record>(
    source: Arc<dyn RecordSource<R>>,
    config: &AppConfig,
    search: &str,
    sort_column: Option<&str>,
) -> ViewController<R> {
    let params = R::default_query().with_page_size(config.page_size);
    let mut view = ViewController::new(source, params);
    view.set_search(search);
    if let Some(column) = sort_column {
        view.set_sort_column_by_name(column);
    }
    view
}

fn print_page<R: Record>(title: &str, page: &ResultPage<R>, render: impl Fn(&R) -> String) {
    println!();
    println!("== {title} ({} matching) ==", page.total_items);
    if page.is_empty() {
        println!("No records found.");
    }
    for record in &page.records {
        println!("{}", render(record));
    }
    let prev = if page.has_prev() { "< prev" } else { "" };
    let next = if page.has_next() { "next >" } else { "" };
    println!("{prev:<7}{}{next:>8}", page.label());
}
