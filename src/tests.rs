use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};
use rusqlite::Connection;

use crate::domain::entities::audit::{AuditColumn, AuditEntry, AuditResult};
use crate::domain::entities::contact::{Contact, ContactKind, ContactStatus};
use crate::domain::entities::query::SortDirection;
use crate::domain::entities::user::{UserColumn, UserEntry, UserRole};
use crate::infra::import::csv::{read_csv, write_csv};
use crate::infra::seed::{sample_audit_logs, sample_contacts, sample_users, seed_if_empty};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::source::{RecordSource, SourceError};
use crate::usecase::services::import_service::{ImportResult, ImportService};
use crate::usecase::services::user_service::UserService;
use crate::usecase::services::view_controller::ViewController;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("luminary-{prefix}-{nanos}"))
}

#[test]
fn init_db_creates_required_tables() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("app.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('user_entry','audit_entry','contact')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 3, "required tables should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_repo_lists_newest_first_and_rejects_duplicates() {
    let temp_dir = unique_test_dir("sqlite-users");
    let repo = SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite"))
        .expect("repo should open");

    let seeded = seed_if_empty(&repo, sample_users()).expect("seed should succeed");
    assert_eq!(seeded, 8);
    assert_eq!(seed_if_empty(&repo, sample_users()).expect("second seed"), 0);

    let snapshot = repo.list().expect("list should succeed");
    let names: Vec<&str> = snapshot.records.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"CEO Account"));
    assert_eq!(names.last(), Some(&"Staff B"));

    let duplicate = snapshot.records[0].clone();
    assert_eq!(
        repo.add(duplicate.clone()),
        Err(SourceError::DuplicateId(duplicate.id.clone()))
    );
    assert_eq!(repo.count().expect("count"), 8);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_updates_flow_into_the_user_view() {
    let temp_dir = unique_test_dir("sqlite-view");
    let repo = Arc::new(
        SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    seed_if_empty(repo.as_ref(), sample_users()).expect("seed should succeed");

    let mut view: ViewController<UserEntry> = ViewController::with_defaults(repo.clone());
    view.set_search("volunteer");
    let before: Vec<String> = view.result().records.iter().map(|u| u.name.clone()).collect();
    assert_eq!(before, vec!["Volunteer 1", "Volunteer 2"]);

    let service = UserService::new(repo.clone());
    let volunteer_id = view.result().records[0].id.clone();
    service
        .toggle_enabled(&volunteer_id)
        .expect("toggle should succeed");

    view.set_search("disabled");
    let disabled = view.result();
    assert_eq!(disabled.total_items, 4);
    assert!(disabled.records.iter().any(|u| u.id == volunteer_id));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn audit_view_defaults_to_newest_first_and_filters_by_result() {
    let temp_dir = unique_test_dir("sqlite-audit");
    let repo = Arc::new(
        SqliteRepo::<AuditEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    seed_if_empty(repo.as_ref(), sample_audit_logs(now)).expect("seed should succeed");

    let mut view: ViewController<AuditEntry> = ViewController::with_defaults(repo.clone());
    let newest = view.result().records[0].clone();
    assert_eq!(newest.action, "LOGIN");
    assert_eq!(newest.timestamp, now - chrono::Duration::minutes(5));

    view.set_category(Some(AuditResult::Fail));
    let failed = view.result();
    assert_eq!(failed.total_items, 2);
    assert!(failed.records.iter().all(|e| e.result == AuditResult::Fail));

    view.set_sort_column(AuditColumn::Time);
    assert_eq!(view.params().direction, SortDirection::Asc);
    assert_eq!(view.result().records[0].action, "ACCESS_DENIED");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_skips_duplicates_and_fills_missing_ids() {
    let temp_dir = unique_test_dir("csv-import");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("users.csv");
    fs::write(
        &csv_path,
        "name,email,role,enabled,id\n\
         Ann,ann@luminary.com,volunteer,true,u-1\n\
         Ben,ben@luminary.com,Donor,false,\n\
         Ann Again,ann2@luminary.com,ceo,1,u-1\n",
    )
    .expect("should write csv fixture");

    let repo = Arc::new(
        SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    let service = ImportService::<UserEntry>::new(repo.clone());

    let result = service.import_csv(&csv_path).expect("import should succeed");

    assert_eq!(result, ImportResult { imported: 2, skipped: 1 });
    let snapshot = repo.list().expect("list should succeed");
    let ben = snapshot
        .records
        .iter()
        .find(|u| u.name == "Ben")
        .expect("Ben should be imported");
    assert!(!ben.id.is_empty());
    assert_eq!(ben.role, UserRole::Donor);
    assert!(!ben.enabled);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_reports_missing_columns() {
    let temp_dir = unique_test_dir("csv-missing");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("users.csv");
    fs::write(&csv_path, "name,email\nAnn,ann@luminary.com\n").expect("should write csv");

    let result = read_csv::<UserEntry>(&csv_path);

    let message = format!("{:#}", result.expect_err("missing columns should fail"));
    assert!(message.contains("missing column"), "{message}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn exported_page_reads_back_as_the_same_records() {
    let temp_dir = unique_test_dir("csv-export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let repo = Arc::new(
        SqliteRepo::<AuditEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    seed_if_empty(repo.as_ref(), sample_audit_logs(now)).expect("seed should succeed");

    let mut view: ViewController<AuditEntry> = ViewController::with_defaults(repo.clone());
    view.set_search("it admin");
    let page = view.result().clone();
    let csv_path = temp_dir.join("audit.csv");

    let written = ImportService::<AuditEntry>::new(repo.clone())
        .export_csv(&csv_path, &page.records)
        .expect("export should succeed");
    let read_back = read_csv::<AuditEntry>(&csv_path).expect("read should succeed");

    assert_eq!(written, 4);
    assert_eq!(read_back, page.records);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn contacts_filter_by_kind_and_search_name() {
    let temp_dir = unique_test_dir("contacts");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("contacts.csv");
    write_csv::<Contact>(&csv_path, &sample_contacts()).expect("write should succeed");

    let repo = Arc::new(
        SqliteRepo::<Contact>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    ImportService::<Contact>::new(repo.clone())
        .import_csv(&csv_path)
        .expect("import should succeed");

    let mut view: ViewController<Contact> = ViewController::with_defaults(repo.clone());
    view.set_category(Some(ContactKind::Donor));
    let donors: Vec<String> = view.result().records.iter().map(|c| c.name.clone()).collect();
    assert_eq!(donors, vec!["LumiSphere Fund", "Safaricom Foundation"]);

    view.set_category(None);
    view.set_search("unicef");
    assert_eq!(view.result().total_items, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn user_view_sorts_by_status_with_active_first() {
    let temp_dir = unique_test_dir("status-sort");
    let repo = Arc::new(
        SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    seed_if_empty(repo.as_ref(), sample_users()).expect("seed should succeed");

    let mut view: ViewController<UserEntry> = ViewController::with_defaults(repo.clone());
    view.set_sort_column(UserColumn::Status);
    let statuses: Vec<bool> = view.result().records.iter().map(|u| u.enabled).collect();

    assert_eq!(statuses, vec![true, true, true, true, true, false, false, false]);

    view.set_sort_column(UserColumn::Status);
    let reversed: Vec<bool> = view.result().records.iter().map(|u| u.enabled).collect();
    assert_eq!(reversed, vec![false, false, false, true, true, true, true, true]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn writes_through_another_repo_reach_an_open_view() {
    let temp_dir = unique_test_dir("sqlite-shared");
    let db_path = temp_dir.join("app.sqlite");
    let viewer = Arc::new(SqliteRepo::<UserEntry>::open(&db_path).expect("repo should open"));
    let writer = SqliteRepo::<UserEntry>::open(&db_path).expect("second repo should open");

    let mut view: ViewController<UserEntry> = ViewController::with_defaults(viewer.clone());
    assert_eq!(view.result().total_items, 0);

    writer
        .add(UserEntry::new("u-1", "Ann", "ann@luminary.com", UserRole::Volunteer, true))
        .expect("add should succeed");
    assert_eq!(view.result().total_items, 1);
    assert_eq!(viewer.version(), writer.version());

    writer
        .update(UserEntry::new("u-1", "Ann", "ann@luminary.com", UserRole::Volunteer, false))
        .expect("update should succeed");
    view.set_search("disabled");
    assert_eq!(view.result().total_items, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_update_of_unknown_id_is_not_found() {
    let temp_dir = unique_test_dir("sqlite-update");
    let repo = SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite"))
        .expect("repo should open");
    seed_if_empty(&repo, sample_users()).expect("seed should succeed");
    let before = repo.version();

    let result = repo.update(UserEntry::new(
        "ghost",
        "Ghost",
        "ghost@luminary.com",
        UserRole::Unknown,
        true,
    ));

    assert_eq!(result, Err(SourceError::NotFound("ghost".to_string())));
    assert_eq!(repo.version(), before);
    assert_eq!(repo.count().expect("count"), 8);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_all_writes_every_record_newest_first() {
    let temp_dir = unique_test_dir("csv-export-all");
    let repo = Arc::new(
        SqliteRepo::<UserEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    seed_if_empty(repo.as_ref(), sample_users()).expect("seed should succeed");
    let csv_path = temp_dir.join("users.csv");

    let written = ImportService::<UserEntry>::new(repo.clone())
        .export_all(&csv_path)
        .expect("export should succeed");
    let read_back = read_csv::<UserEntry>(&csv_path).expect("read should succeed");

    assert_eq!(written, 8);
    assert_eq!(read_back, *repo.list().expect("list").records);
    let header = fs::read_to_string(&csv_path).expect("csv should exist");
    assert!(header.starts_with("id,name,email,role,enabled\n"), "{header}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn audit_and_contact_imports_fill_blank_ids() {
    let temp_dir = unique_test_dir("csv-blank-ids");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let audit_path = temp_dir.join("audit.csv");
    fs::write(
        &audit_path,
        "id,timestamp,actor,action,target,result,ip,device,session\n\
         ,2025-06-01T11:00:00+00:00,IT Admin,LOGIN,Auth,SUCCESS,197.232.12.10,Android,1a2b3c4d\n",
    )
    .expect("should write audit csv");
    let contact_path = temp_dir.join("contacts.csv");
    fs::write(
        &contact_path,
        "id,name,kind,status,note,last_contact\n\
         ,Red Cross,partner,pending,Call back,Today\n",
    )
    .expect("should write contact csv");

    let audit_repo = Arc::new(
        SqliteRepo::<AuditEntry>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );
    let contact_repo = Arc::new(
        SqliteRepo::<Contact>::open(temp_dir.join("app.sqlite")).expect("repo should open"),
    );

    let audit = ImportService::<AuditEntry>::new(audit_repo.clone())
        .import_csv(&audit_path)
        .expect("audit import should succeed");
    let contacts = ImportService::<Contact>::new(contact_repo.clone())
        .import_csv(&contact_path)
        .expect("contact import should succeed");

    assert_eq!(audit, ImportResult { imported: 1, skipped: 0 });
    assert_eq!(contacts, ImportResult { imported: 1, skipped: 0 });

    let entry = audit_repo.list().expect("list").records[0].clone();
    assert!(!entry.id.is_empty());
    assert_eq!(entry.action, "LOGIN");
    assert_eq!(entry.timestamp, Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap());
    assert_eq!(entry.session, "1a2b3c4d");

    let contact = contact_repo.list().expect("list").records[0].clone();
    assert!(!contact.id.is_empty());
    assert_eq!(contact.name, "Red Cross");
    assert_eq!(contact.kind, ContactKind::Partner);
    assert_eq!(contact.status, ContactStatus::Pending);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn contacts_csv_uses_kind_column() {
    let temp_dir = unique_test_dir("csv-contacts-kind");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("contacts.csv");
    fs::write(
        &csv_path,
        "id,name,kind,status,note,last_contact\n\
         c-1,UNICEF Kenya,Partner,Active,MoU signed,Yesterday\n\
         c-2,LumiSphere Fund,Donor,Active,\"KES 3,200,000\",Today\n",
    )
    .expect("should write csv fixture");

    let contacts = read_csv::<Contact>(&csv_path).expect("read should succeed");
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1].kind, ContactKind::Donor);
    assert_eq!(contacts[1].note, "KES 3,200,000");

    let out_path = temp_dir.join("out.csv");
    write_csv::<Contact>(&out_path, &contacts).expect("write should succeed");
    let written = fs::read_to_string(&out_path).expect("csv should exist");
    assert!(written.starts_with("id,name,kind,status,note,last_contact\n"), "{written}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
