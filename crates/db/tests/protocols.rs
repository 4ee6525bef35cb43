//! Integration tests for protocols, task expansion, and the deletion guard.

use chrono::NaiveDate;
use sqlx::PgPool;

use farrowtrack_core::protocol::due_date;
use farrowtrack_db::models::organization::CreateOrganization;
use farrowtrack_db::models::protocol::{CreateProtocol, CreateProtocolTask};
use farrowtrack_db::repositories::{OrganizationRepo, ProtocolRepo, ScheduledTaskRepo};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn seed_protocol(pool: &PgPool) -> (i64, i64) {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: "Hilltop Farm".to_string(),
        },
    )
    .await
    .unwrap()
    .id;

    let protocol = ProtocolRepo::create(
        pool,
        org,
        &CreateProtocol {
            name: "Piglet care".to_string(),
            trigger_event: "farrowing".to_string(),
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    (org, protocol.id)
}

#[sqlx::test(migrations = "./migrations")]
async fn expansion_creates_dated_scheduled_tasks(pool: PgPool) {
    let (org, protocol_id) = seed_protocol(&pool).await;

    let iron = ProtocolRepo::create_task(
        &pool,
        protocol_id,
        &CreateProtocolTask {
            title: "Iron injection".to_string(),
            description: None,
            days_offset: 3,
            sort_order: Some(1),
        },
    )
    .await
    .unwrap();

    let trigger = d(2025, 4, 1);
    let task = ScheduledTaskRepo::create_from_protocol(
        &pool,
        org,
        iron.id,
        None,
        &iron.title,
        iron.description.as_deref(),
        due_date(trigger, iron.days_offset),
    )
    .await
    .unwrap();

    assert_eq!(task.due_date, d(2025, 4, 4));
    assert_eq!(task.protocol_task_id, Some(iron.id));
    assert!(task.completed_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn outstanding_tasks_block_protocol_deletion(pool: PgPool) {
    let (org, protocol_id) = seed_protocol(&pool).await;
    let template = ProtocolRepo::create_task(
        &pool,
        protocol_id,
        &CreateProtocolTask {
            title: "Vaccination".to_string(),
            description: None,
            days_offset: 21,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    assert!(!ProtocolRepo::has_outstanding_tasks(&pool, protocol_id)
        .await
        .unwrap());

    let task = ScheduledTaskRepo::create_from_protocol(
        &pool,
        org,
        template.id,
        None,
        &template.title,
        None,
        d(2025, 4, 22),
    )
    .await
    .unwrap();

    assert!(ProtocolRepo::has_outstanding_tasks(&pool, protocol_id)
        .await
        .unwrap());

    // Completing the task lifts the guard.
    ScheduledTaskRepo::complete(&pool, org, task.id).await.unwrap();
    assert!(!ProtocolRepo::has_outstanding_tasks(&pool, protocol_id)
        .await
        .unwrap());

    assert!(ProtocolRepo::delete(&pool, org, protocol_id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn task_listing_filters_due_and_completed(pool: PgPool) {
    let (org, _) = seed_protocol(&pool).await;

    let early = ScheduledTaskRepo::create(
        &pool,
        org,
        &farrowtrack_db::models::scheduled_task::CreateScheduledTask {
            sow_id: None,
            title: "Check waterers".to_string(),
            description: None,
            due_date: d(2025, 4, 1),
        },
    )
    .await
    .unwrap();
    ScheduledTaskRepo::create(
        &pool,
        org,
        &farrowtrack_db::models::scheduled_task::CreateScheduledTask {
            sow_id: None,
            title: "Order feed".to_string(),
            description: None,
            due_date: d(2025, 5, 1),
        },
    )
    .await
    .unwrap();

    let due_april = ScheduledTaskRepo::list_by_organization(&pool, org, Some(d(2025, 4, 30)), false)
        .await
        .unwrap();
    assert_eq!(due_april.len(), 1);
    assert_eq!(due_april[0].title, "Check waterers");

    ScheduledTaskRepo::complete(&pool, org, early.id).await.unwrap();

    let open = ScheduledTaskRepo::list_by_organization(&pool, org, None, false)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].title, "Order feed");

    let all = ScheduledTaskRepo::list_by_organization(&pool, org, None, true)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn reminder_scan_returns_each_task_once(pool: PgPool) {
    let (org, _) = seed_protocol(&pool).await;
    let task = ScheduledTaskRepo::create(
        &pool,
        org,
        &farrowtrack_db::models::scheduled_task::CreateScheduledTask {
            sow_id: None,
            title: "Pregnancy check".to_string(),
            description: None,
            due_date: d(2025, 4, 1),
        },
    )
    .await
    .unwrap();

    let due = ScheduledTaskRepo::list_due_unreminded(&pool, d(2025, 4, 1))
        .await
        .unwrap();
    assert_eq!(due.len(), 1);

    ScheduledTaskRepo::mark_reminded(&pool, task.id).await.unwrap();

    let due = ScheduledTaskRepo::list_due_unreminded(&pool, d(2025, 4, 1))
        .await
        .unwrap();
    assert!(due.is_empty());
}
