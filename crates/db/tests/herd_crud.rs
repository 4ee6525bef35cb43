//! Integration tests for herd CRUD: sows, boars, housing, tenancy scoping.

use chrono::NaiveDate;
use sqlx::PgPool;

use farrowtrack_db::models::housing::CreateHousingUnit;
use farrowtrack_db::models::organization::CreateOrganization;
use farrowtrack_db::models::sow::{CreateSow, UpdateSow};
use farrowtrack_db::repositories::{HousingRepo, OrganizationRepo, SowRepo};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn new_org(pool: &PgPool, name: &str) -> i64 {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_sow(ear_tag: &str) -> CreateSow {
    CreateSow {
        ear_tag: Some(ear_tag.to_string()),
        name: None,
        breed: "Yorkshire".to_string(),
        birth_date: d(2023, 1, 15),
        status: None,
        sire_name: None,
        dam_name: None,
        right_ear_notch: None,
        left_ear_notch: None,
        registration_number: None,
        notes: None,
        housing_unit_id: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn sow_crud_round_trip(pool: PgPool) {
    let org = new_org(&pool, "Hilltop Farm").await;

    let sow = SowRepo::create(&pool, org, &new_sow("S-100")).await.unwrap();
    assert_eq!(sow.status, "active", "status defaults to active");
    assert_eq!(sow.ear_tag.as_deref(), Some("S-100"));

    let fetched = SowRepo::find_by_id(&pool, org, sow.id).await.unwrap();
    assert!(fetched.is_some());

    let updated = SowRepo::update(
        &pool,
        org,
        sow.id,
        &UpdateSow {
            name: Some("Petunia".to_string()),
            status: Some("culled".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Petunia"));
    assert_eq!(updated.status, "culled");

    let active = SowRepo::list_by_organization(&pool, org, Some("active"))
        .await
        .unwrap();
    assert!(active.is_empty());

    assert!(SowRepo::delete(&pool, org, sow.id).await.unwrap());
    assert!(SowRepo::find_by_id(&pool, org, sow.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_ear_tag_violates_unique_constraint(pool: PgPool) {
    let org = new_org(&pool, "Hilltop Farm").await;

    SowRepo::create(&pool, org, &new_sow("S-1")).await.unwrap();
    let err = SowRepo::create(&pool, org, &new_sow("S-1")).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn same_ear_tag_allowed_across_organizations(pool: PgPool) {
    let org_a = new_org(&pool, "Farm A").await;
    let org_b = new_org(&pool, "Farm B").await;

    SowRepo::create(&pool, org_a, &new_sow("S-1")).await.unwrap();
    SowRepo::create(&pool, org_b, &new_sow("S-1")).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn sows_are_invisible_outside_their_organization(pool: PgPool) {
    let org_a = new_org(&pool, "Farm A").await;
    let org_b = new_org(&pool, "Farm B").await;

    let sow = SowRepo::create(&pool, org_a, &new_sow("S-1")).await.unwrap();

    assert!(SowRepo::find_by_id(&pool, org_b, sow.id).await.unwrap().is_none());
    assert!(!SowRepo::delete(&pool, org_b, sow.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn housing_occupancy_counts_active_residents(pool: PgPool) {
    let org = new_org(&pool, "Hilltop Farm").await;

    let unit = HousingRepo::create(
        &pool,
        org,
        &CreateHousingUnit {
            name: "Gestation barn".to_string(),
            unit_type: "gestation".to_string(),
            capacity: 10,
        },
    )
    .await
    .unwrap();

    let sow_a = SowRepo::create(&pool, org, &new_sow("S-1")).await.unwrap();
    let sow_b = SowRepo::create(&pool, org, &new_sow("S-2")).await.unwrap();
    SowRepo::assign_housing(&pool, org, sow_a.id, Some(unit.id))
        .await
        .unwrap();
    SowRepo::assign_housing(&pool, org, sow_b.id, Some(unit.id))
        .await
        .unwrap();

    assert_eq!(SowRepo::count_in_unit(&pool, unit.id).await.unwrap(), 2);

    let occupancy = HousingRepo::occupancy(&pool, org).await.unwrap();
    assert_eq!(occupancy.len(), 1);
    assert_eq!(occupancy[0].occupants, 2);
    assert_eq!(occupancy[0].capacity, 10);

    // Culled sows stop counting against capacity.
    SowRepo::update(
        &pool,
        org,
        sow_b.id,
        &UpdateSow {
            status: Some("culled".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(SowRepo::count_in_unit(&pool, unit.id).await.unwrap(), 1);
}
