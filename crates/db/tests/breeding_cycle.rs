//! Integration tests for the breeding cycle: attempt, farrowing,
//! litter-number allocation, piglets, weaning.

use chrono::NaiveDate;
use sqlx::PgPool;

use farrowtrack_core::breeding::expected_farrowing_date;
use farrowtrack_db::models::breeding::CreateBreedingAttempt;
use farrowtrack_db::models::farrowing::RecordFarrowing;
use farrowtrack_db::models::organization::CreateOrganization;
use farrowtrack_db::models::piglet::CreatePiglet;
use farrowtrack_db::models::sow::CreateSow;
use farrowtrack_db::repositories::{
    BreedingRepo, FarrowingRepo, OrganizationRepo, PigletRepo, SowRepo,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn seed_sow(pool: &PgPool) -> (i64, i64) {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: "Hilltop Farm".to_string(),
        },
    )
    .await
    .unwrap()
    .id;

    let sow = SowRepo::create(
        pool,
        org,
        &CreateSow {
            ear_tag: Some("S-1".to_string()),
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
        },
    )
    .await
    .unwrap();

    (org, sow.id)
}

fn breeding(bred_at: NaiveDate) -> CreateBreedingAttempt {
    CreateBreedingAttempt {
        boar_id: None,
        boar_description: Some("Duroc AI straw #12".to_string()),
        method: "ai".to_string(),
        bred_at,
        notes: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn breeding_creates_pending_attempt(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;

    let attempt = BreedingRepo::create(&pool, org, sow_id, &breeding(d(2025, 3, 1)))
        .await
        .unwrap();
    assert_eq!(attempt.outcome, "pending");
    assert!(attempt.pregnancy_confirmed_at.is_none());

    let expected = expected_farrowing_date(attempt.bred_at);
    let farrowing =
        FarrowingRepo::create_expected(&pool, org, sow_id, Some(attempt.id), expected)
            .await
            .unwrap();
    assert_eq!(farrowing.expected_date, d(2025, 6, 23));
    assert!(farrowing.actual_date.is_none());

    let open = FarrowingRepo::find_open_by_attempt(&pool, org, attempt.id)
        .await
        .unwrap();
    assert_eq!(open.unwrap().id, farrowing.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn pregnancy_outcome_updates_stamp_confirmation(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;
    let attempt = BreedingRepo::create(&pool, org, sow_id, &breeding(d(2025, 3, 1)))
        .await
        .unwrap();

    let confirmed = BreedingRepo::update_outcome(&pool, org, attempt.id, "pregnant", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.outcome, "pregnant");
    assert!(confirmed.pregnancy_confirmed_at.is_some());

    let reverted = BreedingRepo::update_outcome(&pool, org, attempt.id, "pending", None)
        .await
        .unwrap()
        .unwrap();
    assert!(reverted.pregnancy_confirmed_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn pending_check_listing_uses_cutoff_date(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;
    BreedingRepo::create(&pool, org, sow_id, &breeding(d(2025, 3, 1)))
        .await
        .unwrap();
    BreedingRepo::create(&pool, org, sow_id, &breeding(d(2025, 3, 20)))
        .await
        .unwrap();

    // Cutoff of March 1 + 18 days: only the first attempt qualifies.
    let due = BreedingRepo::list_pending_checks(&pool, org, d(2025, 3, 1))
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].bred_at, d(2025, 3, 1));
}

#[sqlx::test(migrations = "./migrations")]
async fn farrowing_outcome_allocates_sequential_litter_numbers(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;

    let mut farrowing_ids = Vec::new();
    for i in 0..2 {
        let bred = d(2025, 1, 1 + i);
        let attempt = BreedingRepo::create(&pool, org, sow_id, &breeding(bred))
            .await
            .unwrap();
        let f = FarrowingRepo::create_expected(
            &pool,
            org,
            sow_id,
            Some(attempt.id),
            expected_farrowing_date(bred),
        )
        .await
        .unwrap();
        farrowing_ids.push(f.id);
    }

    let outcome = RecordFarrowing {
        actual_date: d(2025, 4, 25),
        live_born: 11,
        stillborn: Some(1),
        mummified: None,
        notes: None,
    };

    let first = FarrowingRepo::record_outcome(&pool, org, farrowing_ids[0], &outcome)
        .await
        .unwrap()
        .unwrap();
    let second = FarrowingRepo::record_outcome(&pool, org, farrowing_ids[1], &outcome)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.litter_number, Some(1));
    assert_eq!(second.litter_number, Some(2));
    assert_eq!(first.live_born, Some(11));
    assert_eq!(first.mummified, Some(0), "unset counts default to zero");

    // Recording twice must not burn another litter number.
    let again = FarrowingRepo::record_outcome(&pool, org, farrowing_ids[0], &outcome)
        .await
        .unwrap();
    assert!(again.is_none());
    assert_eq!(
        FarrowingRepo::count_completed_by_sow(&pool, org, sow_id)
            .await
            .unwrap(),
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn weaning_reconciles_piglets_and_stamps_farrowing(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;
    let attempt = BreedingRepo::create(&pool, org, sow_id, &breeding(d(2025, 1, 1)))
        .await
        .unwrap();
    let farrowing = FarrowingRepo::create_expected(
        &pool,
        org,
        sow_id,
        Some(attempt.id),
        expected_farrowing_date(d(2025, 1, 1)),
    )
    .await
    .unwrap();
    let farrowing = FarrowingRepo::record_outcome(
        &pool,
        org,
        farrowing.id,
        &RecordFarrowing {
            actual_date: d(2025, 4, 25),
            live_born: 3,
            stillborn: None,
            mummified: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    let litter = farrowing.litter_number.unwrap();
    for seq in 1..=3 {
        PigletRepo::create(
            &pool,
            org,
            farrowing.id,
            &CreatePiglet {
                ear_notch_right: litter,
                ear_notch_left: seq,
                sex: None,
                status: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(
        PigletRepo::count_by_status(&pool, org, farrowing.id, "nursing")
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        PigletRepo::max_sequence(&pool, org, farrowing.id).await.unwrap(),
        3
    );

    let weaned = PigletRepo::wean_nursing(&pool, org, farrowing.id).await.unwrap();
    assert_eq!(weaned, 3);

    let stamped = FarrowingRepo::record_weaning(&pool, org, farrowing.id, d(2025, 5, 16), 3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stamped.weaning_date, Some(d(2025, 5, 16)));
    assert_eq!(stamped.weaned_count, Some(3));
    assert_eq!(stamped.moved_out_of_farrowing_date, Some(d(2025, 5, 16)));
}

#[sqlx::test(migrations = "./migrations")]
async fn sow_overview_classifies_parity_and_pregnancy_checks(pool: PgPool) {
    let (org, sow_id) = seed_sow(&pool).await;

    // Gilt with no breedings: no check needed.
    let overview: (String, bool) = sqlx::query_as(
        "SELECT parity, needs_pregnancy_check FROM sow_overview WHERE sow_id = $1",
    )
    .bind(sow_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(overview.0, "gilt");
    assert!(!overview.1);

    // An old pending breeding flips the check flag.
    let long_ago = chrono::Utc::now().date_naive() - chrono::Duration::days(30);
    BreedingRepo::create(&pool, org, sow_id, &breeding(long_ago))
        .await
        .unwrap();

    let overview: (String, bool) = sqlx::query_as(
        "SELECT parity, needs_pregnancy_check FROM sow_overview WHERE sow_id = $1",
    )
    .bind(sow_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(overview.0, "gilt", "breeding alone does not change parity");
    assert!(overview.1, "pending check past 18 days must be flagged");
}
