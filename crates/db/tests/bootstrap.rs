//! Full bootstrap test: connect, migrate, verify seed data.

use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn migrations_apply_and_seed_lookups(pool: PgPool) {
    farrowtrack_db::health_check(&pool).await.unwrap();

    let roles: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let role_names: Vec<&str> = roles.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(role_names, ["owner", "manager", "worker"]);

    let event_type_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM event_types")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(
        event_type_count.0 >= 8,
        "event_types should be seeded, got {}",
        event_type_count.0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn read_model_views_exist(pool: PgPool) {
    // Both views must be queryable on an empty database.
    let overview: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sow_overview")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(overview.0, 0);

    let occupancy: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM housing_occupancy")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(occupancy.0, 0);
}
