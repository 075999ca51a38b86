//! `PgServiceRepository` against a real PostgreSQL.
//!
//! Needs `DATABASE_URL` pointing at a disposable database: the catalog tables
//! are emptied before the run. Run with `cargo test -- --ignored`.

use diesel::sql_types::{Integer, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use marketplace_rs::config::DatabaseConfig;
use marketplace_rs::db::{AsyncDbPool, establish_async_connection_pool, run_pending_migrations};
use marketplace_rs::repositories::{PgServiceRepository, ServiceRepository};
use marketplace_rs::utils::PageRequest;
use uuid::Uuid;

async fn test_pool() -> AsyncDbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    run_pending_migrations(&url).await.unwrap();

    let config = DatabaseConfig {
        url,
        ..DatabaseConfig::default()
    };
    establish_async_connection_pool(&config).await.unwrap()
}

async fn reset(pool: &AsyncDbPool) {
    let mut conn = pool.get().await.unwrap();
    for table in ["tasks", "services", "sub_sub_category", "sub_category", "category"] {
        diesel::sql_query(format!("DELETE FROM {table}"))
            .execute(&mut conn)
            .await
            .unwrap();
    }
}

/// Inserts category -> sub-category -> sub-sub-category and returns the leaf id.
async fn add_chain(pool: &AsyncDbPool, name: &str) -> Uuid {
    let mut conn = pool.get().await.unwrap();
    let category = Uuid::new_v4();
    let sub_category = Uuid::new_v4();
    let sub_sub_category = Uuid::new_v4();

    diesel::sql_query("INSERT INTO category (id, name, name_en) VALUES ($1, $2, $2)")
        .bind::<SqlUuid, _>(category)
        .bind::<Text, _>(name)
        .execute(&mut conn)
        .await
        .unwrap();
    diesel::sql_query(
        "INSERT INTO sub_category (id, name, name_en, category_id) VALUES ($1, $2, $2, $3)",
    )
    .bind::<SqlUuid, _>(sub_category)
    .bind::<Text, _>(name)
    .bind::<SqlUuid, _>(category)
    .execute(&mut conn)
    .await
    .unwrap();
    diesel::sql_query(
        "INSERT INTO sub_sub_category (id, name, name_en, sub_category_id) VALUES ($1, $2, $2, $3)",
    )
    .bind::<SqlUuid, _>(sub_sub_category)
    .bind::<Text, _>(name)
    .bind::<SqlUuid, _>(sub_category)
    .execute(&mut conn)
    .await
    .unwrap();

    sub_sub_category
}

/// Inserts a service created `minutes_ago` minutes before now.
async fn add_service(pool: &AsyncDbPool, title: &str, leaf: Uuid, minutes_ago: i32) {
    let mut conn = pool.get().await.unwrap();
    diesel::sql_query(
        "INSERT INTO services (title, title_en, sub_sub_category_id, created_at) \
         VALUES ($1, $1, $2, now() - make_interval(mins => $3))",
    )
    .bind::<Text, _>(title)
    .bind::<SqlUuid, _>(leaf)
    .bind::<Integer, _>(minutes_ago)
    .execute(&mut conn)
    .await
    .unwrap();
}

fn titles(services: &[marketplace_rs::models::Service]) -> Vec<String> {
    services.iter().map(|s| s.title.clone()).collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_many_pages_newest_first() {
    let pool = test_pool().await;
    reset(&pool).await;

    let painting = add_chain(&pool, "Pintura").await;
    let electrical = add_chain(&pool, "Elétrica").await;

    // service-00 is the newest
    for i in 0..25 {
        add_service(&pool, &format!("service-{i:02}"), painting, i).await;
    }
    add_service(&pool, "wiring", electrical, 100).await;

    let repo = PgServiceRepository::new(pool.clone());

    let (rows, total) = repo
        .find_many(None, PageRequest { page: 1, per_page: 3 })
        .await
        .unwrap();
    assert_eq!(total, 26);
    assert_eq!(titles(&rows), ["service-00", "service-01", "service-02"]);

    let (rows, total) = repo
        .find_many(Some(painting), PageRequest { page: 3, per_page: 10 })
        .await
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(
        titles(&rows),
        ["service-20", "service-21", "service-22", "service-23", "service-24"]
    );

    let (rows, total) = repo
        .find_many(Some(electrical), PageRequest { page: 1, per_page: 10 })
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(titles(&rows), ["wiring"]);

    let (rows, total) = repo
        .find_many(Some(painting), PageRequest { page: 4, per_page: 10 })
        .await
        .unwrap();
    assert_eq!(total, 25);
    assert!(rows.is_empty());

    let (rows, total) = repo
        .find_many(Some(Uuid::new_v4()), PageRequest { page: 1, per_page: 10 })
        .await
        .unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());

    reset(&pool).await;
}
