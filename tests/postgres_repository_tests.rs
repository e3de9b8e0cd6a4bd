//! Runs against a real database only when `TODO_TEST_DATABASE_URL` is set.

use chrono::{Duration, Local};
use todo_api::{
    application::clock::start_of_day,
    domain::todo::NewTodo,
    infrastructure::{
        TodoRepository,
        migrations::{connect, run_migrations},
        postgres_todo_repository::PostgresTodoRepository,
    },
};

#[tokio::test]
async fn postgres_round_trip_when_configured() {
    let Ok(database_url) = std::env::var("TODO_TEST_DATABASE_URL") else {
        eprintln!("TODO_TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pool = connect(&database_url, 2).await.expect("connect");
    run_migrations(&pool).await.expect("migrate");
    // Running twice must be a no-op.
    run_migrations(&pool).await.expect("migrate again");

    let repository = PostgresTodoRepository::new(pool);
    let due_date = start_of_day(Local::now().date_naive()) + Duration::days(1);

    let created = repository
        .create(NewTodo {
            title: "pg round trip".to_string(),
            description: None,
            due_date,
        })
        .await
        .expect("create");
    assert!(created.id > 0);
    assert_eq!(created.percent_complete, 0);
    assert!(!created.is_done);

    let mut stored = repository
        .get_by_id(created.id)
        .await
        .expect("get")
        .expect("row exists");
    assert_eq!(stored, created);

    stored.mark_done();
    let saved = repository
        .save(&stored)
        .await
        .expect("save")
        .expect("row exists");
    assert_eq!(saved.percent_complete, 100);

    let window = repository
        .list_due_between(due_date, due_date)
        .await
        .expect("window");
    assert!(window.iter().any(|todo| todo.id == created.id));

    assert!(repository.delete(created.id).await.expect("delete"));
    assert!(!repository.delete(created.id).await.expect("delete again"));
}
