use std::{collections::HashSet, sync::Arc};

use chrono::{Duration, Local};
use todo_api::{
    application::{clock::start_of_day, dto::CreateTodoRequest, todo_service::TodoService},
    infrastructure::in_memory_todo_repository::InMemoryTodoRepository,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_receive_unique_ids() {
    let service = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new())));
    let due_date = start_of_day(Local::now().date_naive()) + Duration::days(2);

    let handles = (0..200)
        .map(|index| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create(CreateTodoRequest {
                        title: format!("parallel {index}"),
                        description: None,
                        due_date,
                    })
                    .await
                    .expect("create should succeed")
                    .id
            })
        })
        .collect::<Vec<_>>();

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.expect("task should join");
        assert!(id > 0);
        assert!(ids.insert(id), "id {id} assigned twice");
    }

    assert_eq!(ids.len(), 200);
    assert_eq!(service.get_all().await.expect("list").len(), 200);
}
