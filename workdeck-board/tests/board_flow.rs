//! Integration test driving a whole board session against the fake remote:
//! load, custom statuses, drag moves, failure rollback and view projection.

use std::sync::Arc;
use workdeck_board::status::{DeleteStatus, ResolveStatuses, SetCustomStatuses};
use workdeck_board::task::{AddTask, MoveTask};
use workdeck_board::test_support::{board_context, test_scope, InMemoryRemote};
use workdeck_board::view::{ProjectView, ViewFilters, ViewMode};
use workdeck_board::{
    BoardContext, BoardError, Execute, ScopeLevel, Status, StatusId, Task, TaskId,
};

#[tokio::test]
async fn test_full_board_session() {
    let (ctx, _remote) = board_context().await;

    // The list inherits the workspace defaults
    let resolved = ResolveStatuses::new(ScopeLevel::List)
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(resolved["is_custom"], false);
    assert_eq!(resolved["inherited_from"], "workspace");

    // Give the list its own workflow
    SetCustomStatuses::new(
        ScopeLevel::List,
        vec![
            Status::new("Backlog"),
            Status::new("Doing"),
            Status::new("Done").with_final(true),
        ],
    )
    .execute(&ctx)
    .await
    .unwrap();

    let resolved = ResolveStatuses::new(ScopeLevel::List)
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(resolved["is_custom"], true);
    let statuses = resolved["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 3);
    for (i, s) in statuses.iter().enumerate() {
        assert_eq!(s["order"], i);
    }
    let backlog = statuses[0]["id"].as_str().unwrap().to_string();
    let doing = statuses[1]["id"].as_str().unwrap().to_string();

    // New tasks land in the first status of the effective set
    let first = AddTask::new("Design the flow").execute(&ctx).await.unwrap();
    let second = AddTask::new("Build the flow").execute(&ctx).await.unwrap();
    assert_eq!(first["status_id"].as_str().unwrap(), backlog);
    assert_eq!(first["order"], 0);
    assert_eq!(second["order"], 1);

    // Drag the second task into Doing
    let moved = MoveTask::drop_on_column(second["id"].as_str().unwrap(), doing.as_str())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(moved["status_changed"], true);
    assert_eq!(moved["task"]["order"], 0);

    // The kanban projection shows one task per active column
    let view = ProjectView::new(ViewMode::Kanban).execute(&ctx).await.unwrap();
    let columns = view["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0]["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(columns[1]["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(columns[2]["tasks"].as_array().unwrap().len(), 0);

    // The list projection drops the empty Done section
    let view = ProjectView::new(ViewMode::List).execute(&ctx).await.unwrap();
    assert_eq!(view["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_drag_converges_on_server_truth() {
    let remote = Arc::new(
        InMemoryRemote::new()
            .with_task(named_task("a", "todo", 0))
            .with_task(named_task("b", "todo", 1)),
    );
    let ctx = BoardContext::load(test_scope(), remote.clone()).await.unwrap();
    remote.clear_calls();
    let before = ctx.snapshot().await;

    // Same-column reorder fails: exact pre-drag snapshot restored
    remote.fail_on("reorder");
    let result = MoveTask::to_index("b", "todo", 0).execute(&ctx).await;
    assert!(matches!(result, Err(BoardError::Remote(_))));
    assert_eq!(ctx.snapshot().await.tasks, before.tasks);

    // Cross-column move fails on the second step: the status update already
    // landed server-side, so the refetch brings the task back in its new
    // column rather than pretending the drag never happened.
    let result = MoveTask::to_index("a", "in-progress", 0).execute(&ctx).await;
    assert!(matches!(result, Err(BoardError::Remote(_))));

    let server = remote.stored_task(&TaskId::from_string("a")).unwrap();
    let local = ctx
        .snapshot()
        .await
        .tasks
        .get(&TaskId::from_string("a"))
        .cloned()
        .unwrap();
    assert_eq!(local.status_id, server.status_id);
    assert_eq!(local.status_id.as_str(), "in-progress");
}

#[tokio::test]
async fn test_status_delete_with_reassignment_end_to_end() {
    let remote = Arc::new(
        InMemoryRemote::new()
            .with_task(named_task("a", "todo", 0))
            .with_task(named_task("b", "in-progress", 0)),
    );
    let ctx = BoardContext::load(test_scope(), remote.clone()).await.unwrap();
    remote.clear_calls();

    // Referenced without reassignment: rejected before any remote call
    let result = DeleteStatus::new(ScopeLevel::List, "todo").execute(&ctx).await;
    assert!(matches!(result, Err(BoardError::StatusInUse { .. })));

    let result = DeleteStatus::new(ScopeLevel::List, "todo")
        .with_reassign_to("in-progress")
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(result["reassigned"], 1);

    let state = ctx.snapshot().await;
    let todo = StatusId::from_string("todo");
    assert!(!state.registry.contains(ScopeLevel::List, &todo));
    assert_eq!(state.tasks.count_with_status(&todo), 0);
    assert_eq!(
        state
            .tasks
            .count_with_status(&StatusId::from_string("in-progress")),
        2
    );

    // The server converged too
    let server = remote.stored_task(&TaskId::from_string("a")).unwrap();
    assert_eq!(server.status_id.as_str(), "in-progress");
}

#[tokio::test]
async fn test_filtered_projection() {
    let remote = Arc::new(
        InMemoryRemote::new()
            .with_task(named_task("a", "todo", 0))
            .with_task(named_task("b", "todo", 1))
            .with_task(named_task("c", "complete", 0)),
    );
    let ctx = BoardContext::load(test_scope(), remote).await.unwrap();

    let view = ProjectView::new(ViewMode::List)
        .with_filters(ViewFilters::none().with_statuses([StatusId::from_string("todo")]))
        .execute(&ctx)
        .await
        .unwrap();

    let groups = view["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["status"]["id"], "todo");
    assert_eq!(groups[0]["tasks"].as_array().unwrap().len(), 2);
}

fn named_task(id: &str, status: &str, order: usize) -> Task {
    let mut task = Task::new(id.to_uppercase(), status, order);
    task.id = TaskId::from_string(id);
    task
}
