use taskboard_core::{Board, BoardSnapshot, LaneId, SnapshotError};

fn populated_board() -> Board {
    let mut board = Board::new();
    let lanes: Vec<LaneId> = board.list_lanes().iter().map(|lane| lane.id).collect();
    let a = board.create_task("A", "first", lanes[0]).unwrap();
    board.create_task("B", "", lanes[0]).unwrap();
    board.create_task("C", "", lanes[1]).unwrap();
    board.reorder_task(&a.id, lanes[0], 1).unwrap();
    board.rename_lane(lanes[2], "Someday").unwrap();
    board.add_lane();
    board
}

#[test]
fn export_then_import_reproduces_board_and_counters() {
    let board = populated_board();
    let exported = board.export_state();

    let mut restored = Board::new();
    restored.import_state(exported.clone());

    assert_eq!(restored, board);
    assert_eq!(restored.export_state(), exported);
    assert_eq!(exported.lane_id_counter(), 4);
    assert_eq!(exported.task_id_counter(), 3);
}

#[test]
fn json_roundtrip_preserves_snapshot() {
    let exported = populated_board().export_state();
    let json = exported.to_json().unwrap();
    let decoded = BoardSnapshot::from_json(&json).unwrap();
    assert_eq!(decoded, exported);
}

#[test]
fn imported_board_continues_counters_without_reuse() {
    let payload = r#"{
        "lanes": [{"id": 4, "name": "Now"}],
        "tasks": [{"id": "task-7", "title": "Old", "content": "", "laneId": 4, "order": 0}]
    }"#;
    let mut board = Board::from_snapshot(BoardSnapshot::from_json(payload).unwrap());

    let lane = board.add_lane();
    assert_eq!(lane.id, LaneId::new(5));
    let task = board.create_task("New", "", LaneId::new(4)).unwrap();
    assert_eq!(task.id.as_str(), "task-8");
    assert_eq!(task.order, 1);
}

#[test]
fn legacy_document_imports_with_string_ids_and_backfilled_orders() {
    let payload = r#"{
        "tasks": [
            {"id": "task-0", "title": "write", "content": "", "queueId": 0},
            {"id": "task-1", "title": "read", "content": "", "queueId": "1"},
            {"id": "task-2", "title": "ship", "content": "", "queueId": "0"}
        ],
        "queues": [
            {"id": 0, "name": "High priority"},
            {"id": "1", "name": "Low priority"}
        ],
        "counters": {"task": 3, "queue": 2}
    }"#;
    let board = Board::from_snapshot(BoardSnapshot::from_json(payload).unwrap());

    let high: Vec<_> = board
        .get_tasks_by_lane(LaneId::new(0))
        .into_iter()
        .map(|task| (task.title, task.order))
        .collect();
    assert_eq!(high, [("write".to_string(), 0), ("ship".to_string(), 1)]);
    assert_eq!(board.get_tasks_by_lane(LaneId::new(1))[0].order, 0);

    let exported = board.export_state();
    assert_eq!(exported.lane_id_counter(), 2);
    assert_eq!(exported.task_id_counter(), 3);
}

#[test]
fn sparse_legacy_orders_are_kept_and_create_appends_after_max() {
    let payload = r#"{
        "lanes": [{"id": 0, "name": "High"}],
        "tasks": [
            {"id": "task-0", "title": "a", "laneId": 0, "order": 0},
            {"id": "task-1", "title": "b", "laneId": 0, "order": 3}
        ],
        "laneIdCounter": 1,
        "taskIdCounter": 2
    }"#;
    let mut board = Board::from_snapshot(BoardSnapshot::from_json(payload).unwrap());
    let created = board.create_task("c", "", LaneId::new(0)).unwrap();
    assert_eq!(created.order, 4);
}

#[test]
fn empty_document_starts_with_default_lanes() {
    let board = Board::from_snapshot(BoardSnapshot::from_json("{}").unwrap());
    let names: Vec<_> = board.list_lanes().into_iter().map(|lane| lane.name).collect();
    assert_eq!(names, ["High", "Medium", "Low"]);
    assert!(board.tasks().is_empty());
}

#[test]
fn invalid_documents_are_rejected() {
    let orphan = r#"{
        "lanes": [{"id": 0, "name": "High"}],
        "tasks": [{"id": "task-0", "title": "lost", "laneId": 9}]
    }"#;
    let err = BoardSnapshot::from_json(orphan).unwrap_err();
    assert!(
        err.to_string().contains("references unknown lane 9"),
        "unexpected error: {err}"
    );

    let blank_title = r#"{
        "lanes": [{"id": 0, "name": "High"}],
        "tasks": [{"id": "task-0", "title": "  ", "laneId": 0}]
    }"#;
    let err = BoardSnapshot::from_json(blank_title).unwrap_err();
    assert!(err.to_string().contains("blank title"), "unexpected error: {err}");

    let err = BoardSnapshot::from_json("not json").unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}

#[test]
fn out_of_range_ids_and_orders_are_rejected() {
    let max_lane_id = r#"{
        "lanes": [{"id": 18446744073709551615, "name": "Edge"}]
    }"#;
    let max_task_id = r#"{
        "lanes": [{"id": 0, "name": "High"}],
        "tasks": [{"id": "task-18446744073709551615", "title": "edge", "laneId": 0}]
    }"#;
    let max_order = r#"{
        "lanes": [{"id": 0, "name": "High"}],
        "tasks": [{"id": "task-0", "title": "edge", "laneId": 0, "order": 18446744073709551615}]
    }"#;
    let exhausted_counter = r#"{"laneIdCounter": 18446744073709551614}"#;

    for payload in [max_lane_id, max_task_id, max_order, exhausted_counter] {
        let err = BoardSnapshot::from_json(payload).unwrap_err();
        assert!(err.to_string().contains("out of range"), "unexpected error: {err}");
    }
}

#[test]
fn largest_accepted_ids_still_issue_fresh_ids() {
    let payload = r#"{
        "lanes": [{"id": 18446744073709551613, "name": "Edge"}],
        "tasks": [{"id": "task-18446744073709551613", "title": "edge", "laneId": 18446744073709551613}]
    }"#;
    let mut board = Board::from_snapshot(BoardSnapshot::from_json(payload).unwrap());

    let lane = board.add_lane();
    assert_eq!(lane.id, LaneId::new(u64::MAX - 1));
    let task = board.add_task("next", "").unwrap();
    assert_eq!(task.id.as_str(), "task-18446744073709551614");
    assert_eq!(task.order, 1);
}
