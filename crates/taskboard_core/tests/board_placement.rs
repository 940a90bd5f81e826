use taskboard_core::{Board, BoardError, LaneError, LaneId, TaskError, TaskId};

fn lane_ids(board: &Board) -> Vec<LaneId> {
    board.list_lanes().iter().map(|lane| lane.id).collect()
}

fn titles(board: &Board, lane_id: LaneId) -> Vec<String> {
    board
        .get_tasks_by_lane(lane_id)
        .into_iter()
        .map(|task| task.title)
        .collect()
}

fn assert_contiguous(board: &Board) {
    for lane in board.list_lanes() {
        let orders: Vec<usize> = board
            .get_tasks_by_lane(lane.id)
            .iter()
            .map(|task| task.order)
            .collect();
        let expected: Vec<usize> = (0..orders.len()).collect();
        assert_eq!(orders, expected, "lane {} lost contiguity", lane.id);
    }
    let placed: usize = board
        .list_lanes()
        .iter()
        .map(|lane| board.get_tasks_by_lane(lane.id).len())
        .sum();
    assert_eq!(placed, board.tasks().len(), "task placed in unknown lane");
}

#[test]
fn new_board_has_default_priority_lanes() {
    let board = Board::new();
    let names: Vec<_> = board.list_lanes().into_iter().map(|lane| lane.name).collect();
    assert_eq!(names, ["High", "Medium", "Low"]);
    assert_eq!(board.highest_priority_lane_id(), lane_ids(&board)[0]);
}

#[test]
fn create_appends_at_tail_of_lane() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];

    let first = board.create_task("Write report", "", high).unwrap();
    let second = board.create_task("Review", "", high).unwrap();

    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
    assert_eq!(first.id.as_str(), "task-0");
    assert_eq!(second.id.as_str(), "task-1");
}

#[test]
fn create_rejects_blank_title_and_unknown_lane() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    let before = board.clone();

    let err = board.create_task("   ", "body", high).unwrap_err();
    assert_eq!(err, BoardError::Task(TaskError::EmptyTitleRejected));

    let missing = LaneId::new(99);
    let err = board.create_task("Real", "", missing).unwrap_err();
    assert_eq!(err, BoardError::Lane(LaneError::LaneNotFound(missing)));

    assert_eq!(board, before);
}

#[test]
fn add_task_targets_highest_priority_lane() {
    let mut board = Board::new();
    let task = board.add_task("Inbox item", "details").unwrap();
    assert_eq!(task.lane_id, board.highest_priority_lane_id());
    assert_eq!(task.content, "details");
}

#[test]
fn delete_closes_gap_preserving_sequence() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    board.create_task("A", "", high).unwrap();
    let middle = board.create_task("B", "", high).unwrap();
    board.create_task("C", "", high).unwrap();

    let removed = board.delete_task(&middle.id).unwrap();
    assert_eq!(removed.title, "B");

    let remaining = board.get_tasks_by_lane(high);
    let shape: Vec<_> = remaining
        .iter()
        .map(|task| (task.title.as_str(), task.order))
        .collect();
    assert_eq!(shape, [("A", 0), ("C", 1)]);
}

#[test]
fn missing_task_operations_report_not_found_without_mutation() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    board.create_task("A", "", high).unwrap();
    let before = board.clone();
    let ghost = TaskId::from("task-404");
    let not_found = BoardError::Task(TaskError::TaskNotFound(ghost.clone()));

    assert_eq!(board.update_task(&ghost, "x", "").unwrap_err(), not_found);
    assert_eq!(board.delete_task(&ghost).unwrap_err(), not_found);
    assert_eq!(board.move_task_to_lane(&ghost, high).unwrap_err(), not_found);
    assert_eq!(board.reorder_task(&ghost, high, 0).unwrap_err(), not_found);
    assert_eq!(board, before);
}

#[test]
fn update_changes_text_only() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    board.create_task("A", "", high).unwrap();
    let task = board.create_task("B", "old", high).unwrap();

    let updated = board.update_task(&task.id, "  B2 ", "new").unwrap();
    assert_eq!(updated.title, "B2");
    assert_eq!(updated.content, "new");
    assert_eq!(updated.lane_id, high);
    assert_eq!(updated.order, 1);
}

#[test]
fn reorder_to_tail_shifts_others_down() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    let a = board.create_task("A", "", high).unwrap();
    board.create_task("B", "", high).unwrap();
    board.create_task("C", "", high).unwrap();

    let moved = board.reorder_task(&a.id, high, 2).unwrap();
    assert_eq!(moved.order, 2);

    let shape: Vec<_> = board
        .get_tasks_by_lane(high)
        .into_iter()
        .map(|task| (task.title, task.order))
        .collect();
    assert_eq!(
        shape,
        [
            ("B".to_string(), 0),
            ("C".to_string(), 1),
            ("A".to_string(), 2)
        ]
    );
}

#[test]
fn reorder_to_same_position_is_noop() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    board.create_task("A", "", high).unwrap();
    let b = board.create_task("B", "", high).unwrap();
    let before = board.clone();

    board.reorder_task(&b.id, high, 1).unwrap();
    assert_eq!(board, before);
}

#[test]
fn move_to_current_lane_is_idempotent() {
    let mut board = Board::new();
    let high = lane_ids(&board)[0];
    let a = board.create_task("A", "", high).unwrap();
    board.create_task("B", "", high).unwrap();
    let before = board.clone();

    let unchanged = board.move_task_to_lane(&a.id, high).unwrap();
    assert_eq!(unchanged, a);
    assert_eq!(board, before);
}

#[test]
fn move_closes_source_gap_and_appends_to_target() {
    let mut board = Board::new();
    let &[high, medium, _low] = lane_ids(&board).as_slice() else {
        panic!("expected three default lanes");
    };
    let a = board.create_task("A", "", high).unwrap();
    board.create_task("B", "", high).unwrap();
    board.create_task("M", "", medium).unwrap();

    let moved = board.move_task_to_lane(&a.id, medium).unwrap();
    assert_eq!(moved.lane_id, medium);
    assert_eq!(moved.order, 1);
    assert_eq!(titles(&board, high), ["B"]);
    assert_eq!(titles(&board, medium), ["M", "A"]);
    assert_contiguous(&board);
}

#[test]
fn move_to_unknown_lane_is_rejected() {
    let mut board = Board::new();
    let a = board.add_task("A", "").unwrap();
    let before = board.clone();

    let err = board.move_task_to_lane(&a.id, LaneId::new(42)).unwrap_err();
    assert_eq!(err, BoardError::Lane(LaneError::LaneNotFound(LaneId::new(42))));
    assert_eq!(board, before);
}

#[test]
fn remove_last_lane_relocates_and_then_protects_final_lane() {
    let mut board = Board::new();
    board.remove_last_lane().unwrap();
    let &[lane_one, lane_two] = lane_ids(&board).as_slice() else {
        panic!("expected two lanes");
    };
    board.create_task("one", "", lane_one).unwrap();
    let orphan = board.create_task("two", "", lane_two).unwrap();

    let outcome = board.remove_last_lane().unwrap();
    assert_eq!(outcome.removed_lane.id, lane_two);
    assert_eq!(outcome.fallback_lane_id, lane_one);
    assert_eq!(outcome.relocated_task_ids, [orphan.id.clone()]);

    let relocated = board.get_task(&orphan.id).unwrap();
    assert_eq!(relocated.lane_id, lane_one);
    assert_eq!(relocated.order, 1);
    assert_eq!(titles(&board, lane_one), ["one", "two"]);

    let before = board.clone();
    let err = board.remove_last_lane().unwrap_err();
    assert_eq!(err, BoardError::Lane(LaneError::LastLaneProtected));
    assert_eq!(board, before);
    assert_eq!(board.list_lanes().len(), 1);
}

#[test]
fn add_lane_appends_lowest_priority_with_positional_name() {
    let mut board = Board::new();
    let lane = board.add_lane();
    assert_eq!(lane.name, "Lane 4");
    assert_eq!(lane.id, LaneId::new(3));
    assert_eq!(lane_ids(&board).last(), Some(&lane.id));
}

#[test]
fn rename_blank_uses_positional_default() {
    let mut board = Board::new();
    let medium = lane_ids(&board)[1];

    assert_eq!(board.rename_lane(medium, "  Soon  ").unwrap(), "Soon");
    assert_eq!(board.rename_lane(medium, "   ").unwrap(), "Lane 2");
    assert_eq!(board.find_lane(medium).unwrap().name, "Lane 2");

    let err = board.rename_lane(LaneId::new(77), "x").unwrap_err();
    assert_eq!(err, BoardError::Lane(LaneError::LaneNotFound(LaneId::new(77))));
}

#[test]
fn list_lanes_returns_detached_copy() {
    let board = Board::new();
    let mut lanes = board.list_lanes();
    lanes[0].name = "Mutated".to_string();
    lanes.clear();
    assert_eq!(board.list_lanes()[0].name, "High");
}

#[test]
fn mixed_operation_sequence_keeps_every_lane_contiguous() {
    let mut board = Board::new();
    board.add_lane();
    let mut ids = Vec::new();

    for step in 0..120_usize {
        let lanes = lane_ids(&board);
        let lane = lanes[step % lanes.len()];
        match step % 7 {
            0 | 1 | 2 => {
                let task = board.create_task(&format!("t{step}"), "", lane).unwrap();
                ids.push(task.id);
            }
            3 if !ids.is_empty() => {
                let id = &ids[(step * 5) % ids.len()];
                board.move_task_to_lane(id, lane).unwrap();
            }
            4 if !ids.is_empty() => {
                let id = ids[(step * 3) % ids.len()].clone();
                let current = board.get_task(&id).unwrap().lane_id;
                board.reorder_task(&id, current, (step * 11) % 6).unwrap();
            }
            5 if !ids.is_empty() => {
                let id = ids.remove((step * 7) % ids.len());
                board.delete_task(&id).unwrap();
            }
            6 => {
                if step % 4 == 0 {
                    board.add_lane();
                } else {
                    let _ = board.remove_last_lane();
                }
            }
            _ => {}
        }
        assert_contiguous(&board);
        assert!(!board.list_lanes().is_empty());
    }
}
