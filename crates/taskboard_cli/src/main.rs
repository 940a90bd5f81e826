//! Command-line viewer for the board core.
//!
//! # Responsibility
//! - Verify `taskboard_core` linkage.
//! - Print the stored board (lanes and their ordered tasks) read-only.

use std::process::ExitCode;
use taskboard_core::config::{StoreConfig, LOG_LEVEL_ENV};
use taskboard_core::db::open_db;
use taskboard_core::{
    core_version, default_log_level, init_logging, ping, BoardService, SqliteSnapshotRepository,
};

fn main() -> ExitCode {
    println!("taskboard_core ping={}", ping());
    println!("taskboard_core version={}", core_version());

    let config = StoreConfig::from_env();
    init_cli_logging(&config);

    match print_board(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskboard: {err}");
            ExitCode::FAILURE
        }
    }
}

// Logs go next to the database; a failure here must not block printing the board.
fn init_cli_logging(config: &StoreConfig) {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    let Some(log_dir) = config.log_dir() else {
        return;
    };
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("taskboard: logging disabled: {err}");
        }
    }
}

fn print_board(config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let service = BoardService::open(repo, &config.storage_key)?;
    let board = service.board();

    println!(
        "board db={} key={}",
        config.db_path.display(),
        service.storage_key()
    );
    for (index, lane) in board.list_lanes().iter().enumerate() {
        let tasks = board.get_tasks_by_lane(lane.id);
        println!("[{}] {} (id={}, tasks={})", index + 1, lane.name, lane.id, tasks.len());
        for task in tasks {
            println!("    {}. {} ({})", task.order, task.title, task.id);
        }
    }
    Ok(())
}
