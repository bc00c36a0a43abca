//! Editor session example binary
//!
//! Walks through a short editing session: a few recorded edits, undo and
//! redo, and closing the project.

use editor_session::EditorSession;
use editor_state_runtime::metrics::describe_metrics;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "editor_session=debug,editor_state_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    describe_metrics();

    println!("=== Editor Session Example ===\n");

    let session = EditorSession::new()?;

    let _scene_handle = session.subscribe_scene(|scene| {
        println!(
            "  scene: '{}' entities={:?} selection={:?}",
            scene.title, scene.entities, scene.selection
        );
    })?;
    let _history_handle = session.subscribe_history(|history| {
        println!(
            "  history: can_undo={} can_redo={}",
            history.can_undo(),
            history.can_redo()
        );
    })?;

    println!(">>> Rename scene");
    session.rename_scene("Level 1")?;

    println!("\n>>> Spawn two entities");
    session.spawn_entity("Player")?;
    session.spawn_entity("Camera")?;

    println!("\n>>> Select the camera (not recorded)");
    session.select(Some(1))?;

    println!("\n>>> Undo twice");
    session.undo()?;
    session.undo()?;

    println!("\n>>> Redo");
    session.redo()?;

    let names: Vec<String> = session
        .history()
        .undo_list()
        .iter()
        .map(|command| command.name().to_string())
        .collect();
    println!("\nUndo list: {names:?}");

    println!("\n>>> Close project (broadcast)");
    session.close_project()?;

    println!("\n=== Session Complete ===");
    Ok(())
}
