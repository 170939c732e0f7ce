use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lineup_core::export::PNG_SIGNATURE;
use lineup_core::{
    ExportScene, FileStore, HistoryKind, Lineup, LineupConfig, PitchRect, PlayerPatch,
    PointerEvent, RenderError, RenderOptions, SnapshotRenderer, SystemClock,
};
use tempfile::TempDir;

// Counts render calls and echoes a minimal PNG header.
struct CountingRenderer {
    calls: AtomicUsize,
}

#[async_trait]
impl SnapshotRenderer for CountingRenderer {
    async fn render_snapshot(
        &self,
        scene: &ExportScene,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if scene.players.is_empty() {
            return Err(RenderError::new("nothing to draw"));
        }
        assert_eq!(options.scale, 2.0);
        Ok(PNG_SIGNATURE.to_vec())
    }
}

fn open(dir: &TempDir) -> Lineup<FileStore, SystemClock> {
    Lineup::open(LineupConfig::default(), FileStore::new(dir.path()), SystemClock)
}

#[test]
fn formation_survives_restart() {
    let dir = TempDir::new().unwrap();

    let saved_id = {
        let mut board = open(&dir);
        board.set_game_type("7x7");
        board.update_player("p_st", PlayerPatch::default().name("Romário").number(11_i64)).unwrap();
        board.pointer_down("p_st", PitchRect::new(0.0, 0.0, 1000.0, 500.0)).unwrap();
        board.pointer_move(&PointerEvent::touch(250.0, 125.0));
        board.pointer_up().unwrap();
        board.save_formation(Some("Ataque")).unwrap().id
    };

    let mut board = open(&dir);
    assert_eq!(board.formations().len(), 1);
    assert_eq!(board.history().len(), 1);
    assert_eq!(board.game_type(), "11x11");

    assert!(board.load_formation(&saved_id).unwrap());
    assert_eq!(board.game_type(), "7x7");
    let striker = board.player("p_st").unwrap();
    assert_eq!(striker.name, "Romário");
    assert_eq!(striker.position(), (25.0, 25.0));
    assert_eq!(board.history().latest().unwrap().kind(), HistoryKind::Load);
}

#[test]
fn corrupt_files_start_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mtp_formations.json"), "[{\"id\":").unwrap();
    std::fs::write(dir.path().join("mtp_history.json"), "42").unwrap();

    let board = open(&dir);
    assert!(board.formations().is_empty());
    assert!(board.history().is_empty());
}

#[tokio::test]
async fn export_records_history_only_on_success() {
    let dir = TempDir::new().unwrap();
    let renderer = CountingRenderer { calls: AtomicUsize::new(0) };
    let mut board = open(&dir);

    board.set_game_type("unknown");
    assert!(board.prepare_export().run(&renderer).await.is_err());
    assert!(board.history().is_empty());

    board.set_game_type("5x5");
    let artifact = board.prepare_export().run(&renderer).await.unwrap();
    board.record_export().unwrap();

    assert_eq!(artifact.file_name, "Meu_Time_Pro_escalação.png");
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
    assert_eq!(board.history().latest().unwrap().kind(), HistoryKind::Export);
}
