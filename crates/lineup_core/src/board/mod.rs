//! Live lineup board
//!
//! `Lineup` owns the roster, the active squad size and the saved collections.
//! Every mutation of saved state (formations, history) is committed to the
//! persistence store before the call returns. When a commit fails the
//! in-memory change is kept and the error is returned to the caller.

use crate::clock::{time_derived_id, Clock, SystemClock};
use crate::config::LineupConfig;
use crate::drag::{
    DragController, DragStart, DragState, ListenerRegistry, NoopListeners, PitchRect, PointerEvent,
};
use crate::error::{LineupError, Result};
use crate::export::{export_file_name, ExportJob, ExportScene, RenderOptions};
use crate::formation::{Formation, FormationService};
use crate::history::{HistoryEntry, HistoryLog};
use crate::layout::{default_players, layout_for, Slot};
use crate::models::{PhotoRef, Player, PlayerNumber, PlayerPatch, Roster};
use crate::persistence::{KeyValueStore, PersistenceStore};
use crate::sync::reconcile_with;

pub const CUSTOM_PLAYER_NAME: &str = "Jogador";

pub struct Lineup<S, C = SystemClock, L = NoopListeners> {
    config: LineupConfig,
    team_name: String,
    game_type: String,
    slots: Vec<Slot>,
    roster: Roster,
    drag: DragController<L>,
    formations: FormationService,
    history: HistoryLog,
    persistence: PersistenceStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Lineup<S, C, NoopListeners> {
    /// Open the board, loading saved formations and history once.
    pub fn open(config: LineupConfig, store: S, clock: C) -> Self {
        Self::with_listeners(config, store, clock, NoopListeners)
    }
}

impl<S: KeyValueStore, C: Clock, L: ListenerRegistry> Lineup<S, C, L> {
    pub fn with_listeners(config: LineupConfig, store: S, clock: C, listeners: L) -> Self {
        let persistence = PersistenceStore::with_keys(store, &config.storage);
        let formations = FormationService::from_formations(persistence.load_formations());
        let history = persistence.load_history(config.history_capacity);
        let slots = layout_for(&config.game_type);
        let roster = default_players(&slots);

        log::info!(
            "Opened lineup board: {} saved formation(s), {} history entr(ies)",
            formations.len(),
            history.len()
        );

        Self {
            team_name: config.team_name.clone(),
            game_type: config.game_type.clone(),
            config,
            slots,
            roster,
            drag: DragController::new(listeners),
            formations,
            history,
            persistence,
            clock,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &LineupConfig {
        &self.config
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn set_team_name(&mut self, team_name: impl Into<String>) {
        self.team_name = team_name.into();
    }

    pub fn game_type(&self) -> &str {
        &self.game_type
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.roster.get(player_id)
    }

    pub fn formations(&self) -> &[Formation] {
        self.formations.formations()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn selected(&self) -> Option<&str> {
        self.drag.selected()
    }

    pub fn persistence(&self) -> &PersistenceStore<S> {
        &self.persistence
    }

    /// Header line, e.g. "11x11 • 11 jogadores".
    pub fn summary(&self) -> String {
        format!("{} • {} jogadores", self.game_type, self.roster.len())
    }

    // ========================
    // Squad size
    // ========================

    /// Switch squad size and remap the roster onto the new slots.
    ///
    /// Returns `false` when the squad size is unchanged.
    pub fn set_game_type(&mut self, game_type: &str) -> bool {
        if self.game_type == game_type {
            return false;
        }
        self.drag.cancel();

        self.slots = layout_for(game_type);
        self.roster = reconcile_with(&self.roster, &self.slots, self.config.custom_player_policy);
        self.game_type = game_type.to_string();

        if self.drag.selected().is_some_and(|id| !self.roster.contains(id)) {
            self.drag.clear_selection();
        }

        log::debug!("Squad size set to {} ({} players)", self.game_type, self.roster.len());
        true
    }

    // ========================
    // Player management
    // ========================

    /// Add a free player in the centre of the pitch.
    pub fn add_player(&mut self) -> String {
        let id = time_derived_id("p_custom", self.clock.now_millis(), |candidate| {
            self.roster.contains(candidate)
        });
        let player = Player {
            id: id.clone(),
            name: CUSTOM_PLAYER_NAME.to_string(),
            number: PlayerNumber::from(self.roster.len() + 1),
            photo: None,
            x: 50.0,
            y: 50.0,
            slot_id: None,
        };

        // The id was just checked against the roster
        if let Err(player) = self.roster.push(player) {
            log::warn!("Player id '{}' appeared twice", player.id);
        }
        id
    }

    /// Add a fully specified player.
    pub fn insert_player(&mut self, mut player: Player) -> Result<()> {
        let (x, y) = player.position();
        player.set_position(x, y);
        self.roster.push(player).map_err(|p| LineupError::DuplicatePlayer(p.id))
    }

    pub fn update_player(&mut self, player_id: &str, patch: PlayerPatch) -> Result<()> {
        let player = self
            .roster
            .get_mut(player_id)
            .ok_or_else(|| LineupError::UnknownPlayer(player_id.to_string()))?;
        patch.apply(player);
        Ok(())
    }

    /// Store an uploaded image inline on the player.
    pub fn set_player_photo(&mut self, player_id: &str, mime: &str, bytes: &[u8]) -> Result<()> {
        if !self.roster.contains(player_id) {
            return Err(LineupError::UnknownPlayer(player_id.to_string()));
        }
        let photo = PhotoRef::from_image_bytes(mime, bytes)?;
        self.update_player(player_id, PlayerPatch::default().photo(Some(photo)))
    }

    pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let removed = self.roster.remove(player_id)?;
        if self.drag.selected() == Some(player_id) {
            self.drag.clear_selection();
        }
        Some(removed)
    }

    /// Open the edit panel for a player without dragging it.
    pub fn select_player(&mut self, player_id: &str) -> Result<()> {
        if !self.roster.contains(player_id) {
            return Err(LineupError::UnknownPlayer(player_id.to_string()));
        }
        self.drag.select(player_id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.drag.clear_selection();
    }

    // ========================
    // Dragging
    // ========================

    pub fn pointer_down(&mut self, player_id: &str, rect: PitchRect) -> Result<DragStart> {
        if !self.roster.contains(player_id) {
            return Err(LineupError::UnknownPlayer(player_id.to_string()));
        }
        Ok(self.drag.begin(player_id, rect)?)
    }

    /// Apply a move event; returns the dragged player's new position.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Option<(f64, f64)> {
        let update = self.drag.track(event)?;
        let player = self.roster.get_mut(&update.player_id)?;
        player.set_position(update.x, update.y);
        Some(player.position())
    }

    /// Pointer-up or touch-end. Records the roster in history when a drag ends.
    pub fn pointer_up(&mut self) -> Result<bool> {
        if self.drag.end().is_none() {
            return Ok(false);
        }
        self.record_edit()?;
        Ok(true)
    }

    /// Abort the running drag without touching history.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel().is_some()
    }

    /// Record the current roster as an edit.
    pub fn record_edit(&mut self) -> Result<()> {
        let entry = HistoryEntry::edit(self.clock.now(), self.roster.clone());
        self.push_history(entry)
    }

    // ========================
    // Formations
    // ========================

    pub fn save_formation(&mut self, name: Option<&str>) -> Result<Formation> {
        let now = self.clock.now();
        let formation = self
            .formations
            .save(&self.game_type, &self.roster, &self.team_name, name, now)
            .clone();

        log::info!("Saved formation '{}' ({})", formation.name, formation.id);
        self.persistence.save_formations(self.formations.formations())?;
        Ok(formation)
    }

    /// Restore a saved formation. Unknown ids are a no-op returning `false`.
    ///
    /// The snapshot replaces the roster as saved; it is not re-checked
    /// against the slots of its squad size.
    pub fn load_formation(&mut self, formation_id: &str) -> Result<bool> {
        let Some(formation) = self.formations.find(formation_id) else {
            log::debug!("No formation with id '{}'", formation_id);
            return Ok(false);
        };
        let game_type = formation.game_type.clone();
        let roster = formation.players.clone();
        let name = formation.name.clone();

        self.drag.cancel();
        self.drag.clear_selection();
        self.slots = layout_for(&game_type);
        self.game_type = game_type;
        self.roster = roster;

        log::info!("Loaded formation '{}' ({})", name, formation_id);
        let entry = HistoryEntry::load(self.clock.now(), name);
        self.push_history(entry)?;
        Ok(true)
    }

    /// Remove a saved formation. Unknown ids are a no-op returning `false`.
    pub fn delete_formation(&mut self, formation_id: &str) -> Result<bool> {
        let Some(removed) = self.formations.delete(formation_id) else {
            return Ok(false);
        };

        log::info!("Deleted formation '{}' ({})", removed.name, removed.id);
        self.persistence.save_formations(self.formations.formations())?;
        Ok(true)
    }

    // ========================
    // Export
    // ========================

    /// Capture the board for rendering. The job borrows nothing from the board.
    pub fn prepare_export(&self) -> ExportJob {
        ExportJob {
            scene: ExportScene {
                team_name: self.team_name.clone(),
                game_type: self.game_type.clone(),
                summary: self.summary(),
                players: self.roster.players().to_vec(),
            },
            options: RenderOptions::from(&self.config.export),
            file_name: export_file_name(&self.team_name, &self.config.export.file_suffix),
        }
    }

    /// Record a finished export in history.
    pub fn record_export(&mut self) -> Result<()> {
        let entry = HistoryEntry::export(self.clock.now());
        self.push_history(entry)
    }

    fn push_history(&mut self, entry: HistoryEntry) -> Result<()> {
        self.history.append(entry);
        self.persistence.save_history(&self.history)?;
        Ok(())
    }
}
