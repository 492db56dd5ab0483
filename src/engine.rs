use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game from construction to a terminal state.
///
/// The mine field is not materialized until the first hidden cell is
/// revealed, so the first click (and its neighborhood, when it fits) is
/// never a mine. Once `status` turns terminal the whole board is
/// force-revealed and every later command is an accepted no-op.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    seed: u64,
    field: Option<MineField>,
    grid: Array2<CellState>,
    revealed_count: CellCount,
    flags_remaining: i32,
    status: GameStatus,
    triggered_mine: Option<Pos>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let (rows, cols) = config.size();
        Self {
            config,
            seed,
            field: None,
            grid: Array2::default((rows as usize, cols as usize)),
            revealed_count: 0,
            flags_remaining: config.mines() as i32,
            status: GameStatus::default(),
            triggered_mine: None,
        }
    }

    /// Builds a session over an already-materialized field, skipping the
    /// deferred placement. Used for deterministic layouts.
    pub fn with_field(field: MineField) -> Self {
        let config = GameConfig::new_unchecked(field.size(), field.mine_count());
        let mut session = Self::new(config, 0);
        session.field = Some(field);
        session
    }

    /// Discards the board wholesale and starts over.
    pub fn restart(&mut self, config: GameConfig, seed: u64) {
        *self = Self::new(config, seed);
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn size(&self) -> Pos {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    /// Mines minus flags placed; unclamped, so over-flagging drives it
    /// negative.
    pub fn flags_remaining(&self) -> i32 {
        self.flags_remaining
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, pos: Pos) -> CellState {
        self.grid[pos.to_nd_index()]
    }

    /// The mine that ended a lost game, if any.
    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// Whether a reveal on this cell would chord right now.
    pub fn is_chordable(&self, pos: Pos) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match self.cell_at(pos) {
            CellState::Revealed(count) => count == self.count_flagged_neighbors(pos),
            _ => false,
        }
    }

    /// Primary action. Reveals a hidden cell, flood-filling from empty
    /// ones; on an already-revealed cell it chords instead, opening every
    /// hidden non-flagged neighbor once the flags match its count.
    pub fn reveal(&mut self, pos: Pos) -> Result<GameStatus> {
        let pos = self.validate_pos(pos)?;
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        match self.grid[pos.to_nd_index()] {
            CellState::Hidden => {
                self.ensure_field(pos);
                self.reveal_cell(pos);
            }
            CellState::Revealed(count) => {
                if count == self.count_flagged_neighbors(pos) {
                    let hidden: SmallVec<[Pos; 8]> = neighbors(pos, self.size())
                        .filter(|&adjacent| {
                            self.grid[adjacent.to_nd_index()] == CellState::Hidden
                        })
                        .collect();
                    for adjacent in hidden {
                        self.reveal_cell(adjacent);
                    }
                }
            }
            CellState::Flagged | CellState::Mine => {}
        }

        Ok(self.status)
    }

    /// Secondary action. Flips the flag on a hidden cell; on an
    /// already-revealed cell it flag-chords instead: when hidden plus
    /// flagged neighbors exactly fill the count, the hidden ones must all
    /// be mines and get flagged in one stroke.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<GameStatus> {
        let pos = self.validate_pos(pos)?;
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        match self.grid[pos.to_nd_index()] {
            CellState::Hidden => {
                self.grid[pos.to_nd_index()] = CellState::Flagged;
                self.flags_remaining -= 1;
            }
            CellState::Flagged => {
                self.grid[pos.to_nd_index()] = CellState::Hidden;
                self.flags_remaining += 1;
            }
            CellState::Revealed(count) => {
                let mut hidden: SmallVec<[Pos; 8]> = SmallVec::new();
                let mut flagged: u8 = 0;
                for adjacent in neighbors(pos, self.size()) {
                    match self.grid[adjacent.to_nd_index()] {
                        CellState::Hidden => hidden.push(adjacent),
                        CellState::Flagged => flagged += 1,
                        CellState::Revealed(_) | CellState::Mine => {}
                    }
                }

                if hidden.len() as u8 + flagged == count {
                    for adjacent in hidden {
                        self.grid[adjacent.to_nd_index()] = CellState::Flagged;
                        self.flags_remaining -= 1;
                    }
                }
            }
            CellState::Mine => {}
        }

        Ok(self.status)
    }

    fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        if let Some(field) = &self.field {
            return field.validate_pos(pos);
        }

        let size = self.config.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Materializes the mine field on the first real reveal, keeping the
    /// starting neighborhood clear when the density allows it.
    fn ensure_field(&mut self, start: Pos) {
        if self.field.is_some() {
            return;
        }

        log::debug!(
            "placing {} mines, first reveal at {:?}",
            self.config.mines(),
            start
        );
        let field = RandomFieldGenerator::new(self.seed, start, SafeZone::Neighborhood)
            .generate(self.config);
        self.field = Some(field);
    }

    fn has_mine(&self, pos: Pos) -> bool {
        self.field.as_ref().is_some_and(|field| field.contains_mine(pos))
    }

    fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.field.as_ref().map_or(0, |field| field.adjacent_mines(pos))
    }

    /// Reveals one hidden cell and flood-fills from it when empty. The
    /// field must already be materialized.
    fn reveal_cell(&mut self, pos: Pos) {
        if self.grid[pos.to_nd_index()] != CellState::Hidden {
            return;
        }

        if self.has_mine(pos) {
            self.triggered_mine = Some(pos);
            self.end_game(GameStatus::Lost);
            return;
        }

        let count = self.adjacent_mines(pos);
        self.grid[pos.to_nd_index()] = CellState::Revealed(count);
        self.revealed_count += 1;
        log::debug!("revealed {:?}, adjacent mines: {}", pos, count);

        if count == 0 {
            self.flood_fill(pos);
        }

        if self.revealed_count >= self.config.safe_cells() {
            self.end_game(GameStatus::Won);
        }
    }

    /// Breadth-first expansion from an empty cell: every unrevealed
    /// neighbor is revealed (flags cleared), and only empty neighbors
    /// propagate further. Iterative on purpose, recursion depth would
    /// track region size otherwise.
    fn flood_fill(&mut self, start: Pos) {
        let size = self.size();
        let mut visited: HashSet<Pos> = HashSet::new();
        visited.insert(start);
        let mut to_visit: VecDeque<Pos> = neighbors(start, size)
            .filter(|&pos| !self.grid[pos.to_nd_index()].is_revealed())
            .collect();

        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }

            if self.grid[visit.to_nd_index()].is_revealed() {
                continue;
            }

            let count = self.adjacent_mines(visit);
            self.grid[visit.to_nd_index()] = CellState::Revealed(count);
            self.revealed_count += 1;
            log::trace!("flood revealed {:?}, adjacent mines: {}", visit, count);

            if count == 0 {
                to_visit.extend(
                    neighbors(visit, size)
                        .filter(|&pos| !self.grid[pos.to_nd_index()].is_revealed())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_terminal() {
            return;
        }

        self.status = status;
        log::debug!("game over: {:?}", status);
        self.force_reveal();
    }

    /// Final display: every remaining cell becomes revealed, mines
    /// included. Nothing mutates the board after this.
    fn force_reveal(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if self.grid[pos.to_nd_index()].is_revealed() {
                    continue;
                }

                self.grid[pos.to_nd_index()] = if self.has_mine(pos) {
                    CellState::Mine
                } else {
                    CellState::Revealed(self.adjacent_mines(pos))
                };
                self.revealed_count += 1;
            }
        }
    }

    fn count_flagged_neighbors(&self, pos: Pos) -> u8 {
        neighbors(pos, self.size())
            .filter(|&adjacent| self.grid[adjacent.to_nd_index()].is_flagged())
            .count() as u8
    }
}
