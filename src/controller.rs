use crate::grid::Grid;
use crate::patterns::PatternLibrary;
use crate::stamp::resolve_stamp_coordinates;
use crate::topology::Coord;

/// What pointer input does to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pointer pans the camera; the grid is never touched.
    #[default]
    MoveAround,
    /// Pointer paints cells alive.
    Life,
    /// Pointer paints cells dead.
    Death,
    /// A click stamps the selected pattern centred on the clicked cell.
    Pattern,
}

impl InteractionMode {
    pub fn label(self) -> &'static str {
        match self {
            InteractionMode::MoveAround => "move-around",
            InteractionMode::Life => "life",
            InteractionMode::Death => "death",
            InteractionMode::Pattern => "pattern",
        }
    }

    /// Whether this mode lets pointer input change cells.
    pub fn mutates(self) -> bool {
        self != InteractionMode::MoveAround
    }
}

/// Owns the interaction state: edit mode, active mode, selected pattern,
/// mirror flag and the preview anchor.
///
/// While edit mode is on the host must not advance the simulation.
#[derive(Debug, Clone)]
pub struct Controller {
    mode: InteractionMode,
    edit_mode: bool,
    selected_pattern: String,
    mirror: bool,
    preview_anchor: Option<Coord>,
    pointer_down: bool,
}

impl Controller {
    pub fn new(selected_pattern: impl Into<String>) -> Self {
        Self {
            mode: InteractionMode::default(),
            edit_mode: false,
            selected_pattern: selected_pattern.into(),
            mirror: false,
            preview_anchor: None,
            pointer_down: false,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode != InteractionMode::Pattern {
            self.preview_anchor = None;
        }
        self.mode = mode;
        log::info!("Interaction mode: {}", mode.label());
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        if !on {
            self.pointer_down = false;
        }
        log::info!("Edit mode {}", if on { "on (simulation paused)" } else { "off" });
    }

    pub fn toggle_edit_mode(&mut self) {
        self.set_edit_mode(!self.edit_mode);
    }

    /// Whether pointer input currently edits the grid.
    fn can_mutate(&self) -> bool {
        self.edit_mode && self.mode.mutates()
    }

    /// The camera must not pan while pointer drags are editing.
    pub fn camera_locked(&self) -> bool {
        self.can_mutate()
    }

    pub fn selected_pattern(&self) -> &str {
        &self.selected_pattern
    }

    pub fn select_pattern(&mut self, name: impl Into<String>) {
        self.selected_pattern = name.into();
        log::info!("Selected pattern: {}", self.selected_pattern);
    }

    /// Step the selection forwards or backwards through `library`.
    pub fn cycle_pattern(&mut self, library: &PatternLibrary, forward: bool) {
        if library.is_empty() {
            return;
        }
        let len = library.len();
        let next = match library.index_of(&self.selected_pattern) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        if let Some(pattern) = library.by_index(next) {
            self.select_pattern(pattern.name());
        }
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
        log::info!("Mirror {}", if mirror { "on" } else { "off" });
    }

    pub fn toggle_mirror(&mut self) {
        self.set_mirror(!self.mirror);
    }

    pub fn preview_anchor(&self) -> Option<Coord> {
        self.preview_anchor
    }

    /// Handle a pointer press on `cell` (`None` when off the grid).
    /// Returns `true` if the grid changed.
    pub fn pointer_pressed(
        &mut self,
        cell: Option<Coord>,
        grid: &mut Grid,
        library: &PatternLibrary,
    ) -> bool {
        self.pointer_down = true;
        let Some(cell) = cell else { return false };
        if !self.can_mutate() {
            return false;
        }
        match self.mode {
            InteractionMode::Life => self.paint(cell, grid, true),
            InteractionMode::Death => self.paint(cell, grid, false),
            InteractionMode::Pattern => self.stamp(cell, grid, library),
            InteractionMode::MoveAround => false,
        }
    }

    /// Handle pointer motion onto `cell`. Tracks the preview anchor and keeps
    /// painting while the pointer is held in life or death mode.
    pub fn pointer_moved(&mut self, cell: Option<Coord>, grid: &mut Grid) -> bool {
        if self.mode == InteractionMode::Pattern {
            self.preview_anchor = cell;
        }
        let Some(cell) = cell else { return false };
        if !self.pointer_down || !self.can_mutate() {
            return false;
        }
        match self.mode {
            InteractionMode::Life => self.paint(cell, grid, true),
            InteractionMode::Death => self.paint(cell, grid, false),
            InteractionMode::Pattern | InteractionMode::MoveAround => false,
        }
    }

    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Cells the selected pattern would cover at the preview anchor. Empty
    /// unless pattern mode is active in edit mode with the pointer on the grid.
    pub fn preview(&self, grid: &Grid, library: &PatternLibrary) -> Vec<Coord> {
        if !self.can_mutate() || self.mode != InteractionMode::Pattern {
            return Vec::new();
        }
        let (Some(anchor), Some(pattern)) =
            (self.preview_anchor, library.get(&self.selected_pattern))
        else {
            return Vec::new();
        };
        resolve_stamp_coordinates(
            pattern,
            anchor,
            self.mirror,
            grid.wrap(),
            grid.rows(),
            grid.cols(),
        )
    }

    fn paint(&self, cell: Coord, grid: &mut Grid, alive: bool) -> bool {
        if grid.is_alive(cell.i, cell.j) == alive {
            return false;
        }
        grid.toggle_cell(cell.i, cell.j, alive);
        true
    }

    fn stamp(&self, cell: Coord, grid: &mut Grid, library: &PatternLibrary) -> bool {
        match library.get(&self.selected_pattern) {
            Some(pattern) => grid.stamp(pattern, cell, self.mirror) > 0,
            None => {
                log::warn!("Unknown pattern {:?}; nothing stamped", self.selected_pattern);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Wrap;

    fn setup() -> (Controller, Grid, PatternLibrary) {
        (
            Controller::new("glider"),
            Grid::new(10, 10, Wrap::Bounded),
            PatternLibrary::builtin(),
        )
    }

    #[test]
    fn test_defaults() {
        let (ctl, _, _) = setup();
        assert_eq!(ctl.mode(), InteractionMode::MoveAround);
        assert!(!ctl.is_editing());
        assert!(!ctl.camera_locked());
        assert!(!ctl.mirror());
    }

    #[test]
    fn test_mirror_flips_stamp() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        ctl.set_mirror(true);
        assert!(ctl.mirror());
        ctl.pointer_pressed(Some(Coord::new(5, 5)), &mut grid, &lib);
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(
            alive,
            vec![
                Coord::new(4, 5),
                Coord::new(5, 4),
                Coord::new(6, 4),
                Coord::new(6, 5),
                Coord::new(6, 6),
            ]
        );
        ctl.toggle_mirror();
        assert!(!ctl.mirror());
        ctl.set_mirror(false);
        assert!(!ctl.mirror());
    }

    #[test]
    fn test_move_around_never_mutates() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        assert!(!ctl.pointer_pressed(Some(Coord::new(2, 2)), &mut grid, &lib));
        assert!(!ctl.pointer_moved(Some(Coord::new(3, 3)), &mut grid));
        assert_eq!(grid.population(), 0);
        assert!(!ctl.camera_locked());
    }

    #[test]
    fn test_no_mutation_outside_edit_mode() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_mode(InteractionMode::Life);
        assert!(!ctl.pointer_pressed(Some(Coord::new(2, 2)), &mut grid, &lib));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_life_and_death_painting() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Life);
        assert!(ctl.camera_locked());
        assert!(ctl.pointer_pressed(Some(Coord::new(1, 1)), &mut grid, &lib));
        assert!(ctl.pointer_moved(Some(Coord::new(1, 2)), &mut grid));
        ctl.pointer_released();
        assert!(!ctl.pointer_moved(Some(Coord::new(1, 3)), &mut grid));
        assert_eq!(
            grid.alive_cells().collect::<Vec<_>>(),
            vec![Coord::new(1, 1), Coord::new(1, 2)]
        );

        ctl.set_mode(InteractionMode::Death);
        assert!(ctl.pointer_pressed(Some(Coord::new(1, 1)), &mut grid, &lib));
        assert!(!grid.is_alive(1, 1));
        assert!(grid.is_alive(1, 2));
    }

    #[test]
    fn test_off_grid_pointer_is_noop() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Life);
        assert!(!ctl.pointer_pressed(None, &mut grid, &lib));
        assert!(!ctl.pointer_moved(None, &mut grid));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_pattern_stamp_on_press() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        assert!(ctl.pointer_pressed(Some(Coord::new(5, 5)), &mut grid, &lib));
        assert_eq!(grid.population(), 5);
        // dragging in pattern mode moves the preview, it does not stamp again
        assert!(!ctl.pointer_moved(Some(Coord::new(2, 2)), &mut grid));
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_unknown_pattern_stamps_nothing() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        ctl.select_pattern("does-not-exist");
        assert!(!ctl.pointer_pressed(Some(Coord::new(5, 5)), &mut grid, &lib));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_preview_tracks_pointer() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        ctl.pointer_moved(Some(Coord::new(5, 5)), &mut grid);
        assert_eq!(ctl.preview_anchor(), Some(Coord::new(5, 5)));
        let preview = ctl.preview(&grid, &lib);
        assert_eq!(preview.len(), 5);
        assert_eq!(grid.population(), 0);

        ctl.toggle_mirror();
        let mirrored = ctl.preview(&grid, &lib);
        assert!(mirrored.contains(&Coord::new(5, 4)));
        assert!(!mirrored.contains(&Coord::new(5, 6)));

        ctl.pointer_moved(None, &mut grid);
        assert_eq!(ctl.preview_anchor(), None);
        assert!(ctl.preview(&grid, &lib).is_empty());
    }

    #[test]
    fn test_leaving_pattern_mode_clears_preview() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        ctl.pointer_moved(Some(Coord::new(5, 5)), &mut grid);
        ctl.set_mode(InteractionMode::Life);
        assert_eq!(ctl.preview_anchor(), None);
        assert!(ctl.preview(&grid, &lib).is_empty());
    }

    #[test]
    fn test_clear_all_ignores_preview() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.set_mode(InteractionMode::Pattern);
        ctl.pointer_pressed(Some(Coord::new(4, 4)), &mut grid, &lib);
        ctl.pointer_moved(Some(Coord::new(6, 6)), &mut grid);
        grid.clear_all();
        assert_eq!(grid.population(), 0);
        assert!(!ctl.preview(&grid, &lib).is_empty());
    }

    #[test]
    fn test_cycle_pattern() {
        let (mut ctl, _, lib) = setup();
        ctl.cycle_pattern(&lib, true);
        assert_eq!(ctl.selected_pattern(), "blinker");
        ctl.cycle_pattern(&lib, false);
        ctl.cycle_pattern(&lib, false);
        assert_eq!(ctl.selected_pattern(), "gosper-glider-gun");
        ctl.select_pattern("missing");
        ctl.cycle_pattern(&lib, true);
        assert_eq!(ctl.selected_pattern(), "glider");
    }

    #[test]
    fn test_leaving_edit_mode_releases_pointer() {
        let (mut ctl, mut grid, lib) = setup();
        ctl.set_edit_mode(true);
        ctl.pointer_pressed(None, &mut grid, &lib);
        assert!(ctl.is_pointer_down());
        ctl.set_edit_mode(false);
        assert!(!ctl.is_pointer_down());
    }
}
