/// A named rectangular 0/1 matrix. A `1` marks a cell the pattern sets alive;
/// a `0` marks "no cell", not a dead one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    cells: Vec<Vec<u8>>,
}

impl Pattern {
    /// Build a pattern from matrix rows.
    ///
    /// Panics if the matrix is empty, ragged, or holds values other than 0/1.
    pub fn new(name: impl Into<String>, cells: Vec<Vec<u8>>) -> Self {
        let name = name.into();
        assert!(
            !cells.is_empty() && !cells[0].is_empty(),
            "pattern {name} must be at least 1x1"
        );
        let width = cells[0].len();
        assert!(
            cells.iter().all(|row| row.len() == width),
            "pattern {name} rows must have equal length"
        );
        assert!(
            cells.iter().flatten().all(|&v| v <= 1),
            "pattern {name} must only contain 0 and 1"
        );
        Self { name, cells }
    }

    /// Build a pattern from a text picture: `O`, `*` or `1` are alive, anything
    /// else is empty.
    pub fn from_picture(name: impl Into<String>, picture: &[&str]) -> Self {
        let cells = picture
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| u8::from(matches!(c, 'O' | '*' | '1')))
                    .collect()
            })
            .collect();
        Self::new(name, cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn matrix(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Number of `1` entries.
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 1).count()
    }
}

/// An ordered, name-addressable collection of patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in set of classic Life patterns.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert(Pattern::from_picture("glider", &[".O.", "..O", "OOO"]));
        library.insert(Pattern::from_picture("blinker", &["OOO"]));
        library.insert(Pattern::from_picture("block", &["OO", "OO"]));
        library.insert(Pattern::from_picture("toad", &[".OOO", "OOO."]));
        library.insert(Pattern::from_picture("beacon", &["OO..", "OO..", "..OO", "..OO"]));
        library.insert(Pattern::from_picture(
            "lwss",
            &[".O..O", "O....", "O...O", "OOOO."],
        ));
        library.insert(Pattern::from_picture("r-pentomino", &[".OO", "OO.", ".O."]));
        library.insert(Pattern::from_picture(
            "acorn",
            &[".O.....", "...O...", "OO..OOO"],
        ));
        library.insert(Pattern::from_picture(
            "pulsar",
            &[
                "..OOO...OOO..",
                ".............",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                "..OOO...OOO..",
                ".............",
                "..OOO...OOO..",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                ".............",
                "..OOO...OOO..",
            ],
        ));
        library.insert(Pattern::from_picture(
            "gosper-glider-gun",
            &[
                "........................O...........",
                "......................O.O...........",
                "............OO......OO............OO",
                "...........O...O....OO............OO",
                "OO........O.....O...OO..............",
                "OO........O...O.OO....O.O...........",
                "..........O.....O.......O...........",
                "...........O...O....................",
                "............OO......................",
            ],
        ));
        library
    }

    /// Add a pattern, replacing any existing pattern with the same name.
    pub fn insert(&mut self, pattern: Pattern) {
        match self.patterns.iter_mut().find(|p| p.name == pattern.name) {
            Some(existing) => *existing = pattern,
            None => self.patterns.push(pattern),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.name == name)
    }

    pub fn by_index(&self, idx: usize) -> Option<&Pattern> {
        self.patterns.get(idx)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
