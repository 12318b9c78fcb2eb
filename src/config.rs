use std::str::FromStr;
use std::time::Duration;

use crate::topology::Wrap;

/// Default grid dimensions.
const DEFAULT_ROWS: usize = 300;
const DEFAULT_COLS: usize = 300;

/// Side length of one cell in world pixels.
const DEFAULT_CELL_SIZE: f32 = 25.0;

/// Chance that a cell starts alive.
const DEFAULT_DENSITY: f64 = 0.1;

/// Period of the simulation tick.
const DEFAULT_TICK_MS: u64 = 200;

/// Configuration for the grid and the host loop.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Cell size in world pixels.
    pub cell_size: f32,
    /// Initial random fill density.
    pub density: f64,
    /// Time between generations while the simulation runs.
    pub tick_interval: Duration,
    /// Initial wrap policy.
    pub wrap: Wrap,
    /// Seed for the initial fill; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Grid line width in world pixels.
    pub line_width: f32,
    /// Initial window size in physical pixels.
    pub window_size: (u32, u32),
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_size: DEFAULT_CELL_SIZE,
            density: DEFAULT_DENSITY,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            wrap: Wrap::Bounded,
            seed: None,
            line_width: 1.5,
            window_size: (1024, 768),
        }
    }
}

impl LifeConfig {
    /// Defaults overridden by `LIFE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name. Values that fail to parse
    /// or are out of range are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(rows) = parse_var(&lookup, "LIFE_ROWS", |&v: &usize| v > 0) {
            self.rows = rows;
        }
        if let Some(cols) = parse_var(&lookup, "LIFE_COLS", |&v: &usize| v > 0) {
            self.cols = cols;
        }
        if let Some(density) =
            parse_var(&lookup, "LIFE_DENSITY", |v: &f64| (0.0..=1.0).contains(v))
        {
            self.density = density;
        }
        if let Some(ms) = parse_var(&lookup, "LIFE_TICK_MS", |&v: &u64| v > 0) {
            self.tick_interval = Duration::from_millis(ms);
        }
        if let Some(seed) = parse_var(&lookup, "LIFE_SEED", |_: &u64| true) {
            self.seed = Some(seed);
        }
        if let Some(wrap) = lookup("LIFE_WRAP") {
            match wrap.trim().to_ascii_lowercase().as_str() {
                "toroidal" | "torus" | "wrap" => self.wrap = Wrap::Toroidal,
                "bounded" | "none" => self.wrap = Wrap::Bounded,
                other => log::warn!("Ignoring LIFE_WRAP={other:?} (expected toroidal or bounded)"),
            }
        }
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) if valid(&value) => Some(value),
        Ok(_) => {
            log::warn!("Ignoring {key}={raw:?}: out of range");
            None
        }
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LifeConfig::default();
        assert_eq!(config.rows, 300);
        assert_eq!(config.cols, 300);
        assert_eq!(config.tick_interval, Duration::from_millis(200));
        assert_eq!(config.wrap, Wrap::Bounded);
        assert!((config.density - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = LifeConfig::default().with_overrides(lookup(&[
            ("LIFE_ROWS", "40"),
            ("LIFE_COLS", " 60 "),
            ("LIFE_DENSITY", "0.3"),
            ("LIFE_TICK_MS", "50"),
            ("LIFE_WRAP", "Toroidal"),
            ("LIFE_SEED", "7"),
        ]));
        assert_eq!(config.rows, 40);
        assert_eq!(config.cols, 60);
        assert!((config.density - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.wrap, Wrap::Toroidal);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let rows = lookup(&[("LIFE_ROWS", "0")]);
        assert_eq!(parse_var(&rows, "LIFE_ROWS", |&v: &usize| v > 0), None);
        assert_eq!(
            parse_var(&lookup(&[("LIFE_DENSITY", "1.5")]), "LIFE_DENSITY", |v: &f64| {
                (0.0..=1.0).contains(v)
            }),
            None
        );
        let tick = lookup(&[("LIFE_TICK_MS", "25")]);
        assert_eq!(parse_var(&tick, "LIFE_TICK_MS", |&v: &u64| v > 0), Some(25));
        assert_eq!(parse_var(&lookup(&[]), "LIFE_TICK_MS", |_: &u64| true), None);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = LifeConfig::default().with_overrides(lookup(&[
            ("LIFE_ROWS", "0"),
            ("LIFE_COLS", "many"),
            ("LIFE_DENSITY", "1.5"),
            ("LIFE_TICK_MS", "0"),
            ("LIFE_WRAP", "sideways"),
        ]));
        assert_eq!(config, LifeConfig::default());
    }
}
