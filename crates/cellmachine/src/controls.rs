//! Keyboard-style commands replayed against a running simulation
//!
//! Keys follow the interactive viewer bindings:
//!
//! | Key       | Command                           |
//! |-----------|-----------------------------------|
//! | space     | pause / resume                    |
//! | `r`       | reset (re-seed)                   |
//! | `c`       | clear                             |
//! | `+` / `-` | grow / shrink brush               |
//! | `1`-`7`   | select brush material             |
//! | Esc       | quit                              |

use cellmachine_core::world::{CellRng, RunState};
use rand_xoshiro::Xoshiro256StarStar;
use thiserror::Error;

use crate::prelude::*;

pub const ESCAPE: char = '\u{1b}';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown key {0:?}")]
    UnknownKey(char),
    #[error("invalid paint position `{0}` (expected x,y)")]
    InvalidPaint(String),
}

/// One user action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reset,
    Clear,
    GrowBrush,
    ShrinkBrush,
    SelectMaterial(Material),
    /// Paint with the current brush at grid coordinates
    Paint { x: i32, y: i32 },
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            ' ' => Some(Command::TogglePause),
            'r' => Some(Command::Reset),
            'c' => Some(Command::Clear),
            '+' | '=' => Some(Command::GrowBrush),
            '-' => Some(Command::ShrinkBrush),
            ESCAPE => Some(Command::Quit),
            _ => Material::from_hotkey(key).map(Command::SelectMaterial),
        }
    }
}

/// Parse a key sequence such as `"3++ "` into commands. `\e` spells Esc.
pub fn parse_keys(keys: &str) -> Result<Vec<Command>, CommandError> {
    keys.replace("\\e", &ESCAPE.to_string())
        .chars()
        .map(|key| Command::from_key(key).ok_or(CommandError::UnknownKey(key)))
        .collect()
}

/// Parse `"x,y"` into a paint command
pub fn parse_paint(text: &str) -> Result<Command, CommandError> {
    let invalid = || CommandError::InvalidPaint(text.to_string());
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Command::Paint { x, y })
}

/// Falling-sand engine plus the brush the user paints with
pub struct Session<R: CellRng = Xoshiro256StarStar> {
    pub automaton: Automaton<R>,
    pub brush: Brush,
    quit: bool,
}

impl<R: CellRng> Session<R> {
    pub fn new(automaton: Automaton<R>, brush: Brush) -> Self {
        Self {
            automaton,
            brush,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                let state = self.automaton.toggle_pause();
                log::info!("Simulation {}", state_label(state));
            }
            Command::Reset => self.automaton.reset(),
            Command::Clear => self.automaton.clear(),
            Command::GrowBrush => {
                let before = self.brush.radius;
                self.brush.grow();
                if self.brush.radius == before {
                    log::warn!("Brush radius already at maximum ({})", before);
                }
            }
            Command::ShrinkBrush => {
                let before = self.brush.radius;
                self.brush.shrink();
                if self.brush.radius == before {
                    log::warn!("Brush radius already at minimum ({})", before);
                }
            }
            Command::SelectMaterial(material) => {
                self.brush.set_material(material);
                log::debug!("Brush material: {}", material);
            }
            Command::Paint { x, y } => {
                if self.automaton.paint_with(&self.brush, x, y) == 0 {
                    log::warn!("Paint at ({}, {}) missed the grid", x, y);
                }
            }
            Command::Quit => self.quit = true,
        }
    }

    /// Apply commands in order, stopping after Quit
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
            if self.quit {
                break;
            }
        }
    }
}

/// Game of Life grid plus the RNG used to re-randomize it
pub struct LifeSession<R: CellRng = Xoshiro256StarStar> {
    pub life: LifeGrid,
    rng: R,
    density: f32,
    quit: bool,
}

impl<R: CellRng> LifeSession<R> {
    pub fn new(life: LifeGrid, rng: R, density: f32) -> Self {
        Self {
            life,
            rng,
            density,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn randomize(&mut self) {
        self.life.randomize(&mut self.rng, self.density);
    }

    /// Life has no brush; paint toggles a single cell
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                let state = self.life.toggle_pause();
                log::info!("Life {}", state_label(state));
            }
            Command::Reset => self.randomize(),
            Command::Clear => self.life.clear(),
            Command::Paint { x, y } => {
                if self.life.toggle(x, y).is_none() {
                    log::warn!("Toggle at ({}, {}) missed the grid", x, y);
                }
            }
            Command::GrowBrush | Command::ShrinkBrush | Command::SelectMaterial(_) => {
                log::warn!("{:?} has no effect in Life mode", command);
            }
            Command::Quit => self.quit = true,
        }
    }

    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
            if self.quit {
                break;
            }
        }
    }
}

fn state_label(state: RunState) -> &'static str {
    match state {
        RunState::Running => "resumed",
        RunState::Paused => "paused",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session() -> Session {
        Session::new(Automaton::with_seed(20, 20, 3).unwrap(), Brush::default())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key(' '), Some(Command::TogglePause));
        assert_eq!(Command::from_key('r'), Some(Command::Reset));
        assert_eq!(Command::from_key('c'), Some(Command::Clear));
        assert_eq!(Command::from_key('+'), Some(Command::GrowBrush));
        assert_eq!(Command::from_key('-'), Some(Command::ShrinkBrush));
        assert_eq!(Command::from_key(ESCAPE), Some(Command::Quit));
        assert_eq!(
            Command::from_key('1'),
            Some(Command::SelectMaterial(Material::Empty))
        );
        assert_eq!(
            Command::from_key('6'),
            Some(Command::SelectMaterial(Material::Lava))
        );
        assert_eq!(Command::from_key('8'), None);
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_keys("3+ \\e").unwrap(),
            vec![
                Command::SelectMaterial(Material::Water),
                Command::GrowBrush,
                Command::TogglePause,
                Command::Quit,
            ]
        );
        assert_eq!(parse_keys("").unwrap(), vec![]);
        assert_eq!(parse_keys("rq"), Err(CommandError::UnknownKey('q')));
    }

    #[test]
    fn test_parse_paint() {
        assert_eq!(parse_paint("10,20"), Ok(Command::Paint { x: 10, y: 20 }));
        assert_eq!(parse_paint(" -3 , 4 "), Ok(Command::Paint { x: -3, y: 4 }));
        assert!(parse_paint("10").is_err());
        assert!(parse_paint("a,b").is_err());
    }

    #[test]
    fn test_session_brush_commands() {
        let mut session = session();
        session.apply_all(parse_keys("5++++++++++").unwrap());
        assert_eq!(session.brush.material, Material::Fire);
        assert_eq!(session.brush.radius, 10);

        session.apply_all(parse_keys("-----------------").unwrap());
        assert_eq!(session.brush.radius, 1);
    }

    #[test]
    fn test_session_paint_uses_brush() {
        let mut session = session();
        session.apply(Command::SelectMaterial(Material::Stone));
        session.apply(Command::ShrinkBrush);
        session.apply(Command::ShrinkBrush);
        session.apply(Command::Paint { x: 10, y: 10 });

        // Radius 1 disc: center plus four neighbors
        assert_eq!(session.automaton.grid().count(Material::Stone), 5);

        session.apply(Command::Clear);
        assert_eq!(session.automaton.grid().count_non_empty(), 0);
    }

    #[test]
    fn test_session_pause_and_quit() {
        let mut session = session();
        session.apply_all(parse_keys(" \\e ").unwrap());

        // The trailing space after Esc is never applied
        assert!(session.automaton.is_paused());
        assert!(session.should_quit());
    }

    #[test]
    fn test_life_session_commands() {
        let life = LifeGrid::new(10, 10).unwrap();
        let rng = Xoshiro256StarStar::seed_from_u64(4);
        let mut session = LifeSession::new(life, rng, 1.0);

        session.apply(Command::Reset);
        assert_eq!(session.life.population(), 100);

        session.apply(Command::Clear);
        session.apply(Command::Paint { x: 2, y: 3 });
        assert!(session.life.is_alive(2, 3));
        session.apply(Command::Paint { x: 2, y: 3 });
        assert!(!session.life.is_alive(2, 3));

        session.apply(Command::TogglePause);
        assert!(session.life.is_paused());
    }
}
