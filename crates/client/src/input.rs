//! Line-based input processing for the terminal client.
//!
//! Owns the text-to-command mapping so the game loop never looks at raw
//! input.

use std::str::FromStr;

use delve_core::{Orientation, Position};

/// Compass direction typed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n")]
    North,
    #[strum(to_string = "east", serialize = "e")]
    East,
    #[strum(to_string = "south", serialize = "s")]
    South,
    #[strum(to_string = "west", serialize = "w")]
    West,
}

impl Direction {
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::North => Orientation::NORTH,
            Direction::East => Orientation::EAST,
            Direction::South => Orientation::SOUTH,
            Direction::West => Orientation::WEST,
        }
    }
}

/// High-level outcome of one input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    /// Walk to a cell along the cheapest route.
    GoTo(Position),
    Turn { clockwise: bool },
    Advance,
    /// Face a direction the short way round, then step once.
    Walk(Direction),
    Door { direction: Direction, open: bool },
    /// Redraw the map.
    Look,
    /// Drop every queued command.
    Stop,
    Save,
    Load,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Unknown command '{0}'; type 'help' for a list")]
    UnknownCommand(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a coordinate")]
    BadCoordinate(String),

    #[error("'{0}' is not a direction (n, e, s, w)")]
    BadDirection(String),

    #[error("'{0}' is not a turn (left, right)")]
    BadTurn(String),
}

pub const HELP: &str = "\
Commands:
  n | e | s | w          face that way and step once
  advance | a            step forward
  turn left|right        turn one step
  go X Y                 walk to a cell
  open DIR | close DIR   operate the adjacent door
  look                   redraw the map (also: empty line)
  stop                   drop queued commands
  save | load            write or read the snapshot file
  help | quit";

impl FromStr for InputCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(InputCommand::Look);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "go" | "goto" | "click" => {
                let x = coordinate(words.next(), "go")?;
                let y = coordinate(words.next(), "go")?;
                InputCommand::GoTo(Position::new(x, y))
            }
            "turn" | "t" => {
                let side = words.next().ok_or(InputError::MissingArgument {
                    command: "turn",
                    expected: "left or right",
                })?;
                let clockwise = match side.to_ascii_lowercase().as_str() {
                    "right" | "r" | "cw" => true,
                    "left" | "l" | "ccw" => false,
                    _ => return Err(InputError::BadTurn(side.to_string())),
                };
                InputCommand::Turn { clockwise }
            }
            "advance" | "a" | "forward" | "f" => InputCommand::Advance,
            "open" | "close" => {
                let open = head.eq_ignore_ascii_case("open");
                let name = if open { "open" } else { "close" };
                InputCommand::Door {
                    direction: direction(words.next(), name)?,
                    open,
                }
            }
            "look" | "map" | "l" => InputCommand::Look,
            "stop" | "interrupt" => InputCommand::Stop,
            "save" => InputCommand::Save,
            "load" => InputCommand::Load,
            "help" | "?" => InputCommand::Help,
            "quit" | "q" | "exit" => InputCommand::Quit,
            _ => match head.parse::<Direction>() {
                Ok(direction) => InputCommand::Walk(direction),
                Err(_) => return Err(InputError::UnknownCommand(head.to_string())),
            },
        };
        Ok(command)
    }
}

fn coordinate(word: Option<&str>, command: &'static str) -> Result<i32, InputError> {
    let word = word.ok_or(InputError::MissingArgument {
        command,
        expected: "X and Y",
    })?;
    word.parse()
        .map_err(|_| InputError::BadCoordinate(word.to_string()))
}

fn direction(word: Option<&str>, command: &'static str) -> Result<Direction, InputError> {
    let word = word.ok_or(InputError::MissingArgument {
        command,
        expected: "a direction",
    })?;
    word.parse()
        .map_err(|_| InputError::BadDirection(word.to_string()))
}
