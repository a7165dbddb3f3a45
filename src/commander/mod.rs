// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Command line.
//!
//! `:` opens a one-line input at the bottom of the screen. On `Enter` the line
//! is parsed into a [`Command`] and posted to the event loop, which applies
//! it to the collection model. Parse failures are posted as errors instead.

use std::{path::PathBuf, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, model::EntityId};

/// Minimum number of points accepted for a new track.
const MIN_TRACK_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Open(EntityId),
    NewCollection(String),
    NewWaypoint {
        latitude: f64,
        longitude: f64,
        name: String,
    },
    NewTrack {
        name: String,
        points: Vec<(f64, f64)>,
    },
    Rename(String),
    Describe(String),
    Move(EntityId),
    Remove,
    Export {
        file: Option<String>,
        directory: Option<PathBuf>,
    },
    Directories,
    Reload,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("A track needs at least {} points", MIN_TRACK_POINTS)]
    TooFewPoints,

    #[error("No row selected")]
    NoSelection,
}

/// Parses one command line. Returns `Ok(None)` for a blank line.
pub(crate) fn parse_command(buffer: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        [] => return Ok(None),

        ["q" | "quit"] => Command::Quit,
        ["reload"] => Command::Reload,
        ["dirs"] => Command::Directories,
        ["rm"] => Command::Remove,

        ["open"] => return Err(CommandError::MissingArgument("collection id")),
        ["open", id] => Command::Open(parse_id(id)?),

        ["mv"] => return Err(CommandError::MissingArgument("collection id")),
        ["mv", id] => Command::Move(parse_id(id)?),

        ["newcol", name @ ..] => Command::NewCollection(join_required(name, "collection name")?),

        ["name", name @ ..] => Command::Rename(join_required(name, "name")?),
        ["desc", text @ ..] => Command::Describe(text.join(" ")),

        ["wpt", lat, lon, name @ ..] => Command::NewWaypoint {
            latitude: parse_coordinate(lat, "latitude", 90.0)?,
            longitude: parse_coordinate(lon, "longitude", 180.0)?,
            name: join_required(name, "waypoint name")?,
        },
        ["wpt", ..] => return Err(CommandError::MissingArgument("latitude and longitude")),

        ["trk", args @ ..] => parse_track(args)?,

        ["export"] => Command::Export {
            file: None,
            directory: None,
        },
        ["export", file] => Command::Export {
            file: Some(file.to_string()),
            directory: None,
        },
        // The directory takes the rest of the line, so it may contain spaces.
        ["export", file, dir @ ..] => Command::Export {
            file: Some(file.to_string()),
            directory: Some(PathBuf::from(dir.join(" "))),
        },

        ["q" | "quit" | "reload" | "dirs" | "rm", extra, ..]
        | ["open" | "mv", _, extra, ..] => {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        [cmd, ..] => return Err(CommandError::Unknown(cmd.to_string())),
    };

    Ok(Some(command))
}

fn parse_id(value: &str) -> Result<EntityId, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        name: "id",
        value: value.to_string(),
    })
}

fn parse_coordinate(value: &str, name: &'static str, limit: f64) -> Result<f64, CommandError> {
    let invalid = || CommandError::InvalidArgument {
        name,
        value: value.to_string(),
    };

    let parsed: f64 = value.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(invalid());
    }

    Ok(parsed)
}

fn join_required(parts: &[&str], name: &'static str) -> Result<String, CommandError> {
    if parts.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(parts.join(" "))
    }
}

/// `trk <lat,lon> <lat,lon>... <name...>`
fn parse_track(args: &[&str]) -> Result<Command, CommandError> {
    let split = args.iter().position(|a| !a.contains(',')).unwrap_or(args.len());
    let (coordinates, name) = args.split_at(split);

    let points = coordinates
        .iter()
        .map(|pair| {
            let (lat, lon) = pair.split_once(',').ok_or(CommandError::InvalidArgument {
                name: "point",
                value: pair.to_string(),
            })?;
            Ok((
                parse_coordinate(lat, "latitude", 90.0)?,
                parse_coordinate(lon, "longitude", 180.0)?,
            ))
        })
        .collect::<Result<Vec<_>, CommandError>>()?;

    if points.len() < MIN_TRACK_POINTS {
        return Err(CommandError::TooFewPoints);
    }

    Ok(Command::NewTrack {
        name: join_required(name, "track name")?,
        points,
    })
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Opens the command line with `text` already typed.
    pub(crate) fn prefill(&mut self, text: &str) {
        self.input = Input::new(text.to_string());
        self.active = true;
    }

    /// Handles a terminal event, returning `true` if the commander consumed
    /// it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                match parse_command(self.input.value()) {
                    Ok(Some(command)) => event_tx.send(AppEvent::Command(command))?,
                    Ok(None) => {}
                    Err(e) => event_tx.send(AppEvent::Error(e.to_string()))?,
                }
                self.active = false;
                self.input.reset();
            }

            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("rm"), Ok(Some(Command::Remove)));
        assert_eq!(parse_command("open 12"), Ok(Some(Command::Open(12))));
        assert_eq!(parse_command("mv 3"), Ok(Some(Command::Move(3))));
        assert_eq!(parse_command("dirs"), Ok(Some(Command::Directories)));
    }

    #[test]
    fn joins_free_text_arguments() {
        assert_eq!(
            parse_command("name  Old   mill "),
            Ok(Some(Command::Rename("Old mill".into())))
        );
        assert_eq!(parse_command("desc"), Ok(Some(Command::Describe(String::new()))));
        assert_eq!(
            parse_command("newcol Summer 2024"),
            Ok(Some(Command::NewCollection("Summer 2024".into())))
        );
    }

    #[test]
    fn parses_waypoints() {
        assert_eq!(
            parse_command("wpt 50.0875 -14.4212 Charles Bridge"),
            Ok(Some(Command::NewWaypoint {
                latitude: 50.0875,
                longitude: -14.4212,
                name: "Charles Bridge".into(),
            }))
        );
        assert_eq!(
            parse_command("wpt 91 10 Nowhere"),
            Err(CommandError::InvalidArgument {
                name: "latitude",
                value: "91".into()
            })
        );
        assert_eq!(
            parse_command("wpt 50"),
            Err(CommandError::MissingArgument("latitude and longitude"))
        );
        assert_eq!(
            parse_command("wpt 50 14"),
            Err(CommandError::MissingArgument("waypoint name"))
        );
    }

    #[test]
    fn parses_tracks() {
        assert_eq!(
            parse_command("trk 1,2 3.5,4 Short loop"),
            Ok(Some(Command::NewTrack {
                name: "Short loop".into(),
                points: vec![(1.0, 2.0), (3.5, 4.0)],
            }))
        );
        assert_eq!(parse_command("trk 1,2 Lonely"), Err(CommandError::TooFewPoints));
        assert_eq!(
            parse_command("trk 1,2 3,x Bad"),
            Err(CommandError::InvalidArgument {
                name: "longitude",
                value: "x".into()
            })
        );
    }

    #[test]
    fn parses_export_variants() {
        assert_eq!(
            parse_command("export"),
            Ok(Some(Command::Export {
                file: None,
                directory: None
            }))
        );
        assert_eq!(
            parse_command("export a.gpx /tmp"),
            Ok(Some(Command::Export {
                file: Some("a.gpx".into()),
                directory: Some(PathBuf::from("/tmp")),
            }))
        );
    }

    #[test]
    fn export_directory_takes_the_rest_of_the_line() {
        assert_eq!(
            parse_command("export trips.gpx /home/ada/My GPS"),
            Ok(Some(Command::Export {
                file: Some("trips.gpx".into()),
                directory: Some(PathBuf::from("/home/ada/My GPS")),
            }))
        );
    }

    #[test]
    fn extra_arguments_are_named() {
        assert_eq!(
            parse_command("rm 4"),
            Err(CommandError::UnexpectedArgument("4".into()))
        );
        assert_eq!(
            parse_command("open 1 2"),
            Err(CommandError::UnexpectedArgument("2".into()))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("fly"), Err(CommandError::Unknown("fly".into())));
        assert_eq!(
            parse_command("open"),
            Err(CommandError::MissingArgument("collection id"))
        );
        assert_eq!(
            parse_command("open x1"),
            Err(CommandError::InvalidArgument {
                name: "id",
                value: "x1".into()
            })
        );
    }

    #[test]
    fn enter_posts_the_parsed_command() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('x')), &event_tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &event_tx).unwrap());
        assert!(commander.active());
        for c in "open 5".chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &event_tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), &event_tx).unwrap();

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::Command(Command::Open(5)))
        ));
    }

    #[test]
    fn parse_errors_are_posted_as_errors() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.prefill("open nine");
        commander.handle_event(&key(KeyCode::Enter), &event_tx).unwrap();

        match event_rx.try_recv() {
            Ok(AppEvent::Error(message)) => assert_eq!(message, "Invalid id: nine"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn escape_discards_the_line() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.prefill("rm");
        commander.handle_event(&key(KeyCode::Esc), &event_tx).unwrap();

        assert!(!commander.active());
        assert!(event_rx.try_recv().is_err());
    }
}
