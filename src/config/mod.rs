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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::EntityId;

const CONFIG_NAME: &str = "waybook";

/// Home sub-directories offered for exports when none are configured.
const DEFAULT_EXPORT_SUBDIRS: [&str; 2] = ["Documents", "Downloads"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub version: u32,
    pub database_file: String,
    pub log_file: String,
    pub export_dirs: Vec<String>,
    pub initial_collection: Option<EntityId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "waybook.db".to_string(),
            log_file: "waybook.log".to_string(),
            export_dirs: vec![],
            initial_collection: None,
        }
    }
}

impl AppConfig {
    /// Candidate export directories, in order of preference. Candidates are
    /// not checked for existence here.
    pub fn export_candidates(&self) -> Vec<PathBuf> {
        if !self.export_dirs.is_empty() {
            return self.export_dirs.iter().map(PathBuf::from).collect();
        }

        match env::var_os("HOME") {
            Some(home) => home_candidates(PathBuf::from(home)),
            None => vec![],
        }
    }
}

fn home_candidates(home: PathBuf) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = DEFAULT_EXPORT_SUBDIRS.iter().map(|d| home.join(d)).collect();
    dirs.push(home);
    dirs
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
