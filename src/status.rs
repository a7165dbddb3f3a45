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

//! Status line state.
//!
//! Keeps the last information or error message for the footer. A new message
//! replaces the previous one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Info,
    Error,
}

#[derive(Debug, Default)]
pub(crate) struct StatusLine {
    message: Option<(Severity, String)>,
}

impl StatusLine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn info(&mut self, message: String) {
        self.message = Some((Severity::Info, message));
    }

    pub(crate) fn error(&mut self, message: String) {
        self.message = Some((Severity::Error, message));
    }

    pub(crate) fn message(&self) -> Option<(Severity, &str)> {
        self.message
            .as_ref()
            .map(|(severity, text)| (*severity, text.as_str()))
    }
}
