// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier pattern is a valid regex")
});

const ESCAPE_DELIMITER: &str = "``";

pub fn is_valid_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

/// Names recovered from compiled scripts can be arbitrary strings; anything that isn't a plain
/// identifier is wrapped in double backticks and otherwise left alone.
pub fn format_identifier(text: &str) -> Cow<'_, str> {
    if is_valid_identifier(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{ESCAPE_DELIMITER}{text}{ESCAPE_DELIMITER}"))
    }
}
