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

/// Where the opening brace of a block goes when the block follows other text on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// `if (a)` / `{` on the next line. Closing braces always get their own line and `else`
    /// starts a fresh line.
    #[default]
    NextLine,
    /// `if (a) {` and `} else {`.
    SameLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    pub brace_style: BraceStyle,
    /// Whether to write the `// Imports`, `// Function prototypes` and
    /// `// Script-level variable definitions` banners ahead of each declaration block.
    pub section_banners: bool,
    /// Whether a bare `return;` closing a procedure body is left implicit.
    pub elide_trailing_return: bool,
}

impl Default for UnparseOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            brace_style: BraceStyle::NextLine,
            section_banners: true,
            elide_trailing_return: true,
        }
    }
}
