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

//! Textual forms of literal values.

/// Power-of-two multiples of 16 are assumed to be bit flags or masks, and are written in hex so
/// they stay recognizable. This also catches some plain numbers (e.g. 256); that's accepted.
pub fn is_flag_like(value: u32) -> bool {
    value.is_power_of_two() && value & 0xF == 0
}

fn fits_in_byte(value: u32) -> bool {
    value & !0xFF == 0
}

/// Range check is signed: 0x8000 needs the full eight digits.
fn fits_in_short(value: u32) -> bool {
    i16::try_from(value as i32).is_ok()
}

/// `0x`-prefixed, uppercase, zero-padded to 2, 4 or 8 digits depending on the magnitude.
pub fn format_hex(value: u32) -> String {
    if fits_in_byte(value) {
        format!("0x{value:02X}")
    } else if fits_in_short(value) {
        format!("0x{value:04X}")
    } else {
        format!("0x{value:08X}")
    }
}

pub fn format_uint(value: u32) -> String {
    if is_flag_like(value) {
        format_hex(value)
    } else {
        value.to_string()
    }
}

/// Negative values are always decimal.
pub fn format_int(value: i32) -> String {
    match u32::try_from(value) {
        Ok(bits) if is_flag_like(bits) => format_hex(bits),
        _ => value.to_string(),
    }
}

pub fn format_float(value: f32) -> String {
    format!("{value}f")
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// The producer is responsible for escaping; content is written as-is.
pub fn format_string(content: &str) -> String {
    format!("\"{content}\"")
}
