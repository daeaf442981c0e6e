// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Used to avoid serializing fields that hold their default value, such as an
/// unset `is_shorts` flag.
/// # Example
/// `#[serde(default, skip_serializing_if = "is_default")]`
pub fn is_default<T: Default + PartialEq>(x: &T) -> bool {
    x == &T::default()
}
