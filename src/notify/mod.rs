// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Notification over HTTP.
mod http_notifier;
/// Notifier trait.
mod notifier;

pub use self::http_notifier::HttpNotifier;
pub use self::notifier::{NewVideoNotification, Notifier};
