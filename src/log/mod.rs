// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Thread-safe logging.
mod diagnostic_log;

pub use self::diagnostic_log::DiagnosticLog;
