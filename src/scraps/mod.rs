// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Persistence trait and in-memory persistence.
mod persistence;
/// Shared scrap list and scrapped IDs.
mod scrap_store;
/// Support for Supabase (PostgREST).
mod supabase;
/// Unit tests
mod tests;

pub use self::persistence::{MemoryScraps, ScrapPersistence};
pub use self::scrap_store::ScrapStore;
pub use self::supabase::SupabaseScraps;
