// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::state::visible_ids;
use super::{has_new_videos, BoardState, BoardView, VideoFilter};
use crate::common::{AuthStore, Error, ScrapConfig};
use crate::log::DiagnosticLog;
use crate::notify::Notifier;
use crate::scraps::ScrapStore;
use crate::videos::{VideoId, VideoSearch, DEFAULT_MAX_RESULTS};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Search terms a new board starts from. The adapter's `DEFAULT_QUERY` only
/// applies to blank queries.
pub const DEFAULT_BOARD_QUERY: &str = "아영이네";
/// Alert shown after a notification went out.
pub const NOTIFY_SENT: &str = "New video notification sent.";
/// Alert shown when a notification could not be sent.
pub const NOTIFY_FAILED: &str = "Could not send the new video notification.";

/// Published to subscribers whenever the board changes.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    /// The board must be redrawn from this view.
    Changed(BoardView),
    /// A blocking message for the user.
    Alert(String),
}

/// Scrap board controller: searches, spots new videos, offers admins a
/// notify action and derives the list of IDs to display.
///
/// Operations take `&mut self`, so a board never runs two searches or two
/// notifications at once.
pub struct ScrapBoard {
    auth: AuthStore,
    events: broadcast::Sender<BoardEvent>,
    logger: DiagnosticLog,
    max_results: u32,
    mounted: bool,
    notifier: Arc<dyn Notifier + Send + Sync>,
    scraps: ScrapStore,
    state: BoardState,
    videos: Arc<dyn VideoSearch + Send + Sync>,
}

impl ScrapBoard {
    const EVENT_CAPACITY: usize = 64;

    /// Create a board with the default query and result count.
    pub fn new(
        videos: Arc<dyn VideoSearch + Send + Sync>,
        scraps: ScrapStore,
        auth: AuthStore,
        notifier: Arc<dyn Notifier + Send + Sync>,
        logger: DiagnosticLog,
    ) -> Self {
        let (events, _) = broadcast::channel(Self::EVENT_CAPACITY);
        Self {
            auth,
            events,
            logger,
            max_results: DEFAULT_MAX_RESULTS,
            mounted: false,
            notifier,
            scraps,
            state: BoardState {
                query: DEFAULT_BOARD_QUERY.to_string(),
                ..Default::default()
            },
            videos,
        }
    }

    /// Create a board, reading the initial query and result count from the
    /// optional `[board]` section.
    pub fn from_config(
        scrap_config: &ScrapConfig,
        videos: Arc<dyn VideoSearch + Send + Sync>,
        scraps: ScrapStore,
        auth: AuthStore,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct BoardConfig {
            max_results: Option<u32>,
            query: Option<String>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            board: BoardConfig,
        }
        let ConfigToml {
            board: BoardConfig { max_results, query },
        } = scrap_config.get()?;

        let mut board = Self::new(
            videos,
            scraps,
            auth,
            notifier,
            DiagnosticLog::new(scrap_config.debug()),
        );
        if let Some(max_results) = max_results {
            board.max_results = max_results;
        }
        if let Some(query) = query {
            board.state.query = query;
        }
        Ok(board)
    }

    /// Diagnostic log of this board.
    pub fn logger(&self) -> &DiagnosticLog {
        &self.logger
    }

    /// The shared scrap store.
    pub fn scraps(&self) -> &ScrapStore {
        &self.scraps
    }

    /// Current state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Receive a `BoardEvent` for every change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Initial load: one search, then hydrate persisted scraps. Later calls do nothing.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.search().await;
        self.scraps.load_persisted().await;
        self.publish();
    }

    /// Replace the search terms. Takes effect on the next `search`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.publish();
    }

    /// Search with the current query. On success the result becomes the new diff
    /// baseline and the scrap list, and the notify action is offered to admins
    /// if any video is new. On failure the error is logged and state is kept.
    /// `loading` is cleared either way.
    pub async fn search(&mut self) {
        self.state.loading = true;
        self.publish();

        let query = self.state.query.clone();
        let result = self.videos.search(&query, self.max_results).await;
        if let Ok(videos) = self.logger.call(format!("search {query:?}"), result) {
            let is_new_videos = has_new_videos(&self.state.last_search_result, &videos);
            self.state.show_notify_button = is_new_videos && self.auth.is_admin();
            self.scraps.set_scraps(videos.clone());
            self.state.last_search_result = videos;
        }

        self.state.loading = false;
        self.publish();
    }

    /// Announce the newest video of the last search. Does nothing unless the
    /// notify action is offered, idle, and there is a video to announce.
    pub async fn send_notification(&mut self) {
        let Some(latest) = self.state.last_search_result.first().cloned() else {
            return;
        };
        if !self.state.show_notify_button || self.state.notifying {
            return;
        }
        self.state.notifying = true;
        self.publish();

        let user_id = self.auth.user_id();
        let result = self
            .notifier
            .send_new_video(&latest, user_id.as_ref())
            .await;
        match self.logger.call(format!("notify {}", latest.id), result) {
            Ok(()) => {
                self.state.show_notify_button = false;
                self.alert(NOTIFY_SENT);
            }
            Err(_) => self.alert(NOTIFY_FAILED),
        }

        self.state.notifying = false;
        self.publish();
    }

    /// Change the short-form filter.
    pub fn set_filter(&mut self, filter: VideoFilter) {
        self.state.filter = filter;
        self.publish();
    }

    /// Switch between all videos and scrapped videos only.
    pub fn toggle_scrapped_only(&mut self) {
        self.state.show_scrapped_only = !self.state.show_scrapped_only;
        self.publish();
    }

    /// IDs the list renderer should show, in scrap list order.
    pub fn visible_ids(&self) -> Vec<VideoId> {
        visible_ids(
            &self.scraps.scraps(),
            self.state.filter,
            self.state.show_scrapped_only,
            &self.scraps.scrapped_ids(),
        )
    }

    /// Snapshot of what to draw.
    pub fn view(&self) -> BoardView {
        let loading = self.state.loading;
        BoardView {
            query: self.state.query.clone(),
            loading,
            show_scrapped_only: self.state.show_scrapped_only,
            show_notify_button: self.state.show_notify_button,
            notifying: self.state.notifying,
            no_results: !loading && self.scraps.scraps().is_empty(),
            filter_ids: (!loading).then(|| self.visible_ids()),
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.events.send(BoardEvent::Alert(message.to_string()));
    }

    fn publish(&self) {
        // No subscribers is fine.
        let _ = self.events.send(BoardEvent::Changed(self.view()));
    }
}
