//! Hub session: the coordinating owner of everything the user sees.
//!
//! Workers (one scanner, a small icon pool) never touch session state.
//! They post [`HubEvent`]s, and the task that owns the [`GameHub`] applies
//! them with [`GameHub::apply`]. The icon cache is the only structure
//! shared with workers.

use std::path::Path;
use std::sync::Arc;

use gamehub_hub_settings::{Notice, NoticeQueue};
use gamehub_icons::{IconCache, IconLoader, IconRequest, IconResolved, IconResolver};
use gamehub_library::{EntryRef, GameRecord};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::error::GamesError;
use crate::presenter::{GamePresenter, Glyph, IconState};
use crate::runtime::{GameRuntime, LaunchTarget};
use crate::scan_worker::{self, ScanFinished};

const NO_FOLDER_NOTICE: &str = "No folder selected";
const FOLDER_INACCESSIBLE_NOTICE: &str = "Folder not accessible. Try selecting a different folder.";
const GAME_NOT_FOUND_NOTICE: &str = "Game file not found";

/// Worker output delivered to the session.
#[derive(Debug)]
pub enum HubEvent {
    Scan(ScanFinished),
    Icon(IconResolved),
}

impl From<ScanFinished> for HubEvent {
    fn from(done: ScanFinished) -> Self {
        Self::Scan(done)
    }
}

impl From<IconResolved> for HubEvent {
    fn from(done: IconResolved) -> Self {
        Self::Icon(done)
    }
}

/// What changed after applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubUpdate {
    /// A scan replaced the game list.
    GamesChanged { count: usize },
    /// The folder could not be read; the list is now empty.
    ScanFailed,
    /// A scan of a folder that is no longer selected finished; ignored.
    StaleScan,
    /// A background icon request finished.
    IconReady { entry: EntryRef, found: bool },
}

/// Tunables for the session's workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub icon_workers: usize,
    pub max_icon_size: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            icon_workers: gamehub_icons::DEFAULT_WORKERS,
            max_icon_size: gamehub_icons::DEFAULT_MAX_DIMENSION,
        }
    }
}

/// State behind the games screen.
pub struct GameHub {
    folder: Option<EntryRef>,
    presenter: GamePresenter,
    notices: NoticeQueue,
    icons: IconLoader<HubEvent>,
    scan_tx: mpsc::Sender<EntryRef>,
    events_rx: mpsc::Receiver<HubEvent>,
    runtime: Arc<dyn GameRuntime>,
    pending_scans: usize,
    /// A scan was asked for while the request queue was full.
    deferred_scan: bool,
    pending_icons: usize,
}

impl GameHub {
    /// Creates a session with a fresh icon cache.
    ///
    /// Must be called from within a tokio runtime (the scan worker is
    /// spawned immediately).
    pub fn new(runtime: Arc<dyn GameRuntime>, options: SessionOptions) -> Self {
        Self::with_cache(runtime, options, Arc::new(IconCache::new()))
    }

    /// Creates a session sharing an existing icon cache.
    pub fn with_cache(
        runtime: Arc<dyn GameRuntime>,
        options: SessionOptions,
        cache: Arc<IconCache>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        let resolver = Arc::new(IconResolver::new(options.max_icon_size));
        let icons = IconLoader::new(cache, resolver, options.icon_workers, events_tx.clone());
        let scan_tx = scan_worker::spawn(events_tx);

        Self {
            folder: None,
            presenter: GamePresenter::new(),
            notices: NoticeQueue::new(),
            icons,
            scan_tx,
            events_rx,
            runtime,
            pending_scans: 0,
            deferred_scan: false,
            pending_icons: 0,
        }
    }

    pub fn folder(&self) -> Option<&EntryRef> {
        self.folder.as_ref()
    }

    /// Switches folders. Results of scans for the old folder are dropped.
    pub fn set_folder(&mut self, folder: Option<EntryRef>) {
        if self.folder != folder {
            self.presenter.clear();
        }
        self.folder = folder;
    }

    pub fn presenter(&self) -> &GamePresenter {
        &self.presenter
    }

    pub fn games(&self) -> &[GameRecord] {
        self.presenter.all()
    }

    pub fn visible(&self) -> &[GameRecord] {
        self.presenter.visible()
    }

    pub fn filter(&mut self, query: &str) -> &[GameRecord] {
        self.presenter.filter(query)
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn icon_cache(&self) -> &Arc<IconCache> {
        self.icons.cache()
    }

    pub fn icon_resolver(&self) -> &Arc<IconResolver> {
        self.icons.resolver()
    }

    /// True when no scan or icon request is outstanding.
    pub fn is_idle(&self) -> bool {
        self.pending_scans == 0 && self.pending_icons == 0 && !self.deferred_scan
    }

    /// Queues a scan of the current folder without waiting.
    ///
    /// Returns `false` (and posts a notice) when no folder is selected. If
    /// the queue is full the scan is sent once an earlier one finishes.
    pub fn request_scan(&mut self) -> bool {
        let Some(folder) = self.folder.clone() else {
            self.notices.warning(NO_FOLDER_NOTICE);
            return false;
        };

        match self.scan_tx.try_send(folder) {
            Ok(()) => {
                self.pending_scans += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                debug!("scan queue full, deferring request");
                self.deferred_scan = true;
                true
            }
            Err(TrySendError::Closed(_)) => {
                warn!("scan worker is gone");
                false
            }
        }
    }

    /// Waits for the next worker event.
    pub async fn next_event(&mut self) -> Option<HubEvent> {
        self.events_rx.recv().await
    }

    /// Applies a worker event to session state.
    pub fn apply(&mut self, event: HubEvent) -> HubUpdate {
        match event {
            HubEvent::Scan(done) => {
                self.pending_scans = self.pending_scans.saturating_sub(1);
                let update = self.apply_scan(done);
                if self.deferred_scan {
                    self.deferred_scan = false;
                    if self.folder.is_some() {
                        self.request_scan();
                    }
                }
                update
            }
            HubEvent::Icon(done) => {
                self.pending_icons = self.pending_icons.saturating_sub(1);
                HubUpdate::IconReady {
                    found: done.icon.is_some(),
                    entry: done.entry,
                }
            }
        }
    }

    fn apply_scan(&mut self, done: ScanFinished) -> HubUpdate {
        if self.folder.as_ref() != Some(&done.folder) {
            debug!(folder = %done.folder, "dropping scan of previous folder");
            return HubUpdate::StaleScan;
        }

        match done.outcome {
            Ok(games) => {
                let count = games.len();
                info!(folder = %done.folder, count, "games scanned");
                self.presenter.set_games(games);
                match count {
                    0 => {}
                    1 => {
                        self.notices.info("1 game found");
                    }
                    n => {
                        self.notices.info(format!("{n} games found"));
                    }
                }
                HubUpdate::GamesChanged { count }
            }
            Err(e) => {
                warn!(error = %e, "scan failed");
                self.presenter.clear();
                self.notices.error(FOLDER_INACCESSIBLE_NOTICE);
                HubUpdate::ScanFailed
            }
        }
    }

    /// Applies events until no scan or icon request is outstanding.
    pub async fn run_until_idle(&mut self) -> Vec<HubUpdate> {
        let mut updates = Vec::new();
        while !self.is_idle() {
            let Some(event) = self.next_event().await else {
                break;
            };
            updates.push(self.apply(event));
        }
        updates
    }

    /// Cached icon, or a placeholder while the icon loads in the background.
    pub fn request_icon(&mut self, record: &GameRecord) -> IconState {
        match self.icons.request(record) {
            IconRequest::Ready(icon) => IconState::Icon(icon),
            IconRequest::Pending => {
                self.pending_icons += 1;
                IconState::Placeholder(Glyph::for_kind(record.kind()))
            }
        }
    }

    /// Requests icons for every visible game. Returns how many are loading.
    pub fn request_visible_icons(&mut self) -> usize {
        let visible = self.presenter.visible().to_vec();
        visible
            .iter()
            .filter(|record| matches!(self.request_icon(record), IconState::Placeholder(_)))
            .count()
    }

    /// Cache lookup only; never starts work.
    pub fn icon_state(&self, record: &GameRecord) -> IconState {
        GamePresenter::icon_state(record, self.icons.cache())
    }

    /// Launches the visible game at `index`.
    pub fn launch_visible(&mut self, index: usize) -> Result<(), GamesError> {
        let Some(record) = self.presenter.visible_at(index).cloned() else {
            self.notices.error(GAME_NOT_FOUND_NOTICE);
            return Err(GamesError::GameNotFound(format!("#{index}")));
        };
        self.launch_record(&record)
    }

    /// Launches a scanned game by display name, ignoring case.
    pub fn launch_by_name(&mut self, name: &str) -> Result<(), GamesError> {
        let Some(record) = self.presenter.find_by_name(name).cloned() else {
            self.notices.error(GAME_NOT_FOUND_NOTICE);
            return Err(GamesError::GameNotFound(name.to_string()));
        };
        self.launch_record(&record)
    }

    pub fn launch_record(&mut self, record: &GameRecord) -> Result<(), GamesError> {
        let result = self.presenter.launch(record, self.runtime.as_ref());
        self.report_launch(result)
    }

    /// Opens an arbitrary file or folder in the runtime, bypassing the scan.
    pub fn open_file(&mut self, path: &Path) -> Result<(), GamesError> {
        let entry = EntryRef::new(path);
        let result = if entry.exists() {
            info!(entry = %entry, "opening file");
            self.runtime.launch(&LaunchTarget::Game(entry))
        } else {
            Err(GamesError::GameNotFound(path.display().to_string()))
        };
        self.report_launch(result)
    }

    /// Starts the runtime on its no-game screen.
    pub fn launch_without_game(&mut self) -> Result<(), GamesError> {
        info!("launching runtime without a game");
        let result = self.runtime.launch(&LaunchTarget::NoGame);
        self.report_launch(result)
    }

    fn report_launch(&mut self, result: Result<(), GamesError>) -> Result<(), GamesError> {
        match &result {
            Ok(()) => {}
            Err(GamesError::GameNotFound(name)) => {
                warn!(game = %name, "launch target missing");
                self.notices.error(GAME_NOT_FOUND_NOTICE);
            }
            Err(GamesError::Runtime(msg)) => {
                warn!(error = %msg, "runtime failed to start");
                self.notices.error(format!("Failed to open game: {msg}"));
            }
        }
        result
    }
}
