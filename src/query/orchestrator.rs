//! Stateful coordinator for the feature-query engine
//!
//! The orchestrator owns the viewport, the layer registry and the displayed
//! information/statistics state, and wires the pure builder, normalizer and
//! derivation functions together in response to click and toggle events.
//!
//! All mutation happens on the single event-processing task; the two HTTP
//! round-trips are the only suspension points. Every outgoing request is
//! tagged with a monotonically increasing sequence number and a response is
//! applied only while its number is still the latest issued, so a slow early
//! response can never overwrite the result of a faster later click.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::time::timeout;

use crate::core::config::MapConfig;
use crate::core::geo::LatLng;
use crate::core::viewport::Viewport;
use crate::data::geojson::FeatureCollection;
use crate::input::events::{MapCommand, MapEvent};
use crate::layers::registry::LayerRegistry;
use crate::query::normalize::{normalize, TableProjection};
use crate::query::request::{build_feature_info_request, FeatureInfoRequest};
use crate::query::source::{
    FeatureInfoSource, HttpStatisticsSource, StatisticsSource, WmsFeatureInfoSource,
};
use crate::query::stats::{derive_statistics_request, StatisticsRequest, StatisticsResult};
use crate::{MapError, Result};

/// What went wrong with an issued query, as surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailure {
    Network,
    Decode,
    Timeout,
}

impl From<&MapError> for QueryFailure {
    fn from(error: &MapError) -> Self {
        match error {
            MapError::Decode(_) => QueryFailure::Decode,
            MapError::Timeout(_) => QueryFailure::Timeout,
            _ => QueryFailure::Network,
        }
    }
}

/// User-visible phase of the feature-query engine.
///
/// `Idle` (nothing queried, or cleared because no layer was active) and
/// `NoFeatures` (a query ran and came back empty) are deliberately distinct
/// states; the view renders them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    AwaitingFeatureInfo,
    /// The query succeeded but returned zero features
    NoFeatures,
    /// The information table is displayed and no statistics are pending
    TableShown,
    AwaitingStatistics,
    /// Table and statistics are both displayed
    StatisticsShown,
    /// The last query failed; stale data has been cleared
    Failed(QueryFailure),
}

/// Sequence-tagged outbound GetFeatureInfo request
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTicket {
    pub seq: u64,
    pub request: FeatureInfoRequest,
}

/// Sequence-tagged outbound statistics request
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsTicket {
    pub seq: u64,
    pub request: StatisticsRequest,
}

/// Stateful coordinator owning viewport, layer visibility and query results
pub struct QueryOrchestrator {
    config: MapConfig,
    registry: LayerRegistry,
    viewport: Viewport,
    state: QueryState,
    table: Option<TableProjection>,
    statistics: Option<StatisticsResult>,
    /// Sequence number of the most recently issued request; responses
    /// carrying any other number are stale
    issued_seq: u64,
    feature_source: Arc<dyn FeatureInfoSource>,
    statistics_source: Arc<dyn StatisticsSource>,
    command_tx: Sender<MapCommand>,
}

impl QueryOrchestrator {
    /// Creates an orchestrator wired to the real HTTP collaborators.
    ///
    /// Returns the receiving end of the command channel for the map widget.
    pub fn new(config: MapConfig, registry: LayerRegistry) -> (Self, Receiver<MapCommand>) {
        let statistics_source = HttpStatisticsSource::new(config.stats_url.clone());
        Self::with_sources(
            config,
            registry,
            Arc::new(WmsFeatureInfoSource),
            Arc::new(statistics_source),
        )
    }

    /// Creates an orchestrator with injected sources
    pub fn with_sources(
        config: MapConfig,
        registry: LayerRegistry,
        feature_source: Arc<dyn FeatureInfoSource>,
        statistics_source: Arc<dyn StatisticsSource>,
    ) -> (Self, Receiver<MapCommand>) {
        let (command_tx, command_rx) = unbounded();
        let orchestrator = Self {
            config,
            registry,
            viewport: Viewport::default(),
            state: QueryState::Idle,
            table: None,
            statistics: None,
            issued_seq: 0,
            feature_source,
            statistics_source,
            command_tx,
        };
        (orchestrator, command_rx)
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The currently displayed table, if any
    pub fn table(&self) -> Option<&TableProjection> {
        self.table.as_ref()
    }

    /// The currently displayed statistics, if any
    pub fn statistics(&self) -> Option<&StatisticsResult> {
        self.statistics.as_ref()
    }

    /// Toggles a layer's visibility; query state is untouched until the next
    /// click
    pub fn set_layer_visible(&mut self, layer_id: &str, visible: bool) {
        self.registry.set_visible(layer_id, visible);
    }

    /// Processes a notification from the map widget
    pub async fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click { position } => self.handle_click(position).await,
            MapEvent::ZoomEnd { zoom } => self.notify_zoom_changed(zoom),
        }
    }

    /// Runs the full click flow: build, fetch, normalize, derive, fetch
    /// statistics.
    ///
    /// Responses remain gated by the sequence rule, so hosts that overlap
    /// clicks by driving `begin_query`/`apply_feature_info`/
    /// `apply_statistics` from their own tasks get last-click-wins behavior.
    pub async fn handle_click(&mut self, point: LatLng) {
        let Some(ticket) = self.begin_query(point) else {
            return;
        };
        let result = self.fetch_features(&ticket.request).await;
        let Some(stats_ticket) = self.apply_feature_info(ticket.seq, result) else {
            return;
        };
        let result = self.fetch_statistics(&stats_ticket.request).await;
        self.apply_statistics(stats_ticket.seq, result);
    }

    /// Turns a click into a sequence-tagged GetFeatureInfo request.
    ///
    /// With no active layer, or with unusable coordinates, the click clears
    /// the information and statistics state and nothing is issued.
    pub fn begin_query(&mut self, point: LatLng) -> Option<QueryTicket> {
        let request =
            build_feature_info_request(&self.config.wms_url, point, self.registry.active_layer());
        match request {
            Ok(request) => {
                self.issued_seq += 1;
                self.state = QueryState::AwaitingFeatureInfo;
                Some(QueryTicket {
                    seq: self.issued_seq,
                    request,
                })
            }
            Err(error) => {
                log::debug!("click ignored: {}", error);
                self.clear_to_idle();
                None
            }
        }
    }

    /// Applies a feature-info response for the request tagged `seq`.
    ///
    /// Stale responses are discarded. A fresh successful response replaces
    /// the table atomically and, when the features carry block identifiers,
    /// yields the follow-up statistics ticket.
    pub fn apply_feature_info(
        &mut self,
        seq: u64,
        result: Result<FeatureCollection>,
    ) -> Option<StatisticsTicket> {
        if seq != self.issued_seq {
            log::debug!(
                "discarding stale feature-info response (seq {}, latest {})",
                seq,
                self.issued_seq
            );
            return None;
        }

        match result {
            Ok(collection) => {
                let table = normalize(&collection, &self.registry);
                self.statistics = None;
                if table.is_empty() {
                    self.table = None;
                    self.state = QueryState::NoFeatures;
                    return None;
                }
                self.table = Some(table);
                match derive_statistics_request(&collection) {
                    Some(request) => {
                        self.issued_seq += 1;
                        self.state = QueryState::AwaitingStatistics;
                        Some(StatisticsTicket {
                            seq: self.issued_seq,
                            request,
                        })
                    }
                    None => {
                        self.state = QueryState::TableShown;
                        None
                    }
                }
            }
            Err(error) => {
                self.fail(&error);
                None
            }
        }
    }

    /// Applies a statistics response for the request tagged `seq`.
    ///
    /// Stale responses are discarded; a non-success status keeps the table
    /// but leaves the statistics hidden.
    pub fn apply_statistics(&mut self, seq: u64, result: Result<StatisticsResult>) {
        if seq != self.issued_seq {
            log::debug!(
                "discarding stale statistics response (seq {}, latest {})",
                seq,
                self.issued_seq
            );
            return;
        }

        match result {
            Ok(statistics) if statistics.is_success() => {
                self.statistics = Some(statistics);
                self.state = QueryState::StatisticsShown;
            }
            Ok(statistics) => {
                log::warn!("statistics API returned status {:?}", statistics.status);
                self.statistics = None;
                self.state = QueryState::TableShown;
            }
            Err(error) => {
                self.fail(&error);
            }
        }
    }

    /// Increments the zoom level and commands the widget to apply it
    pub fn zoom_in(&mut self) {
        let zoom = self.viewport.zoom_in();
        self.send_command(MapCommand::SetZoom { zoom });
    }

    /// Decrements the zoom level and commands the widget to apply it
    pub fn zoom_out(&mut self) {
        let zoom = self.viewport.zoom_out();
        self.send_command(MapCommand::SetZoom { zoom });
    }

    /// Absorbs a widget-initiated zoom change; query state is untouched
    pub fn notify_zoom_changed(&mut self, zoom: u8) {
        self.viewport.set_zoom(zoom);
    }

    /// Recenters the view and commands the widget to follow
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.send_command(MapCommand::SetView {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }

    async fn fetch_features(&self, request: &FeatureInfoRequest) -> Result<FeatureCollection> {
        let source = Arc::clone(&self.feature_source);
        match timeout(self.config.request_timeout, source.fetch_features(request)).await {
            Ok(result) => result,
            Err(_) => Err(MapError::Timeout(self.config.request_timeout)),
        }
    }

    async fn fetch_statistics(&self, request: &StatisticsRequest) -> Result<StatisticsResult> {
        let source = Arc::clone(&self.statistics_source);
        match timeout(self.config.request_timeout, source.fetch_statistics(request)).await {
            Ok(result) => result,
            Err(_) => Err(MapError::Timeout(self.config.request_timeout)),
        }
    }

    fn clear_to_idle(&mut self) {
        self.table = None;
        self.statistics = None;
        self.state = QueryState::Idle;
    }

    fn fail(&mut self, error: &MapError) {
        log::warn!("query failed: {}", error);
        self.table = None;
        self.statistics = None;
        self.state = QueryState::Failed(QueryFailure::from(error));
    }

    fn send_command(&self, command: MapCommand) {
        // The widget may not be attached yet; commands are best-effort.
        let _ = self.command_tx.send(command);
    }
}
