//! # Newsdesk
//!
//! A terminal client for a news aggregation backend.
//!
//! ## Architecture
//!
//! ```text
//! Topic Directory ─┐
//! Location Resolver ┼─→ Feed Machine ─→ CLI
//! News Fetchers ───┘
//! ```
//!
//! The [`feed`] module holds the state machine that multiplexes the hot,
//! trending, per-topic, location and search sources into one paginated view.
//! Everything else feeds it or renders it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Home briefing, two pages of latest news
//! newsdesk feed --pages 2
//!
//! # A topic from the backend's topic list
//! newsdesk feed Technology
//!
//! # Search
//! newsdesk search election
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the HTTP
/// clients, the persistence store and the configuration.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): a news item with display fallbacks
/// - [`Topic`](domain::Topic): a subscribable category
/// - [`Category`](domain::Category): the selected feed view
/// - [`UserLocation`](domain::UserLocation): resolved user location
pub mod domain;

/// Feed pagination and category-switching state machine.
pub mod feed;

/// HTTP collaborators.
///
/// - [`NewsSource`](fetcher::NewsSource), [`TopicSource`](fetcher::TopicSource),
///   [`GeoLocator`](fetcher::GeoLocator): async traits consumed by the core
/// - [`HttpNewsClient`](fetcher::HttpNewsClient): reqwest-based backend client
/// - [`HttpGeoLocator`](fetcher::HttpGeoLocator): IP geolocation lookup
pub mod fetcher;

/// Cache-then-fetch user location.
pub mod location;

/// Persisted authentication session.
pub mod session;

/// Key-value persistence port with SQLite and in-memory implementations.
pub mod store;

/// Topic list loading.
pub mod topics;
