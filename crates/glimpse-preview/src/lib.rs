//! Speculative preview session control.
//!
//! A `PreviewController` manages a provisional content session shown
//! speculatively while the user types, alongside the caller's committed
//! primary session. It provides:
//! - Debounced destination updates (last-write-wins coalescing)
//! - Provider and host blacklisting for destinations that don't
//!   support preview semantics
//! - Deferred destruction of loaders condemned during reentrant
//!   delegate callbacks
//! - The commit protocol that transfers session ownership out of the
//!   controller (single-shot and two-phase variants)
//!
//! Rendering, network fetch, and page-load mechanics live behind the
//! `SessionLoader` and `HostDelegate` trait seams; the controller is a
//! synchronous state machine driven by the embedder's control loop.

pub mod blacklist;
pub mod condemned;
pub mod controller;
pub mod delegate;
pub mod loader;
pub mod manager;
pub mod scheduler;
pub mod types;

pub use blacklist::{shared_host_blacklist, HostBlacklist, ProviderBlacklist, SharedHostBlacklist};
pub use condemned::DeferredDestructionQueue;
pub use controller::PreviewController;
pub use delegate::{HostDelegate, SharedHost};
pub use loader::{LoaderFactory, SessionLoader};
pub use manager::LoaderManager;
pub use scheduler::{OneShotTimer, PendingUpdate, UpdateScheduler, AUTO_COMMIT_FADE_MS};
pub use types::{FocusTarget, NavigationMatch, PreviewSession, SupportState};
