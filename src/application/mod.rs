//! Application layer: window registry, live state, broadcast and the
//! monitor cycle.

pub mod broadcast;
pub mod clock;
pub mod monitor;
pub mod registry;
pub mod shutdown;
pub mod state;

pub use broadcast::{BroadcastHub, EventKind, StateEvent, SubscriberId, Subscription};
pub use clock::LocalClock;
pub use monitor::{Monitor, MonitorHandle, MonitorSettings, Outcome, PassSummary, WindowReport};
pub use registry::WindowRegistry;
pub use state::{LiveState, OfferEntry, Snapshot, WindowEntry};
