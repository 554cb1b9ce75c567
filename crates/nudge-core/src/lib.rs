//! Core scheduling logic for escalating retention prompts

mod config;
mod departure;
mod engagement;
mod ladder;
mod orchestrator;
mod types;

pub use config::{Config, SignalWeights};
pub use departure::DepartureDetector;
pub use engagement::EngagementAccumulator;
pub use ladder::{Ladder, LadderError};
pub use orchestrator::{
    AnalyticsEvent, AnalyticsKind, Event, EventKind, Orchestrator, PresentationSink,
};
pub use types::{DepartureSignal, Phase, SessionState, SignalKind, Tier, TriggerKind};
