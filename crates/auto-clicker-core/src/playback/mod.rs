mod clicker;
mod engine;
mod timing;

pub use {
    clicker::Clicker,
    engine::{ClickPlan, EngineState, PlaybackEngine},
    timing::{ClickTiming, apply_jitter, human_delay},
};
