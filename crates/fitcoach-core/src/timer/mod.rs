mod amrap;
mod clock;
mod emom;
mod for_time;
mod phase;
mod plan;
mod runner;
mod session;
mod tabata;

pub use amrap::AmrapPlan;
pub use clock::{IntervalClock, Tick, TICK_PERIOD};
pub use emom::EmomPlan;
pub use for_time::ForTimePlan;
pub use phase::{Phase, Progress};
pub use plan::{PhasePlan, Transition, WorkoutPlan};
pub use runner::{Command, PreferenceStore, SessionRunner};
pub use session::{
    SessionConfig, SessionController, TimerSession, DEFAULT_PREPARATION_SECONDS,
    DEFAULT_START_SOUND_DELAY_MS,
};
pub use tabata::{TabataBlock, TabataPlan};
