pub mod countdown;
pub mod engine;
pub mod resolver;
pub mod restricted;

pub use countdown::{remaining_time, target_instant};
pub use engine::{Notice, NoticeId, TickDisplay, TickEngine, TickOutput};
pub use resolver::{ResolvedDayState, resolve_schedule};
pub use restricted::{
    Advisory, RestrictedWindow, WindowEvaluation, WindowState, WindowStates, evaluate_windows,
};
