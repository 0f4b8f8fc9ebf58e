pub mod roster;
pub mod users;

pub use roster::{Coach, CoachRequest, NewCoach, NewCoachRequest, NewPlayer, Player};
pub use users::{SessionUser, SessionView};
