pub mod lineup;
pub mod roster_lists;
pub mod user_avatar;
