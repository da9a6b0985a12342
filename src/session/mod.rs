pub mod map_pick;
pub mod roster;
