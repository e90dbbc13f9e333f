pub mod display_sense;
pub mod pocket_sense;
pub mod resources;
pub mod touch_feed;
pub mod wake_worker;
