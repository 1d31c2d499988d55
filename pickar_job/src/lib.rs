// pickar_job: pick-list job tracking on top of `pickar_nav`.
//
// A picker works through an ordered list of shelf items. The job keeps track
// of which item is next, detects arrival, holds the item details on screen
// for a fixed time, and keeps the router pointed at the current item until
// the list is done, at which point the route is cleared.
//
// Module overview:
// - `item.rs`: PickItem (description, shelf slot, position) + pick-list JSON.
// - `job.rs`:  PickJob, JobConfig, JobEvent, the per-frame update logic.

pub mod item;
pub mod job;

pub use item::{PickItem, items_from_json};
pub use job::{JobConfig, JobEvent, PickJob};
