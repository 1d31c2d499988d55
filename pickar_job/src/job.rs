// Picking-job progress, driven by the host's update loop.
//
// A `PickJob` walks an ordered list of items. Each frame the host calls
// `update()` with the current time and the picker's position:
//
//   1. If item details have been on screen for `detail_display_ms`, hide them
//      and advance to the next item.
//   2. If every item has been picked, clear the route.
//   3. Otherwise, if the picker is within `pickup_radius` of the current
//      item, pick it: show its details until the deadline, and stop it from
//      being picked again.
//   4. Route from the picker to the current item.
//
// The details delay is a plain deadline compared against `now_ms` on every
// update; nothing sleeps or suspends. The route keeps being drawn toward the
// current item while its details are shown.
//
// See also: `item.rs` for the item record, `pickar_nav::Router` for routing.

use crate::item::PickItem;
use pickar_nav::{PathPresenter, Router, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// How long item details stay on screen after a pick, in milliseconds.
    pub detail_display_ms: u64,
    /// How close the picker must get to an item to pick it.
    pub pickup_radius: f32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            detail_display_ms: 3000,
            pickup_radius: 0.3,
        }
    }
}

impl JobConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Things the host may want to react to (show or hide an overlay, play a
/// sound). Indices are positions in the pick list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobEvent {
    DetailsShown { index: usize, until_ms: u64 },
    DetailsHidden { index: usize },
    /// The item at `index` is now the one to walk to.
    ItemActivated { index: usize },
    JobCompleted,
}

#[derive(Clone, Debug)]
pub struct PickJob {
    items: Vec<PickItem>,
    progress: usize,
    /// Whether the current item can still be picked. Cleared on pick so the
    /// details timer runs once per item.
    current_pickable: bool,
    /// Pick-list index whose details are showing, and when to hide them.
    details: Option<(usize, u64)>,
    completion_reported: bool,
    config: JobConfig,
}

impl PickJob {
    /// Start a job. The first item (if any) is active immediately.
    pub fn new(items: Vec<PickItem>, config: JobConfig) -> Self {
        Self {
            current_pickable: !items.is_empty(),
            items,
            progress: 0,
            details: None,
            completion_reported: false,
            config,
        }
    }

    pub fn items(&self) -> &[PickItem] {
        &self.items
    }

    /// Number of items already picked.
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.items.len()
    }

    pub fn current_item(&self) -> Option<&PickItem> {
        self.items.get(self.progress)
    }

    /// The item whose details are currently on screen.
    pub fn details_shown(&self) -> Option<&PickItem> {
        self.details.map(|(index, _)| &self.items[index])
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Advance the job by one host frame and steer the router.
    pub fn update<P: PathPresenter>(
        &mut self,
        now_ms: u64,
        player: Vec3,
        router: &mut Router<P>,
    ) -> Vec<JobEvent> {
        let mut events = Vec::new();

        if let Some((index, _)) = self.details.filter(|&(_, until_ms)| now_ms >= until_ms) {
            self.details = None;
            self.progress += 1;
            events.push(JobEvent::DetailsHidden { index });
            if !self.is_complete() {
                self.current_pickable = true;
                tracing::info!(
                    picked = self.progress,
                    total = self.items.len(),
                    "next item active"
                );
                events.push(JobEvent::ItemActivated {
                    index: self.progress,
                });
            }
        }

        if self.is_complete() {
            if !self.completion_reported {
                self.completion_reported = true;
                tracing::info!(items = self.items.len(), "pick job complete");
                events.push(JobEvent::JobCompleted);
            }
            router.clear_route();
            return events;
        }

        let target = self.items[self.progress].position;
        if self.current_pickable && player.distance(target) <= self.config.pickup_radius {
            events.extend(self.pick_current(now_ms));
        }

        if let Err(e) = router.route_and_render(player, target) {
            tracing::warn!(error = %e, "cannot route to current item");
        }
        events
    }

    /// Pick the current item now, for hosts that detect arrival themselves
    /// (a trigger volume, a barcode scan). Returns `None` if there is nothing
    /// to pick or the current item was already picked.
    pub fn pick_current(&mut self, now_ms: u64) -> Option<JobEvent> {
        if self.is_complete() || !self.current_pickable {
            return None;
        }
        self.current_pickable = false;
        let index = self.progress;
        let until_ms = now_ms.saturating_add(self.config.detail_display_ms);
        self.details = Some((index, until_ms));
        tracing::info!(
            index,
            item = %self.items[index].details(),
            "item picked"
        );
        Some(JobEvent::DetailsShown { index, until_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickar_nav::{NavConfig, RecordingPresenter, RouteKind, WaypointGraph};

    /// A(0,0,0) – B(2,0,0) – C(4,0,0).
    fn aisle_router() -> Router<RecordingPresenter> {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint(Vec3::new(0.0, 0.0, 0.0));
        let b = graph.add_waypoint(Vec3::new(2.0, 0.0, 0.0));
        let c = graph.add_waypoint(Vec3::new(4.0, 0.0, 0.0));
        graph.connect(a, b).unwrap();
        graph.connect(b, c).unwrap();
        Router::new(graph, RecordingPresenter::new(), NavConfig::default()).unwrap()
    }

    fn two_item_job() -> PickJob {
        PickJob::new(
            vec![
                PickItem::new("tape", 1, 0, Vec3::new(2.0, 0.0, 0.2)),
                PickItem::new("gloves", 6, 3, Vec3::new(4.0, 0.0, 0.2)),
            ],
            JobConfig::default(),
        )
    }

    #[test]
    fn default_config_values() {
        let config = JobConfig::default();
        assert_eq!(config.detail_display_ms, 3000);
        assert_eq!(config.pickup_radius, 0.3);
        let partial = JobConfig::from_json(r#"{ "pickup_radius": 0.5 }"#).unwrap();
        assert_eq!(partial.detail_display_ms, 3000);
        assert_eq!(partial.pickup_radius, 0.5);
    }

    #[test]
    fn full_job_lifecycle() {
        let mut router = aisle_router();
        let mut job = two_item_job();

        // Far from the first item: just route.
        let events = job.update(0, Vec3::new(0.0, 0.0, 0.0), &mut router);
        assert!(events.is_empty());
        assert_eq!(router.current_route().unwrap().kind, RouteKind::Graph);

        // Arrive at the first item.
        let at_first = Vec3::new(2.0, 0.0, 0.1);
        let events = job.update(100, at_first, &mut router);
        assert_eq!(
            events,
            vec![JobEvent::DetailsShown {
                index: 0,
                until_ms: 3100
            }]
        );
        assert_eq!(job.details_shown().unwrap().description, "tape");

        // Lingering does not pick again, and the route stays up.
        assert!(job.update(200, at_first, &mut router).is_empty());
        assert!(router.presenter().current().is_some());

        // Deadline passes: advance to the second item.
        let events = job.update(3100, at_first, &mut router);
        assert_eq!(
            events,
            vec![
                JobEvent::DetailsHidden { index: 0 },
                JobEvent::ItemActivated { index: 1 },
            ]
        );
        assert_eq!(job.progress(), 1);
        assert_eq!(job.current_item().unwrap().description, "gloves");
        assert!(job.details_shown().is_none());

        let at_second = Vec3::new(4.0, 0.0, 0.25);
        let events = job.update(3200, at_second, &mut router);
        assert_eq!(
            events,
            vec![JobEvent::DetailsShown {
                index: 1,
                until_ms: 6200
            }]
        );

        let events = job.update(6200, at_second, &mut router);
        assert_eq!(
            events,
            vec![JobEvent::DetailsHidden { index: 1 }, JobEvent::JobCompleted]
        );
        assert!(job.is_complete());
        assert_eq!(router.presenter().current(), None);

        // Completion is reported once; the route stays cleared.
        assert!(job.update(6300, at_second, &mut router).is_empty());
        assert_eq!(router.presenter().current(), None);
    }

    #[test]
    fn empty_job_completes_on_first_update() {
        let mut router = aisle_router();
        let mut job = PickJob::new(Vec::new(), JobConfig::default());
        assert!(job.is_complete());
        assert_eq!(
            job.update(0, Vec3::ZERO, &mut router),
            vec![JobEvent::JobCompleted]
        );
        assert!(job.pick_current(0).is_none());
    }

    #[test]
    fn host_can_pick_without_proximity() {
        let mut router = aisle_router();
        let mut job = two_item_job();
        assert_eq!(
            job.pick_current(50),
            Some(JobEvent::DetailsShown {
                index: 0,
                until_ms: 3050
            })
        );
        assert!(job.pick_current(60).is_none());

        // Before the deadline nothing advances, even far away.
        assert!(job.update(3000, Vec3::ZERO, &mut router).is_empty());
        assert_eq!(job.progress(), 0);
        assert_eq!(
            job.update(3050, Vec3::ZERO, &mut router),
            vec![
                JobEvent::DetailsHidden { index: 0 },
                JobEvent::ItemActivated { index: 1 },
            ]
        );
    }

    #[test]
    fn details_deadline_saturates_near_clock_limit() {
        let mut job = two_item_job();
        let now_ms = u64::MAX - 10;
        assert_eq!(
            job.pick_current(now_ms),
            Some(JobEvent::DetailsShown {
                index: 0,
                until_ms: u64::MAX
            })
        );

        let mut router = aisle_router();
        assert_eq!(
            job.update(u64::MAX, Vec3::ZERO, &mut router),
            vec![
                JobEvent::DetailsHidden { index: 0 },
                JobEvent::ItemActivated { index: 1 },
            ]
        );
    }

    #[test]
    fn routing_failure_does_not_stop_the_job() {
        let mut router = aisle_router();
        let mut job = two_item_job();
        // Edit without rebuilding: routing fails, the job still progresses.
        let extra = router.graph_mut().add_waypoint(Vec3::new(9.0, 0.0, 0.0));
        router.graph_mut().remove_waypoint(extra).unwrap();
        let events = job.update(0, Vec3::new(2.0, 0.0, 0.1), &mut router);
        assert_eq!(events.len(), 1);
        assert_eq!(router.presenter().current(), None);
    }
}
