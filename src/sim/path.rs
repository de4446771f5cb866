//! Route geometry and the ship's path tracker
//!
//! The ship sails a fixed route of map waypoints. Progress is an integer
//! count of confirmed matches; positions between waypoints come from a
//! clamped Catmull-Rom spline so the ship glides instead of jumping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Cubic Catmull-Rom basis through p1..p2, with p0/p3 as tangent controls
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let c0 = p1;
    let c1 = 0.5 * (p2 - p0);
    let c2 = 0.5 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3);
    let c3 = 0.5 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
    c0 + c1 * t + c2 * t2 + c3 * t3
}

/// An immutable waypoint route across the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<Vec2>,
}

impl Route {
    /// Build a route, rejecting degenerate waypoint lists
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(waypoints.len()));
        }
        Ok(Self { waypoints })
    }

    /// Number of spline segments between consecutive waypoints
    #[inline]
    pub fn segments(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// First waypoint (the harbor)
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Final waypoint (the treasure)
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Position at `progress` confirmed matches out of `total`
    ///
    /// Clamped Catmull-Rom: the missing control point before the first
    /// waypoint (and after the last) is the adjacent endpoint itself, so
    /// the curve passes exactly through every waypoint at segment
    /// boundaries. `progress == total` lands on the last waypoint.
    pub fn position_at(&self, progress: u32, total: u32) -> Vec2 {
        if total == 0 {
            return self.start();
        }
        let segments = self.segments();
        let ratio = progress.min(total) as f32 / total as f32;
        let segment_index = ((ratio * segments as f32) as usize).min(segments - 1);
        let segment_ratio = ratio * segments as f32 - segment_index as f32;

        let p1 = self.waypoints[segment_index];
        let p2 = self.waypoints[segment_index + 1];
        let p0 = if segment_index == 0 {
            p1
        } else {
            self.waypoints[segment_index - 1]
        };
        let p3 = if segment_index == segments - 1 {
            p2
        } else {
            self.waypoints[segment_index + 2]
        };

        catmull_rom(p0, p1, p2, p3, segment_ratio)
    }
}

/// Monotonic progress counter mapped onto a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathTracker {
    route: Route,
    /// Confirmed matches so far, in [0, total]
    progress: u32,
    /// Matches needed to reach the end of the route
    total: u32,
    /// Cached position for rendering
    position: Vec2,
}

impl PathTracker {
    pub fn new(route: Route, total: u32) -> Self {
        let position = route.start();
        Self {
            route,
            progress: 0,
            total,
            position,
        }
    }

    #[inline]
    pub fn progress(&self) -> u32 {
        self.progress
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Advance one step (clamped at the route's end) and recompute position
    pub fn advance(&mut self) {
        self.progress = (self.progress + 1).min(self.total);
        self.position = self.route.position_at(self.progress, self.total);
        debug_assert!(self.progress <= self.total);
    }

    /// Back to the harbor
    pub fn rewind(&mut self) {
        self.progress = 0;
        self.position = self.route.start();
    }
}
