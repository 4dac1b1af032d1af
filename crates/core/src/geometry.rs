//! Road geometry from the driving model
//!
//! Road curvature from the predicted path and lane widths from lane lines
//! and road edges. Missing or empty polylines give 0, never an error.

use heapless::Vec;

use crate::table::interp;

/// Points per model polyline
pub const MODEL_POINTS: usize = 33;

/// Lateral polyline, `y` offsets (m) at longitudinal positions `x` (m).
///
/// `x` is expected in ascending order, as the model emits it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    x: Vec<f32, MODEL_POINTS>,
    y: Vec<f32, MODEL_POINTS>,
}

impl Polyline {
    /// Build from parallel slices, keeping at most `MODEL_POINTS` pairs.
    pub fn from_points(x: &[f32], y: &[f32]) -> Self {
        let mut line = Self::default();
        for (&px, &py) in x.iter().zip(y).take(MODEL_POINTS) {
            // Capacity bounded by `take`
            let _ = line.x.push(px);
            let _ = line.y.push(py);
        }
        line
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Lateral offset interpolated at `x`
    pub fn y_at(&self, x: f32) -> f32 {
        interp(x, &self.x, &self.y)
    }
}

/// Predicted ego trajectory samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathPrediction {
    velocity: Vec<f32, MODEL_POINTS>,
    yaw_rate: Vec<f32, MODEL_POINTS>,
}

impl PathPrediction {
    /// Build from parallel velocity (m/s) and yaw rate (rad/s) slices.
    pub fn from_samples(velocity: &[f32], yaw_rate: &[f32]) -> Self {
        let mut path = Self::default();
        for (&v, &r) in velocity.iter().zip(yaw_rate).take(MODEL_POINTS) {
            let _ = path.velocity.push(v);
            let _ = path.yaw_rate.push(r);
        }
        path
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }
}

/// Lane lines (left-far, left, right, right-far) and road edges (left, right)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneModel {
    pub lane_lines: [Polyline; 4],
    pub road_edges: [Polyline; 2],
}

impl LaneModel {
    /// Usable widths (m) of the left and right adjacent lanes
    pub fn lane_widths(&self) -> (f32, f32) {
        let [far_left, left, right, far_right] = &self.lane_lines;
        let [left_edge, right_edge] = &self.road_edges;
        (
            lane_width(far_left, left, left_edge),
            lane_width(far_right, right, right_edge),
        )
    }
}

/// Road curvature (1/m) seen at `v_ego`.
///
/// Peak lateral acceleration `|yaw_rate| * velocity` along the predicted
/// path, divided by `max(v_ego, 1)²`. Empty paths and non-finite samples
/// contribute nothing.
pub fn road_curvature(path: &PathPrediction, v_ego: f32) -> f32 {
    let lat_accel = path
        .velocity
        .iter()
        .zip(path.yaw_rate.iter())
        .map(|(v, r)| (r * v).abs())
        .filter(|a| a.is_finite())
        .fold(0.0_f32, f32::max);
    let speed = if v_ego.is_finite() { v_ego.max(1.0) } else { 1.0 };
    lat_accel / (speed * speed)
}

/// Width (m) of the lane between `current_lane` and `lane`.
///
/// Mean lateral distance from `current_lane` to `lane` and to `road_edge`,
/// both interpolated at the current lane's `x`; the smaller of the two.
/// An empty reference polyline gives 0.
pub fn lane_width(lane: &Polyline, current_lane: &Polyline, road_edge: &Polyline) -> f32 {
    if current_lane.is_empty() || lane.is_empty() || road_edge.is_empty() {
        return 0.0;
    }
    let to_lane = mean_distance(current_lane, lane);
    let to_edge = mean_distance(current_lane, road_edge);
    to_lane.min(to_edge)
}

fn mean_distance(from: &Polyline, to: &Polyline) -> f32 {
    let total: f32 = from
        .x()
        .iter()
        .zip(from.y())
        .map(|(&x, &y)| (y - to.y_at(x)).abs())
        .sum();
    total / from.x().len() as f32
}
