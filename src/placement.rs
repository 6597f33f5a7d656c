//! Scene placement for floating lyric phrases.
//!
//! Phrases cycle through a small table of base positions. Every full pass
//! through the table (a "round") pushes phrases further back, drifts them
//! sideways in alternating directions and raises them a little, while the
//! camera keeps moving away from the origin.

use crate::error::{CaplineError, Result};

use serde::Serialize;

const X_BOUND: f64 = 480.0;
const Y_BOUND: f64 = 260.0;
const DEPTH_PER_ROUND: f64 = -250.0;
const DRIFT_PER_ROUND: f64 = 60.0;
const RISE_PER_ROUND: f64 = 50.0;

pub const CAMERA_SPEED: f64 = 60.0;
pub const MAX_CAMERA_DEPTH: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhrasePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<f64>,
}

impl PhrasePosition {
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            rotate_x: None,
            rotate_y: None,
        }
    }
}

const BASE_POSITIONS: [PhrasePosition; 6] = [
    PhrasePosition::at(-360.0, -180.0, -420.0),
    PhrasePosition::at(320.0, -150.0, -560.0),
    PhrasePosition::at(-280.0, 40.0, -680.0),
    PhrasePosition::at(260.0, 100.0, -520.0),
    PhrasePosition::at(-340.0, -20.0, -840.0),
    PhrasePosition::at(200.0, 60.0, -640.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PhraseLayout {
    base: Vec<PhrasePosition>,
    camera_speed: f64,
    max_camera_depth: f64,
}

impl Default for PhraseLayout {
    fn default() -> Self {
        Self {
            base: BASE_POSITIONS.to_vec(),
            camera_speed: CAMERA_SPEED,
            max_camera_depth: MAX_CAMERA_DEPTH,
        }
    }
}

impl PhraseLayout {
    pub fn new(base: Vec<PhrasePosition>) -> Result<Self> {
        if base.is_empty() {
            return Err(CaplineError::EmptyLayout);
        }
        Ok(Self {
            base,
            ..Self::default()
        })
    }

    pub fn with_camera(mut self, speed: f64, max_depth: f64) -> Self {
        self.camera_speed = speed;
        self.max_camera_depth = max_depth;
        self
    }

    pub fn base_positions(&self) -> &[PhrasePosition] {
        &self.base
    }

    /// Number of completed passes through the base table before `index`.
    pub fn round_of(&self, index: usize) -> usize {
        index / self.base.len()
    }

    pub fn position_for(&self, index: usize) -> PhrasePosition {
        let base = self.base[index % self.base.len()];
        let round = self.round_of(index) as f64;
        let direction = if self.round_of(index) % 2 == 0 { -1.0 } else { 1.0 };
        let lateral_shift = direction * round * DRIFT_PER_ROUND;

        PhrasePosition {
            x: (base.x + lateral_shift).clamp(-X_BOUND, X_BOUND),
            y: (base.y - round * RISE_PER_ROUND).clamp(-Y_BOUND, Y_BOUND),
            z: base.z + round * DEPTH_PER_ROUND,
            ..base
        }
    }

    /// Camera depth after `seconds`, receding at a fixed speed until the cap.
    /// A NaN time gives a NaN depth.
    pub fn camera_depth_at(&self, seconds: f64) -> f64 {
        let travelled = seconds * self.camera_speed;
        if travelled > self.max_camera_depth {
            -self.max_camera_depth
        } else {
            -travelled
        }
    }

    pub fn camera_depth_at_frame(&self, frame: u64, fps: f64) -> f64 {
        self.camera_depth_at(frame as f64 / fps)
    }
}

pub fn position_for(index: usize) -> PhrasePosition {
    PhraseLayout::default().position_for(index)
}

pub fn camera_depth_at(seconds: f64) -> f64 {
    PhraseLayout::default().camera_depth_at(seconds)
}
