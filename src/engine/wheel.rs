//! Wheel Geometry
//!
//! Slices are laid out clockwise from the top of the wheel, slice `i`
//! covering `[i * 360/n, (i + 1) * 360/n)` degrees. The pointer stays fixed
//! at `pointer_deg` degrees clockwise from the top; the wheel turns by the
//! cumulative `rotation`.

const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    /// Pointer position, degrees clockwise from the top (270 = left)
    pub pointer_deg: f64,
    /// Full turns added on every spin before settling
    pub min_turns: u32,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            pointer_deg: 270.0,
            min_turns: 5,
        }
    }
}

impl WheelGeometry {
    pub fn slice_deg(slices: usize) -> f64 {
        FULL_TURN / slices as f64
    }

    /// Rotation target that lands slice `index` under the pointer.
    ///
    /// `offset` in `[0, 1)` picks where inside the slice the pointer ends up;
    /// the target is always at least `min_turns` full turns past `previous`.
    pub fn rotation_for(&self, previous: f64, index: usize, slices: usize, offset: f64) -> f64 {
        let slice = Self::slice_deg(slices);
        let landing = (index as f64 + offset) * slice;
        let wanted = (self.pointer_deg - landing).rem_euclid(FULL_TURN);
        let current = previous.rem_euclid(FULL_TURN);
        let delta = (wanted - current).rem_euclid(FULL_TURN);
        previous + f64::from(self.min_turns) * FULL_TURN + delta
    }

    /// Slice under the pointer for a given rotation. `None` for an empty wheel.
    pub fn index_at(&self, rotation: f64, slices: usize) -> Option<usize> {
        if slices == 0 {
            return None;
        }
        let effective = (self.pointer_deg - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
        let index = (effective / Self::slice_deg(slices)).floor() as usize;
        Some(index.min(slices - 1))
    }
}
