use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::foundation::math::{clamp01, lerp};

/// Behavior of [`Interpolator`] outside its input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Continue the slope of the boundary segment.
    Extend,
    /// Hold the boundary output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Left/right extrapolation pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extrapolation {
    /// Applied below the first input point.
    pub left: Extrapolate,
    /// Applied above the last input point.
    pub right: Extrapolate,
}

impl Extrapolation {
    /// Clamp on both sides.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
    };

    /// Extend on both sides.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
    };

    /// Extend on the left, clamp on the right.
    ///
    /// Ramps driven by `frame - delay` go negative before their delay, which callers use as the
    /// "not yet visible" signal.
    pub const CLAMP_RIGHT: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
    };
}

/// Validated multi-point piecewise-linear map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interpolator {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    extrapolation: Extrapolation,
}

impl Interpolator {
    /// Build a map from `inputs` (strictly increasing, finite) to `outputs` (same length).
    pub fn new(
        inputs: &[f64],
        outputs: &[f64],
        extrapolation: Extrapolation,
    ) -> FrameloomResult<Self> {
        if inputs.len() < 2 {
            return Err(FrameloomError::validation(
                "interpolate needs at least two input points",
            ));
        }
        if inputs.len() != outputs.len() {
            return Err(FrameloomError::validation(format!(
                "interpolate input/output length mismatch: {} vs {}",
                inputs.len(),
                outputs.len()
            )));
        }
        if inputs.iter().chain(outputs).any(|v| !v.is_finite()) {
            return Err(FrameloomError::validation(
                "interpolate points must be finite",
            ));
        }
        if !inputs.windows(2).all(|w| w[0] < w[1]) {
            return Err(FrameloomError::validation(
                "interpolate inputs must be strictly increasing",
            ));
        }
        Ok(Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            extrapolation,
        })
    }

    /// Map `x` through the piecewise-linear curve.
    ///
    /// NaN maps to the first output.
    pub fn sample(&self, x: f64) -> f64 {
        if x.is_nan() {
            return self.outputs[0];
        }
        let n = self.inputs.len();
        let first = self.inputs[0];
        let last = self.inputs[n - 1];

        if x < first {
            match self.extrapolation.left {
                Extrapolate::Clamp => return self.outputs[0],
                Extrapolate::Identity => return x,
                Extrapolate::Extend => return self.segment(0, x),
            }
        }
        if x > last {
            match self.extrapolation.right {
                Extrapolate::Clamp => return self.outputs[n - 1],
                Extrapolate::Identity => return x,
                Extrapolate::Extend => return self.segment(n - 2, x),
            }
        }

        // `x` is inside [first, last]; find the segment whose right edge is >= x.
        let idx = self.inputs.partition_point(|&v| v < x).clamp(1, n - 1);
        self.segment(idx - 1, x)
    }

    fn segment(&self, i: usize, x: f64) -> f64 {
        let (x0, x1) = (self.inputs[i], self.inputs[i + 1]);
        let (y0, y1) = (self.outputs[i], self.outputs[i + 1]);
        lerp(y0, y1, (x - x0) / (x1 - x0))
    }
}

/// One-shot [`Interpolator`] evaluation.
pub fn interpolate(
    x: f64,
    inputs: &[f64],
    outputs: &[f64],
    extrapolation: Extrapolation,
) -> FrameloomResult<f64> {
    Ok(Interpolator::new(inputs, outputs, extrapolation)?.sample(x))
}

/// Two-point map from `[in0, in1]` to `[out0, out1]`; total over all inputs.
///
/// A degenerate input span behaves as a step at `in0`; NaN maps to `out0`.
pub fn remap(
    x: f64,
    (in0, in1): (f64, f64),
    (out0, out1): (f64, f64),
    extrapolation: Extrapolation,
) -> f64 {
    if x.is_nan() {
        return out0;
    }
    if in1 == in0 {
        return if x < in0 { out0 } else { out1 };
    }
    let t = (x - in0) / (in1 - in0);
    let t = if t < 0.0 {
        match extrapolation.left {
            Extrapolate::Clamp => 0.0,
            Extrapolate::Identity => return x,
            Extrapolate::Extend => t,
        }
    } else if t > 1.0 {
        match extrapolation.right {
            Extrapolate::Clamp => 1.0,
            Extrapolate::Identity => return x,
            Extrapolate::Extend => t,
        }
    } else {
        t
    };
    lerp(out0, out1, t)
}

/// Clamped linear ramp: starts at `delay`, spans `span` frames, lands inside `range`.
pub fn linear_clamp(frame: f64, delay: f64, span: f64, range: (f64, f64)) -> f64 {
    remap(frame - delay, (0.0, span), range, Extrapolation::CLAMP)
}

/// Hermite smoothstep between `edge0` and `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = clamp01((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
