use crate::error::{ScrubError, ScrubResult};

/// One `(input, output)` pair of a [`ParameterCurve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    pub input: f64,
    pub output: f64,
}

/// Piecewise-linear mapping from one scalar to another, defined by ordered
/// breakpoints with strictly increasing inputs. Evaluation clamps outside the
/// first/last breakpoint. Stateless and immutable once constructed.
///
/// Several independent curves are typically evaluated against the same scroll
/// progress to drive overlay opacity, offset, and scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterCurve {
    breakpoints: Vec<Breakpoint>,
}

impl ParameterCurve {
    pub fn new(points: &[(f64, f64)]) -> ScrubResult<Self> {
        let curve = Self {
            breakpoints: points
                .iter()
                .map(|&(input, output)| Breakpoint { input, output })
                .collect(),
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Deserialized curves bypass [`new`](Self::new); call this before use.
    pub fn validate(&self) -> ScrubResult<()> {
        if self.breakpoints.len() < 2 {
            return Err(ScrubError::validation(
                "ParameterCurve needs at least two breakpoints",
            ));
        }
        for bp in &self.breakpoints {
            if !bp.input.is_finite() || !bp.output.is_finite() {
                return Err(ScrubError::validation(
                    "ParameterCurve breakpoints must be finite",
                ));
            }
        }
        if !self
            .breakpoints
            .windows(2)
            .all(|w| w[0].input < w[1].input)
        {
            return Err(ScrubError::validation(
                "ParameterCurve inputs must be strictly increasing",
            ));
        }
        Ok(())
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Piecewise-linear interpolation with clamped extrapolation.
    pub fn evaluate(&self, x: f64) -> f64 {
        let idx = self.breakpoints.partition_point(|bp| bp.input <= x);

        if idx == 0 {
            return self.breakpoints[0].output;
        }
        if idx >= self.breakpoints.len() {
            return self.breakpoints[self.breakpoints.len() - 1].output;
        }

        let a = &self.breakpoints[idx - 1];
        let b = &self.breakpoints[idx];
        let t = (x - a.input) / (b.input - a.input);
        a.output + (b.output - a.output) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_clamping() {
        let curve = ParameterCurve::new(&[(0.0, 1.0), (0.15, 1.0), (0.4, 0.0)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(-5.0), 1.0);
        assert_eq!(curve.evaluate(0.4), 0.0);
        assert_eq!(curve.evaluate(2.0), 0.0);
    }

    #[test]
    fn interpolates_between_breakpoints() {
        let curve = ParameterCurve::new(&[(0.0, 0.0), (0.4, -60.0)]).unwrap();
        assert!((curve.evaluate(0.2) - -30.0).abs() < 1e-12);

        let curve = ParameterCurve::new(&[(0.0, 1.0), (0.15, 1.0), (0.4, 0.0)]).unwrap();
        assert_eq!(curve.evaluate(0.1), 1.0);
        assert!((curve.evaluate(0.275) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn nan_input_clamps_to_first_output() {
        let curve = ParameterCurve::new(&[(0.0, 3.0), (1.0, 7.0)]).unwrap();
        assert_eq!(curve.evaluate(f64::NAN), 3.0);
    }

    #[test]
    fn validate_rejects_bad_curves() {
        assert!(ParameterCurve::new(&[]).is_err());
        assert!(ParameterCurve::new(&[(0.0, 1.0)]).is_err());
        assert!(ParameterCurve::new(&[(0.5, 0.0), (0.5, 1.0)]).is_err());
        assert!(ParameterCurve::new(&[(0.8, 0.0), (0.2, 1.0)]).is_err());
        assert!(ParameterCurve::new(&[(0.0, f64::NAN), (1.0, 1.0)]).is_err());
    }

    #[test]
    fn serde_roundtrip_preserves_breakpoints() {
        let curve = ParameterCurve::new(&[(0.65, 0.0), (0.8, 1.0), (0.95, 0.8)]).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        let back: ParameterCurve = serde_json::from_str(&json).unwrap();
        back.validate().unwrap();
        assert_eq!(back, curve);
    }
}
