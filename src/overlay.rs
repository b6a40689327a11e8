use std::collections::BTreeMap;

use crate::curve::ParameterCurve;
use crate::error::{ScrubError, ScrubResult};

/// Named parameter curves driven by one shared scroll progress value.
///
/// A rig groups the overlay animations of a section (text opacity, offsets,
/// scales) so they can be evaluated together per scroll tick. Evaluation is
/// independent of the frame draw path and may run at full input precision.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct OverlayRig {
    params: BTreeMap<String, ParameterCurve>,
}

impl OverlayRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, curve: ParameterCurve) -> Self {
        self.params.insert(name.into(), curve);
        self
    }

    /// Deserialized rigs bypass curve constructors; call this before use.
    pub fn validate(&self) -> ScrubResult<()> {
        for (name, curve) in &self.params {
            curve.validate().map_err(|e| {
                ScrubError::validation(format!("overlay param '{name}': {e}"))
            })?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn curves(&self) -> &BTreeMap<String, ParameterCurve> {
        &self.params
    }

    /// Evaluate every curve at the given progress.
    pub fn evaluate(&self, progress: f64) -> BTreeMap<String, f64> {
        self.params
            .iter()
            .map(|(name, curve)| (name.clone(), curve.evaluate(progress)))
            .collect()
    }

    pub fn evaluate_param(&self, name: &str, progress: f64) -> Option<f64> {
        self.params.get(name).map(|curve| curve.evaluate(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> OverlayRig {
        OverlayRig::new()
            .with_param(
                "text_opacity",
                ParameterCurve::new(&[(0.0, 1.0), (0.15, 1.0), (0.4, 0.0)]).unwrap(),
            )
            .with_param(
                "text_y",
                ParameterCurve::new(&[(0.0, 0.0), (0.4, -60.0)]).unwrap(),
            )
    }

    #[test]
    fn evaluates_all_params_at_one_progress() {
        let values = rig().evaluate(0.4);
        assert_eq!(values.len(), 2);
        assert_eq!(values["text_opacity"], 0.0);
        assert_eq!(values["text_y"], -60.0);
    }

    #[test]
    fn evaluate_param_is_selective() {
        let rig = rig();
        assert_eq!(rig.evaluate_param("text_opacity", 0.0), Some(1.0));
        assert_eq!(rig.evaluate_param("missing", 0.0), None);
    }

    #[test]
    fn validate_catches_bad_deserialized_curves() {
        let json = r#"{"params":{"broken":{"breakpoints":[{"input":0.0,"output":1.0}]}}}"#;
        let rig: OverlayRig = serde_json::from_str(json).unwrap();
        let err = rig.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
