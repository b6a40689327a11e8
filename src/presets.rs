//! The production page sections as data: each section names the sequences it
//! scrubs and the overlay rig driven by its scroll progress.

use crate::curve::ParameterCurve;
use crate::error::{ScrubError, ScrubResult};
use crate::overlay::OverlayRig;
use crate::sequence::SequenceSpec;

/// A full-viewport scroll section: the frame sequences it scrubs (several
/// specs form one concatenated scrub) plus its overlay parameter rig.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub label: String,
    pub sequences: Vec<SequenceSpec>,
    #[serde(default)]
    pub rig: OverlayRig,
}

impl Section {
    pub fn validate(&self) -> ScrubResult<()> {
        if self.sequences.is_empty() {
            return Err(ScrubError::validation(
                "Section needs at least one sequence",
            ));
        }
        for spec in &self.sequences {
            spec.validate()?;
        }
        self.rig.validate()
    }

    pub fn total_frames(&self) -> u32 {
        self.sequences.iter().map(|s| s.frame_count).sum()
    }
}

pub fn hero_scroll() -> ScrubResult<Section> {
    Ok(Section {
        label: "hero-scroll".to_owned(),
        sequences: vec![SequenceSpec::new("sequence-1", 120)],
        rig: OverlayRig::new()
            .with_param(
                "text_opacity",
                ParameterCurve::new(&[(0.0, 1.0), (0.15, 1.0), (0.4, 0.0)])?,
            )
            .with_param("text_y", ParameterCurve::new(&[(0.0, 0.0), (0.4, -60.0)])?),
    })
}

pub fn hero_clouds() -> ScrubResult<Section> {
    Ok(Section {
        label: "hero-clouds".to_owned(),
        sequences: vec![SequenceSpec::new("sequence-1", 120)],
        rig: OverlayRig::new()
            .with_param(
                "title_opacity",
                ParameterCurve::new(&[(0.0, 1.0), (0.08, 1.0), (0.35, 0.0)])?,
            )
            .with_param("title_y", ParameterCurve::new(&[(0.0, 0.0), (0.35, -50.0)])?)
            .with_param(
                "subtitle_opacity",
                ParameterCurve::new(&[(0.02, 0.0), (0.1, 1.0), (0.4, 0.0)])?,
            )
            .with_param(
                "scroll_hint_opacity",
                ParameterCurve::new(&[(0.0, 1.0), (0.05, 1.0), (0.15, 0.0)])?,
            ),
    })
}

pub fn plane_morph() -> ScrubResult<Section> {
    Ok(Section {
        label: "plane-morph".to_owned(),
        sequences: vec![SequenceSpec::new("sequence-2", 120)],
        rig: OverlayRig::new()
            .with_param(
                "text_opacity",
                ParameterCurve::new(&[(0.65, 0.0), (0.8, 1.0), (0.95, 0.8)])?,
            )
            .with_param("text_y", ParameterCurve::new(&[(0.65, 30.0), (0.8, 0.0)])?)
            .with_param(
                "text_scale",
                ParameterCurve::new(&[(0.65, 0.95), (0.8, 1.0)])?,
            ),
    })
}

pub fn specs_morph() -> ScrubResult<Section> {
    Ok(Section {
        label: "specs-morph".to_owned(),
        sequences: vec![SequenceSpec::new("sequence-3", 120)],
        rig: OverlayRig::new()
            .with_param(
                "spec_opacity",
                ParameterCurve::new(&[(0.15, 0.0), (0.35, 1.0)])?,
            )
            .with_param("spec_y", ParameterCurve::new(&[(0.15, 40.0), (0.35, 0.0)])?)
            .with_param(
                "title_opacity",
                ParameterCurve::new(&[(0.6, 0.0), (0.78, 1.0), (0.95, 0.85)])?,
            )
            .with_param(
                "title_scale",
                ParameterCurve::new(&[(0.6, 0.92), (0.78, 1.0)])?,
            ),
    })
}

/// Two 120-frame sequences scrubbed back to back as one 240-frame range.
pub fn fly_in_luxury() -> ScrubResult<Section> {
    Ok(Section {
        label: "fly-in-luxury".to_owned(),
        sequences: vec![
            SequenceSpec::new("sequence-2", 120),
            SequenceSpec::new("sequence-3", 120),
        ],
        rig: OverlayRig::new()
            .with_param(
                "fly_text_opacity",
                ParameterCurve::new(&[(0.0, 0.0), (0.06, 1.0), (0.35, 1.0), (0.48, 0.0)])?,
            )
            .with_param(
                "fly_text_y",
                ParameterCurve::new(&[(0.0, 40.0), (0.48, -120.0)])?,
            )
            .with_param(
                "sub_text_opacity",
                ParameterCurve::new(&[(0.08, 0.0), (0.18, 1.0), (0.35, 1.0), (0.45, 0.0)])?,
            )
            .with_param(
                "eng_text_opacity",
                ParameterCurve::new(&[(0.58, 0.0), (0.72, 1.0), (0.9, 1.0), (0.98, 0.8)])?,
            )
            .with_param(
                "eng_text_scale",
                ParameterCurve::new(&[(0.58, 0.92), (0.72, 1.0)])?,
            )
            .with_param(
                "spec_opacity",
                ParameterCurve::new(&[(0.62, 0.0), (0.75, 1.0)])?,
            )
            .with_param("spec_y", ParameterCurve::new(&[(0.62, 30.0), (0.75, 0.0)])?),
    })
}

/// Look up a preset by its label.
pub fn by_name(name: &str) -> ScrubResult<Section> {
    match name {
        "hero-scroll" => hero_scroll(),
        "hero-clouds" => hero_clouds(),
        "plane-morph" => plane_morph(),
        "specs-morph" => specs_morph(),
        "fly-in-luxury" => fly_in_luxury(),
        other => Err(ScrubError::validation(format!(
            "unknown preset '{other}' (expected hero-scroll, hero-clouds, plane-morph, \
             specs-morph, or fly-in-luxury)"
        ))),
    }
}

pub fn all() -> ScrubResult<Vec<Section>> {
    Ok(vec![
        hero_scroll()?,
        hero_clouds()?,
        plane_morph()?,
        specs_morph()?,
        fly_in_luxury()?,
    ])
}
