use crate::scene::color::ColorDef;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, treating values of the wrong shape as absent.
///
/// Parameter-state JSON is hand-edited or produced by UI collaborators that may store a string
/// where a number is expected. Such values are dropped here and replaced with defaults during
/// normalization instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    if v.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(v) {
        Ok(t) => Ok(Some(t)),
        Err(e) => {
            tracing::debug!(
                target: "dotwave::config",
                ty = std::any::type_name::<T>(),
                error = %e,
                "ignoring malformed parameter value"
            );
            Ok(None)
        }
    }
}

/// JSON boundary object for a full parameter state.
///
/// Every field is optional; [`crate::ParameterState::from_def`] fills gaps with defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParameterStateDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) dimension: Option<DimensionDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) background_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) flat_color: Option<ColorDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) gradient: Option<GradientDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) animation: Option<AnimationDef>,
    #[serde(default, alias = "halftone", deserialize_with = "lenient")]
    pub(crate) halftone1: Option<HalftoneDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) dark_overlay: Option<DarkOverlayDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) border: Option<BorderDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DimensionDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) preset: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) width: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GradientDef {
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub(crate) kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) colors: Option<Vec<ColorStopDef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ColorStopDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) color: Option<ColorDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) position: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnimationDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) pattern: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) amplitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) frequency: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) spread: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) rotation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) center_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) center_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_x: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_x_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_x_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_x_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_y: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_y_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_y_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) auto_pan_y_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) ease: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HalftoneDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) density: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) min_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) max_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) size_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) blend_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) allow_overlap: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DarkOverlayDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) intensity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) fade_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) blend_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) top: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) bottom: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) left: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) right: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BorderDef {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) thickness: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) color: Option<ColorDef>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) blend_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) opacity: Option<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
