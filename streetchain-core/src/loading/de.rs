use log::warn;
use serde::Deserialize;

/// `maxspeed` as found in OSM-derived data: a number, a string such as
/// `"60"` or `"30 mph"`, or a list of those when a road has several.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSpeed {
    Number(f64),
    Text(String),
    Many(Vec<RawSpeed>),
}

impl RawSpeed {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn km_per_hour(&self) -> Option<u32> {
        match self {
            RawSpeed::Number(speed) if speed.is_finite() && *speed > 0.0 => Some(*speed as u32),
            RawSpeed::Number(_) => None,
            RawSpeed::Text(text) => parse_speed(text),
            RawSpeed::Many(speeds) => speeds.iter().find_map(RawSpeed::km_per_hour),
        }
    }
}

const KMH_PER_MPH: f64 = 1.609_344;

/// Leading integer of a speed string in km/h, `None` for tags like
/// `"RU:urban"`. Values suffixed with `mph` are converted.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_speed(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let speed = text[..digits_end]
        .parse::<u32>()
        .ok()
        .filter(|&speed| speed > 0)?;

    if text[digits_end..].trim_start().starts_with("mph") {
        Some((f64::from(speed) * KMH_PER_MPH).round() as u32)
    } else {
        Some(speed)
    }
}

pub(super) fn deserialize_speed_limit<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(raw) = Option::<RawSpeed>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let speed = raw.km_per_hour();
    if speed.is_none() {
        warn!("Ignoring unusable maxspeed value {raw:?}");
    }
    Ok(speed)
}
