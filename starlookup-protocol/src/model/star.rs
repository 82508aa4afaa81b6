use serde::{
    Deserialize,
    Serialize,
};

/// Star identifier, as used for lookups.
///
/// This is the `star_id` column of the catalog table. The id a client asks
/// for is always the one echoed back, regardless of what the row contains.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct StarId(pub i64);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: f32,
    #[serde(rename = "absolute-magnitude")]
    pub absolute_magnitude: f32,
    pub spectrum: String,
}

impl Star {
    /// A star with the given id and every other field at its zero value.
    ///
    /// This is what a lookup for an unknown id looks like on the wire.
    pub fn zeroed(id: StarId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Encodes the star as JSON.
    ///
    /// JSON has no representation for NaN or infinities, so a star with a
    /// non-finite coordinate, color or magnitude is an error.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("color", self.color.into()),
            ("absolute-magnitude", self.absolute_magnitude.into()),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(serde::ser::Error::custom(format_args!(
                "star {}: {field} is {value}, which can't be encoded as JSON",
                self.id
            )));
        }

        serde_json::to_vec(self)
    }
}
