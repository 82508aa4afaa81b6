use starlookup_protocol::model::star::{
    Star,
    StarId,
};

/// A catalog row as scanned from the database, every column nullable.
#[derive(Clone, Debug, Default, PartialEq, sqlx::FromRow)]
pub struct NullableStar {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub color_index: Option<f64>,
    pub abs_magnitude: Option<f64>,
    pub spectrum: Option<String>,
}

impl NullableStar {
    /// Replaces every missing value with the zero value of its type.
    ///
    /// The id isn't part of the row, so it's left at zero. Callers set it to
    /// the id they looked up.
    pub fn coerce(self) -> Star {
        Star {
            id: StarId::default(),
            name: self.name.unwrap_or_default(),
            x: self.x.unwrap_or_default(),
            y: self.y.unwrap_or_default(),
            z: self.z.unwrap_or_default(),
            color: self.color_index.unwrap_or_default() as f32,
            absolute_magnitude: self.abs_magnitude.unwrap_or_default() as f32,
            spectrum: self.spectrum.unwrap_or_default(),
        }
    }
}

/// Result of a lookup that reached the database.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(Star),
    NotFound(StarId),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Flattens the result into a star, using [`Star::zeroed`] for unknown
    /// ids.
    pub fn into_star(self) -> Star {
        match self {
            Self::Found(star) => star,
            Self::NotFound(id) => Star::zeroed(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_coerces_missing_values_to_zero() {
        let star = NullableStar::default().coerce();
        assert_eq!(star, Star::default());
    }

    #[test]
    fn it_keeps_present_values() {
        let star = NullableStar {
            name: Some("Sol".to_owned()),
            x: Some(0.000005),
            y: None,
            z: Some(-1.5),
            color_index: Some(0.656),
            abs_magnitude: None,
            spectrum: Some("G2V".to_owned()),
        }
        .coerce();

        assert_eq!(star.id, StarId(0));
        assert_eq!(star.name, "Sol");
        assert_eq!(star.x, 0.000005);
        assert_eq!(star.y, 0.0);
        assert_eq!(star.z, -1.5);
        assert_eq!(star.color, 0.656_f32);
        assert_eq!(star.absolute_magnitude, 0.0);
        assert_eq!(star.spectrum, "G2V");
    }

    #[test]
    fn equal_rows_coerce_equally() {
        let row = NullableStar {
            name: None,
            x: Some(1.0),
            y: Some(2.0),
            z: None,
            color_index: Some(0.3),
            abs_magnitude: Some(4.2),
            spectrum: None,
        };
        assert_eq!(row.clone().coerce(), row.coerce());
    }

    #[test]
    fn not_found_flattens_to_zeroed_star() {
        let lookup = Lookup::NotFound(StarId(999999));
        assert!(!lookup.is_found());
        assert_eq!(lookup.into_star(), Star::zeroed(StarId(999999)));
    }
}
