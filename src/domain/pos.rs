//! Point-of-sale data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::EntityRecord;

/// Validation errors raised by the POS constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum PosValidationError {
    EmptyName,
    NameTooLong { max: usize },
    NameControlCharacters,
    NonFiniteCoordinate,
    LatitudeOutOfRange { latitude: f64 },
    LongitudeOutOfRange { longitude: f64 },
}

impl fmt::Display for PosValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pos name must not be empty"),
            Self::NameTooLong { max } => write!(f, "pos name must be at most {max} characters"),
            Self::NameControlCharacters => {
                write!(f, "pos name must not contain control characters")
            }
            Self::NonFiniteCoordinate => write!(f, "coordinates must be finite"),
            Self::LatitudeOutOfRange { latitude } => {
                write!(f, "latitude {latitude} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange { longitude } => {
                write!(f, "longitude {longitude} is outside [-180, 180]")
            }
        }
    }
}

impl std::error::Error for PosValidationError {}

/// Maximum allowed length for a POS display name.
pub const POS_NAME_MAX: usize = 120;

/// Unique display name of a point of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PosName(String);

impl PosName {
    /// Validate and construct a [`PosName`].
    pub fn new(name: impl Into<String>) -> Result<Self, PosValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, PosValidationError> {
        if name.trim().is_empty() {
            return Err(PosValidationError::EmptyName);
        }
        if name.chars().count() > POS_NAME_MAX {
            return Err(PosValidationError::NameTooLong { max: POS_NAME_MAX });
        }
        if name.chars().any(char::is_control) {
            return Err(PosValidationError::NameControlCharacters);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PosName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PosName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PosName> for String {
    fn from(value: PosName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PosName {
    type Error = PosValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// WGS84 coordinate pair.
///
/// ## Invariants
/// - Both components are finite; latitude lies in [-90, 90] and longitude in
///   [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "PositionDto", into = "PositionDto")]
pub struct Position {
    #[schema(example = 49.41)]
    latitude: f64,
    #[schema(example = 8.71)]
    longitude: f64,
}

impl Position {
    /// Validate and construct a [`Position`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PosValidationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PosValidationError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PosValidationError::LatitudeOutOfRange { latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PosValidationError::LongitudeOutOfRange { longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct PositionDto {
    latitude: f64,
    longitude: f64,
}

impl From<Position> for PositionDto {
    fn from(value: Position) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<PositionDto> for Position {
    type Error = PosValidationError;

    fn try_from(value: PositionDto) -> Result<Self, Self::Error> {
        Position::new(value.latitude, value.longitude)
    }
}

/// Campus area a point of sale belongs to.
///
/// Supplied by API clients; not derivable from imported OSM data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    North,
    South,
    East,
    West,
    Central,
}

/// Coffee point of sale on campus.
///
/// ## Invariants
/// - `name` satisfies the [`PosName`] rules and is unique across all POS.
/// - `id` is absent until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PosDto", into = "PosDto")]
pub struct Pos {
    /// Store-assigned identifier; absent for a not-yet-persisted POS.
    #[schema(example = 1)]
    id: Option<i64>,
    #[schema(value_type = String, example = "Central Café")]
    name: PosName,
    /// Free-form description; may be empty.
    #[schema(example = "Espresso bar next to the main lecture hall")]
    description: String,
    position: Position,
    campus_type: CampusType,
}

impl Pos {
    /// Build a [`Pos`] from validated components.
    pub fn new(
        id: Option<i64>,
        name: PosName,
        description: impl Into<String>,
        position: Position,
        campus_type: CampusType,
    ) -> Self {
        Self {
            id,
            name,
            description: description.into(),
            position,
            campus_type,
        }
    }

    /// Store-assigned identifier, if persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Unique display name.
    pub fn name(&self) -> &PosName {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Geographic position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Campus classification.
    pub fn campus_type(&self) -> CampusType {
        self.campus_type
    }
}

impl EntityRecord for Pos {
    const KIND: &'static str = "pos";
    const KEY_FIELD: &'static str = "name";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn key(&self) -> &str {
        self.name.as_ref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct PosDto {
    id: Option<i64>,
    name: String,
    #[serde(default)]
    description: String,
    position: PositionDto,
    campus_type: CampusType,
}

impl From<Pos> for PosDto {
    fn from(value: Pos) -> Self {
        let Pos {
            id,
            name,
            description,
            position,
            campus_type,
        } = value;
        Self {
            id,
            name: name.into(),
            description,
            position: position.into(),
            campus_type,
        }
    }
}

impl TryFrom<PosDto> for Pos {
    type Error = PosValidationError;

    fn try_from(value: PosDto) -> Result<Self, Self::Error> {
        Ok(Pos::new(
            value.id,
            PosName::new(value.name)?,
            value.description,
            Position::try_from(value.position)?,
            value.campus_type,
        ))
    }
}
