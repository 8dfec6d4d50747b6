//! Athlete model.
//!
//! Athletes are opaque identifiers. A display name is optional and is
//! only used for human-readable instructions; no other fields are
//! assumed.

use serde::{Deserialize, Serialize};

/// A roster member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique athlete identifier.
    pub id: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Athlete {
    /// Creates an athlete with no display name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<&str> for Athlete {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Athlete {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Anything that can stand in for an athlete: a bare id or a record
/// carrying one.
///
/// Lets pair keys and seat filling work uniformly over `&str`, `String`
/// and [`Athlete`] inputs.
pub trait AthleteRef {
    /// The athlete's identifier.
    fn athlete_id(&self) -> &str;
}

impl AthleteRef for str {
    fn athlete_id(&self) -> &str {
        self
    }
}

impl AthleteRef for String {
    fn athlete_id(&self) -> &str {
        self
    }
}

impl AthleteRef for Athlete {
    fn athlete_id(&self) -> &str {
        &self.id
    }
}

impl<T: AthleteRef + ?Sized> AthleteRef for &T {
    fn athlete_id(&self) -> &str {
        (**self).athlete_id()
    }
}
