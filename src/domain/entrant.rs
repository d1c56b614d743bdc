//! Entrant domain model.
//!
//! An entrant is one drawable unit of a roster. Its `id` is assigned at import
//! time from its position in the list and is the only identity key: two entrants
//! may share a name and still be distinct.

use serde::{Deserialize, Serialize};

/// Minimum number of digits in an entrant id or a draw number.
const ID_WIDTH: usize = 2;

/// One drawable unit with a stable id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: String,
    pub name: String,
}

impl Entrant {
    /// Creates an entrant for the given 1-based roster position.
    ///
    /// # Examples
    ///
    /// ```
    /// use whosnext::Entrant;
    ///
    /// let entrant = Entrant::at_position(3, "Cara");
    /// assert_eq!(entrant.id, "03");
    /// assert_eq!(entrant.name, "Cara");
    /// ```
    #[must_use]
    pub fn at_position(position: usize, name: impl Into<String>) -> Self {
        Self {
            id: format_number(position),
            name: name.into(),
        }
    }
}

/// Formats a 1-based sequence number zero-padded to at least two digits.
///
/// Used both for entrant ids and for the draw numbers shown next to history rows.
///
/// ```
/// use whosnext::domain::format_number;
///
/// assert_eq!(format_number(7), "07");
/// assert_eq!(format_number(10), "10");
/// assert_eq!(format_number(123), "123");
/// ```
#[must_use]
pub fn format_number(n: usize) -> String {
    format!("{n:0width$}", width = ID_WIDTH)
}
