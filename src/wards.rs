//! Static ward reference table.
//!
//! Read-only lookup data: ward number, canonical name, and the coordinates
//! used both for map placement of persisted readings and for coordinate-based
//! live-feed queries. Names are matched case-insensitively; the canonical
//! spelling is what gets persisted.

// ---

/// Case-insensitive identifier for the city-wide live feed.
pub const CITY: &str = "Delhi";

/// One entry of the ward reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ward {
    pub number: i32,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Known wards with their monitoring coordinates.
pub const WARDS: &[Ward] = &[
    Ward { number: 1, name: "Anand Vihar", latitude: 28.6469, longitude: 77.3161 },
    Ward { number: 2, name: "Rohini", latitude: 28.7499, longitude: 77.0565 },
    Ward { number: 3, name: "Dwarka", latitude: 28.5921, longitude: 77.0460 },
    Ward { number: 4, name: "Punjabi Bagh", latitude: 28.6740, longitude: 77.1310 },
    Ward { number: 5, name: "R K Puram", latitude: 28.5646, longitude: 77.1742 },
    Ward { number: 6, name: "Okhla", latitude: 28.5355, longitude: 77.2707 },
    Ward { number: 7, name: "Narela", latitude: 28.8527, longitude: 77.0920 },
    Ward { number: 8, name: "Karol Bagh", latitude: 28.6519, longitude: 77.1909 },
    Ward { number: 9, name: "Civil Lines", latitude: 28.6770, longitude: 77.2220 },
    Ward { number: 10, name: "Shahdara", latitude: 28.6735, longitude: 77.2890 },
    Ward { number: 11, name: "Mandir Marg", latitude: 28.6364, longitude: 77.2011 },
    Ward { number: 12, name: "Jahangirpuri", latitude: 28.7328, longitude: 77.1705 },
];

/// Resolve a ward by number and name together.
///
/// Both must point at the same table entry; a number/name mismatch is treated
/// the same as an unknown ward.
pub fn resolve(number: i32, name: &str) -> Option<&'static Ward> {
    // ---
    WARDS
        .iter()
        .find(|w| w.number == number && w.name.eq_ignore_ascii_case(name.trim()))
}

/// Look a ward up by name alone. Used by the live-feed adapter to decide
/// whether a place can be queried by coordinate.
pub fn find_by_name(name: &str) -> Option<&'static Ward> {
    // ---
    WARDS
        .iter()
        .find(|w| w.name.eq_ignore_ascii_case(name.trim()))
}
