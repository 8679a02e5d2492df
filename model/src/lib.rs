#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod demand;
mod source;
mod trips;

use abstutil::Timer;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use geom::{Bounds, GPSBounds, Pt2D};

pub use self::demand::{mean_position, StationDemand};
pub use self::source::{load_credentials, Credentials, Document, Value};

/// One month of bike-share trips, loaded once per process and never mutated
/// afterwards. Filtered views and aggregates are derived copies.
pub struct Model {
    pub bounds: Bounds,
    pub gps_bounds: GPSBounds,
    pub trips: Vec<Trip>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationID(pub String);

pub struct Trip {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    // Derived from started_at when the table is built
    pub date: NaiveDate,
    pub hour: usize,

    pub station: StationID,
    pub station_name: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub pos: Pt2D,
}

impl Model {
    /// Fetches every trip document from the store and builds the table. A fetch
    /// error or a malformed row fails the whole load.
    pub fn load(credentials_path: &str, collection: &str, timer: &mut Timer) -> Result<Self> {
        let credentials = source::load_credentials(credentials_path)?;
        let docs = source::fetch_all(&credentials, collection)?;
        trips::from_documents(docs, timer)
    }

    pub fn empty() -> Self {
        Self {
            // Avoid crashing the UI with empty bounds
            bounds: Bounds::from(&[Pt2D::zero(), Pt2D::new(1.0, 1.0)]),
            gps_bounds: GPSBounds::new(),
            trips: Vec::new(),
        }
    }
}
