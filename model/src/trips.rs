use abstutil::Timer;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use geom::{GPSBounds, LonLat};

use crate::source::{Document, Value};
use crate::{Model, StationID, Trip};

// The collection holds a single month of trips; the window isn't configurable.
fn month_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd(2021, 9, 1),
        NaiveDate::from_ymd(2021, 10, 1),
    )
}

struct Raw {
    started_at: NaiveDateTime,
    ended_at: NaiveDateTime,
    station: StationID,
    station_name: String,
    lon_lat: LonLat,
}

/// Builds the trip table. Rows without a start position are dropped, as is
/// anything outside the month window; a malformed row fails the whole load.
pub fn from_documents(docs: Vec<Document>, timer: &mut Timer) -> Result<Model> {
    let (window_start, window_end) = month_window();

    let total_docs = docs.len();
    let mut gps_bounds = GPSBounds::new();
    let mut raw = Vec::new();
    timer.start_iter("convert documents", total_docs);
    for doc in docs {
        timer.next();

        // Timestamps first: a malformed one fails the load even on a row that's
        // about to be dropped for other reasons
        let started_at = field(&doc, "started_at")?.as_datetime()?;
        let ended_at = field(&doc, "ended_at")?.as_datetime()?;

        let lat = doc.fields.get("start_lat").and_then(Value::as_f64);
        let lng = doc.fields.get("start_lng").and_then(Value::as_f64);
        let (lat, lng) = match (lat, lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => continue,
        };
        if started_at.date() < window_start || started_at.date() >= window_end {
            continue;
        }

        let id = field(&doc, "start_station_id")?;
        let station = StationID(match id.as_str() {
            Some(x) => x.to_string(),
            None => match id.as_f64() {
                Some(x) => x.to_string(),
                None => bail!("{} has an unreadable start_station_id", doc.name),
            },
        });
        let station_name = field(&doc, "start_station_name")?
            .as_str()
            .ok_or_else(|| anyhow!("{} has an unreadable start_station_name", doc.name))?
            .to_string();

        let lon_lat = LonLat::new(lng, lat);
        gps_bounds.update(lon_lat);
        raw.push(Raw {
            started_at,
            ended_at,
            station,
            station_name,
            lon_lat,
        });
    }

    if raw.is_empty() {
        warn!("None of the {total_docs} documents had a valid trip in the month window");
        return Ok(Model::empty());
    }

    let mut trips = Vec::new();
    for r in raw {
        trips.push(Trip {
            date: r.started_at.date(),
            hour: r.started_at.hour() as usize,
            started_at: r.started_at,
            ended_at: r.ended_at,
            station: r.station,
            station_name: r.station_name,
            start_lat: r.lon_lat.y(),
            start_lng: r.lon_lat.x(),
            pos: r.lon_lat.to_pt(&gps_bounds),
        });
    }
    info!("Retained {} of {total_docs} trip documents", trips.len());

    Ok(Model {
        bounds: gps_bounds.to_bounds(),
        gps_bounds,
        trips,
    })
}

fn field<'a>(doc: &'a Document, key: &str) -> Result<&'a Value> {
    doc.fields
        .get(key)
        .ok_or_else(|| anyhow!("{} is missing {key}", doc.name))
}
