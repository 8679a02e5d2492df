use abstutil::Counter;
use chrono::NaiveDate;
use geom::Pt2D;

use crate::{Model, StationID, Trip};

/// Demand at one station for the selected day and hour. Recomputed from scratch
/// whenever the selection changes; never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct StationDemand {
    pub id: StationID,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub pos: Pt2D,
    pub count: usize,
}

impl Model {
    /// The sorted distinct dates with at least one trip. The UI only offers these.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.trips.iter().map(|t| t.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// A date with no trips yields an empty view, not an error.
    pub fn day_view(&self, date: NaiveDate) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.date == date).collect()
    }

    pub fn hour_view<'a>(day: &[&'a Trip], hour: usize) -> Vec<&'a Trip> {
        day.iter().filter(|t| t.hour == hour).copied().collect()
    }

    /// Trip starts per hour for one day. Hours with no trips read back as 0.
    pub fn trips_per_hour(day: &[&Trip]) -> Counter<usize> {
        let mut cnt = Counter::new();
        for trip in day {
            cnt.inc(trip.hour);
        }
        cnt
    }

    /// Groups the hour's trips by (station, name, lat, lng) and counts each group,
    /// most popular first. If records disagree about a station's position, each
    /// distinct tuple stays its own group. The sort is stable, so ties keep the
    /// order stations first appear in the view.
    pub fn demand_per_station(hour: &[&Trip]) -> Vec<StationDemand> {
        let mut result: Vec<StationDemand> = Vec::new();
        for trip in hour {
            if let Some(existing) = result.iter_mut().find(|d| {
                d.id == trip.station
                    && d.name == trip.station_name
                    && d.lat == trip.start_lat
                    && d.lng == trip.start_lng
            }) {
                existing.count += 1;
            } else {
                result.push(StationDemand {
                    id: trip.station.clone(),
                    name: trip.station_name.clone(),
                    lat: trip.start_lat,
                    lng: trip.start_lng,
                    pos: trip.pos,
                    count: 1,
                });
            }
        }
        result.sort_by_key(|d| std::cmp::Reverse(d.count));
        result
    }
}

/// Where to center the map. `None` when there's nothing to show; never a mean over
/// zero rows.
pub fn mean_position(demand: &[StationDemand]) -> Option<Pt2D> {
    if demand.is_empty() {
        return None;
    }
    let n = demand.len() as f64;
    let x = demand.iter().map(|d| d.pos.x()).sum::<f64>() / n;
    let y = demand.iter().map(|d| d.pos.y()).sum::<f64>() / n;
    Some(Pt2D::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Timelike};

    fn trip(datetime: &str, id: &str, name: &str, lat: f64, lng: f64) -> Trip {
        let started_at = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S").unwrap();
        Trip {
            date: started_at.date(),
            hour: started_at.hour() as usize,
            started_at,
            ended_at: started_at,
            station: StationID(id.to_string()),
            station_name: name.to_string(),
            start_lat: lat,
            start_lng: lng,
            pos: Pt2D::new(lng.abs(), lat),
        }
    }

    fn model(trips: Vec<Trip>) -> Model {
        let mut model = Model::empty();
        model.trips = trips;
        model
    }

    #[test]
    fn one_station_three_trips() {
        let model = model(vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:30:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:59:00", "1", "A", 40.0, -73.9),
        ]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let hour = Model::hour_view(&day, 8);
        let demand = Model::demand_per_station(&hour);

        assert_eq!(demand.len(), 1);
        assert_eq!(demand[0].id, StationID("1".to_string()));
        assert_eq!(demand[0].name, "A");
        assert_eq!(demand[0].lat, 40.0);
        assert_eq!(demand[0].lng, -73.9);
        assert_eq!(demand[0].count, 3);
    }

    #[test]
    fn busiest_station_first() {
        let mut trips = vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:02:00", "1", "A", 40.0, -73.9),
        ];
        for minute in 0..5 {
            trips.push(trip(
                &format!("2021-09-05 08:1{minute}:00"),
                "2",
                "B",
                40.1,
                -73.8,
            ));
        }
        let model = model(trips);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let demand = Model::demand_per_station(&Model::hour_view(&day, 8));

        assert_eq!(demand.len(), 2);
        assert_eq!(demand[0].name, "B");
        assert_eq!(demand[0].count, 5);
        assert_eq!(demand[1].name, "A");
        assert_eq!(demand[1].count, 2);
    }

    #[test]
    fn counts_sum_to_the_view_size() {
        let model = model(vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:02:00", "2", "B", 40.1, -73.8),
            trip("2021-09-05 08:03:00", "2", "B", 40.1, -73.8),
            trip("2021-09-05 09:00:00", "2", "B", 40.1, -73.8),
        ]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let hour = Model::hour_view(&day, 8);
        let demand = Model::demand_per_station(&hour);
        assert_eq!(demand.iter().map(|d| d.count).sum::<usize>(), hour.len());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let model = model(vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:02:00", "2", "B", 40.1, -73.8),
            trip("2021-09-05 08:03:00", "1", "A", 40.0, -73.9),
        ]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let hour = Model::hour_view(&day, 8);
        assert_eq!(
            Model::demand_per_station(&hour),
            Model::demand_per_station(&hour)
        );
    }

    #[test]
    fn stations_with_differing_coordinates_stay_distinct() {
        let model = model(vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:02:00", "1", "A", 40.0001, -73.9),
        ]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let demand = Model::demand_per_station(&Model::hour_view(&day, 8));
        assert_eq!(demand.len(), 2);
    }

    #[test]
    fn absent_date_yields_an_empty_view() {
        let model = model(vec![trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9)]);
        assert!(model.day_view(NaiveDate::from_ymd(2021, 9, 6)).is_empty());
    }

    #[test]
    fn empty_hour_yields_empty_demand_and_no_center() {
        let model = model(vec![trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9)]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let hour = Model::hour_view(&day, 3);
        let demand = Model::demand_per_station(&hour);
        assert!(demand.is_empty());
        assert_eq!(mean_position(&demand), None);
    }

    #[test]
    fn histogram_counts_per_hour() {
        let model = model(vec![
            trip("2021-09-05 08:01:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:02:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 17:00:00", "1", "A", 40.0, -73.9),
        ]);
        let day = model.day_view(NaiveDate::from_ymd(2021, 9, 5));
        let counts = Model::trips_per_hour(&day);
        assert_eq!(counts.get(8), 2);
        assert_eq!(counts.get(17), 1);
        // Hours with no trips read back as zero
        assert_eq!(counts.get(3), 0);
    }

    #[test]
    fn dates_are_sorted_and_distinct() {
        let model = model(vec![
            trip("2021-09-07 08:00:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 08:00:00", "1", "A", 40.0, -73.9),
            trip("2021-09-05 09:00:00", "1", "A", 40.0, -73.9),
        ]);
        assert_eq!(
            model.dates(),
            vec![
                NaiveDate::from_ymd(2021, 9, 5),
                NaiveDate::from_ymd(2021, 9, 7)
            ]
        );
    }
}
