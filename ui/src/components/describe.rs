use widgetry::{Line, Text};

use model::StationDemand;

pub fn station(station: &StationDemand) -> Text {
    let mut txt = Text::from(format!("Station: {}", station.name));
    txt.add_line(Line(format!("ID: {}", station.id.0)));
    txt.add_line(Line(format!("Trips: {}", station.count)));
    txt
}
