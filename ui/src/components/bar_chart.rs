use abstutil::{prettyprint_usize, Counter};
use geom::Polygon;
use widgetry::{Color, EventCtx, GeomBatch, Line, Text, Widget};

const BAR_WIDTH: f64 = 14.0;
const BAR_GAP: f64 = 4.0;
const MAX_BAR_HEIGHT: f64 = 150.0;

/// Trips per hour as 24 bars. Hours with no trips still get a slot, so the axis
/// always covers the whole day.
pub fn bar_chart(ctx: &mut EventCtx, counts: &Counter<usize>) -> Widget {
    let max = (0..24).map(|hour| counts.get(hour)).max().unwrap_or(0);

    let mut batch = GeomBatch::new();
    batch.autocrop_dims = false;
    for hour in 0..24 {
        let count = counts.get(hour);
        let x = hour as f64 * (BAR_WIDTH + BAR_GAP);
        if count > 0 {
            let height = MAX_BAR_HEIGHT * (count as f64) / (max as f64);
            batch.push(
                Color::BLUE,
                Polygon::rectangle(BAR_WIDTH, height).translate(x, MAX_BAR_HEIGHT - height),
            );
        }
        // Baseline tick, so empty hours are still visibly part of the axis
        batch.push(
            Color::grey(0.5),
            Polygon::rectangle(BAR_WIDTH, 2.0).translate(x, MAX_BAR_HEIGHT),
        );
        if hour % 3 == 0 {
            batch.append(
                Text::from(format!("{hour}"))
                    .render_autocropped(ctx)
                    .translate(x, MAX_BAR_HEIGHT + 6.0),
            );
        }
    }

    Widget::col(vec![
        Line(format!("Peak hour: {} trips", prettyprint_usize(max)))
            .secondary()
            .into_widget(ctx),
        batch.into_widget(ctx),
    ])
}
