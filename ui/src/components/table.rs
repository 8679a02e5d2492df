use abstutil::prettyprint_usize;
use widgetry::{EventCtx, GeomBatch, Text, Widget};

use model::StationDemand;

/// A plain ranked table: the grouping key columns plus the trip count, with
/// content-sized columns.
pub fn demand_table(ctx: &mut EventCtx, demand: &[StationDemand], limit: usize) -> Widget {
    let mut rows: Vec<Vec<GeomBatch>> = Vec::new();
    rows.push(render_row(
        ctx,
        vec![
            "Station".to_string(),
            "Name".to_string(),
            "Latitude".to_string(),
            "Longitude".to_string(),
            "Trips".to_string(),
        ],
    ));
    for station in demand.iter().take(limit) {
        rows.push(render_row(
            ctx,
            vec![
                station.id.0.clone(),
                station.name.clone(),
                format!("{:.4}", station.lat),
                format!("{:.4}", station.lng),
                prettyprint_usize(station.count),
            ],
        ));
    }

    let columns = rows[0].len();
    let mut width_per_col: Vec<f64> = vec![0.0; columns];
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            width_per_col[col] = width_per_col[col].max(cell.get_dims().width);
        }
    }

    let margin = 20.0;
    let mut col = Vec::new();
    for row in rows {
        let mut batch = GeomBatch::new();
        batch.autocrop_dims = false;
        let mut x1 = 0.0;
        for (idx, cell) in row.into_iter().enumerate() {
            batch.append(cell.translate(x1, 0.0));
            x1 += width_per_col[idx] + margin;
        }
        col.push(batch.into_widget(ctx));
    }
    Widget::col(col)
}

fn render_row(ctx: &mut EventCtx, cells: Vec<String>) -> Vec<GeomBatch> {
    cells
        .into_iter()
        .map(|x| Text::from(x).render_autocropped(ctx))
        .collect()
}
