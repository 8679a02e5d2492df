use abstutil::prettyprint_usize;
use geom::{Circle, Distance};
use widgetry::mapspace::{ObjectID, World};
use widgetry::{
    Color, EventCtx, GeomBatch, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, State, TextExt,
    VerticalAlignment, Widget,
};

use model::{mean_position, Model, StationDemand};

use crate::components::{bar_chart, demand_table, describe};
use crate::filters::Filters;
use crate::{App, Transition};

// The ranked table shows this many of the busiest stations
const TOP_STATIONS: usize = 20;
// Circle radius per trip starting at the station
const METERS_PER_TRIP: f64 = 5.0;

pub struct Dashboard {
    panel: Panel,
    world: World<Obj>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Obj(usize);
impl ObjectID for Obj {}

impl Dashboard {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let mut state = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Line("Citibikes NYC hourly demand")
                    .small_heading()
                    .into_widget(ctx),
                Widget::placeholder(ctx, "contents"),
            ]))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
            .build(ctx),
            world: World::unbounded(),
        };
        state.on_filter_change(ctx, app);
        Box::new(state)
    }

    fn on_filter_change(&mut self, ctx: &mut EventCtx, app: &App) {
        ctx.loading_screen("update filters", |ctx, _| {
            if app.model.trips.is_empty() {
                self.panel
                    .replace(ctx, "contents", "No trips loaded".text_widget(ctx));
                self.world = World::unbounded();
                return;
            }

            let day = app.model.day_view(app.filters.date);
            let hour = Model::hour_view(&day, app.filters.hour);
            let demand = Model::demand_per_station(&hour);

            let mut col = vec![
                app.filters.to_controls(ctx, &app.model),
                Widget::col(vec![
                    Line(format!(
                        "{} trips on {}",
                        prettyprint_usize(day.len()),
                        app.filters.date
                    ))
                    .secondary()
                    .into_widget(ctx),
                    bar_chart(ctx, &Model::trips_per_hour(&day)),
                ])
                .section(ctx),
            ];

            if demand.is_empty() {
                warn!(
                    "No trips on {} at {}:00",
                    app.filters.date, app.filters.hour
                );
                col.push(
                    Line(format!("No trips at {}:00 on this day", app.filters.hour))
                        .fg(Color::RED)
                        .into_widget(ctx)
                        .section(ctx),
                );
            } else {
                col.push(
                    Widget::col(vec![
                        Line(format!("Busiest stations at {}:00", app.filters.hour))
                            .small_heading()
                            .into_widget(ctx),
                        demand_table(ctx, &demand, TOP_STATIONS),
                    ])
                    .section(ctx),
                );
            }

            self.panel.replace(ctx, "contents", Widget::col(col));

            self.world = make_world(ctx, app, &demand);
            if let Some(center) = mean_position(&demand) {
                ctx.canvas.center_on_map_pt(center);
            }
        });
    }
}

impl State<App> for Dashboard {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();

        self.world.event(ctx);

        if let Outcome::Changed(_) = self.panel.event(ctx) {
            app.filters = Filters::from_controls(&self.panel);
            self.on_filter_change(ctx, app);
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
        self.world.draw(g);
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        Self::new_state(ctx, app)
    }
}

// One circle per station with demand, sized by its trip count. Skipped entirely
// when the hour has no trips; the panel shows the warning instead.
fn make_world(ctx: &mut EventCtx, app: &App, demand: &[StationDemand]) -> World<Obj> {
    let mut world = World::bounded(&app.model.bounds);
    // Show the bounds of the world
    world.draw_master_batch(
        ctx,
        GeomBatch::from(vec![(Color::grey(0.1), app.model.bounds.get_rectangle())]),
    );

    for (idx, station) in demand.iter().enumerate() {
        let radius = Distance::meters(station.count as f64 * METERS_PER_TRIP);
        world
            .add(Obj(idx))
            .hitbox(Circle::new(station.pos, radius).to_polygon())
            .draw_color(Color::RED)
            .hover_alpha(0.5)
            .tooltip(describe::station(station))
            .build(ctx);
    }
    world.initialize_hover(ctx);
    world
}
