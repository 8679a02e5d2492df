#[macro_use]
extern crate log;

mod components;
mod dashboard;
mod filters;

use abstutil::Timer;
use anyhow::Result;
use structopt::StructOpt;
use widgetry::{Color, EventCtx, GfxCtx, SharedAppState};

use model::Model;

use self::filters::Filters;

// There's no direct analog of a web map's zoom levels; this roughly frames one
// city once the camera is centered on the data.
const CAM_ZOOM: f64 = 0.3;

#[derive(StructOpt)]
struct Args {
    /// The path to the JSON credential blob for the trip document store
    #[structopt(long, default_value = "data/credentials.json")]
    credentials: String,
    /// The collection with one document per trip
    #[structopt(long, default_value = "citibikes")]
    collection: String,
}

impl Args {
    fn load(self, timer: &mut Timer) -> Result<Model> {
        Model::load(&self.credentials, &self.collection, timer)
    }
}

fn main() {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(
        widgetry::Settings::new("Citibikes NYC hourly demand"),
        move |ctx| {
            let model = ctx.loading_screen("load trips", |_, timer| args.load(timer).unwrap());
            let app = App::new(ctx, model);
            let states = vec![dashboard::Dashboard::new_state(ctx, &app)];
            (app, states)
        },
    );
}

pub struct App {
    model: Model,

    // The only mutable UI state; every render is a pure function of the model and
    // these two selections
    filters: Filters,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        g.clear(Color::BLACK);
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(ctx: &mut EventCtx, model: Model) -> Self {
        let bounds = &model.bounds;
        ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
        ctx.canvas.center_on_map_pt(bounds.center());
        ctx.canvas.cam_zoom = CAM_ZOOM;

        let filters = Filters::new(&model);
        Self { model, filters }
    }
}
