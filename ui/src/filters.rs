use chrono::NaiveDate;
use widgetry::{Choice, EventCtx, Panel, Spinner, TextExt, Widget};

use model::Model;

/// The two user-chosen parameters: a day present in the data, and an hour of day.
pub struct Filters {
    pub date: NaiveDate,
    pub hour: usize,
}

impl Filters {
    pub fn new(model: &Model) -> Self {
        Self {
            date: model
                .dates()
                .into_iter()
                .next()
                .unwrap_or_else(|| NaiveDate::from_ymd(2021, 9, 1)),
            hour: 8,
        }
    }

    pub fn to_controls(&self, ctx: &mut EventCtx, model: &Model) -> Widget {
        Widget::col(vec![
            Widget::row(vec![
                "Day:".text_widget(ctx),
                Widget::dropdown(
                    ctx,
                    "date",
                    self.date,
                    model
                        .dates()
                        .into_iter()
                        .map(|date| Choice::new(date.to_string(), date))
                        .collect(),
                ),
            ]),
            Widget::row(vec![
                "Hour:".text_widget(ctx),
                Spinner::widget(ctx, "hour", (0, 23), self.hour, 1),
            ]),
        ])
        .section(ctx)
    }

    // The dropdown only offers dates from the data and the spinner clamps to 0-23,
    // so unlike a free-form date picker, this can't fail.
    pub fn from_controls(p: &Panel) -> Self {
        Self {
            date: p.dropdown_value("date"),
            hour: p.spinner("hour"),
        }
    }
}
