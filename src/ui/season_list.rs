use std::sync::Arc;

use egui::{Color32, Frame, Layout, RichText, Ui, Visuals, style::Widgets};
use egui_extras::{Column, TableBuilder};
use log::error;

use super::{PALETTE_BLACK, PALETTE_BROWN, PALETTE_GOLD, PALETTE_MAROON, PALETTE_ORANGE, country_tag};
use crate::PitwallError;
use crate::api::F1Api;
use crate::browser::SeasonBrowser;
use crate::champions::SeasonEntry;
use crate::config::AppConfig;
use crate::format::format_race_date;
use crate::messages;
use crate::model::{Driver, Race, Season};
use crate::races::RaceList;

const ROW_HEIGHT: f32 = 20.;
const HEADER_HEIGHT: f32 = 22.;

/// `SeasonListApp` shows every season as a card, newest first. Past seasons
/// show their champion, the season in progress is marked as ongoing. Each
/// card expands into a table of race winners, with the races won by that
/// season's champion highlighted.
pub struct SeasonListApp {
    browser: SeasonBrowser,
    app_config: AppConfig,
}

impl SeasonListApp {
    pub fn new(
        api: Arc<dyn F1Api>,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Result<Self, PitwallError> {
        cc.egui_ctx.set_visuals(Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_MAROON,
            faint_bg_color: PALETTE_BLACK,
            extreme_bg_color: PALETTE_BROWN,
            panel_fill: PALETTE_BLACK,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        });

        let repaint_ctx = cc.egui_ctx.clone();
        let mut browser = SeasonBrowser::new(api)?
            .with_notifier(Arc::new(move || repaint_ctx.request_repaint()));
        browser.mount();

        Ok(Self {
            browser,
            app_config,
        })
    }

    fn remember_window(&mut self, ctx: &egui::Context) {
        let (outer, inner) = ctx.input(|is| (is.viewport().outer_rect, is.viewport().inner_rect));
        if let Some(outer_rect) = outer {
            self.app_config.window_position = outer_rect.min.into();
        }
        if let Some(inner_rect) = inner {
            self.app_config.window_width = inner_rect.width();
            self.app_config.window_height = inner_rect.height();
        }
    }
}

impl eframe::App for SeasonListApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.browser.poll();
        self.remember_window(ctx);

        egui::TopBottomPanel::top("header")
            .min_height(40.)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.add_space(10.);
                    ui.heading(RichText::new(messages::APP_TITLE).color(PALETTE_ORANGE));
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.browser.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(messages::LOADING_SEASONS);
                });
                return;
            }
            if let Some(error) = self.browser.error() {
                ui.colored_label(Color32::RED, error);
                return;
            }

            let mut toggled: Option<Season> = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for entry in self.browser.entries() {
                    if season_card(ui, &self.browser, &entry) {
                        toggled = Some(entry.year());
                    }
                    ui.add_space(8.);
                }
            });
            if let Some(season) = toggled {
                self.browser.toggle_race_list(season);
            }
        });
    }
}

fn driver_text(driver: &Driver) -> String {
    match country_tag(driver.nationality.as_deref()) {
        Some(tag) => format!("{} {}", driver.display_name(), tag),
        None => driver.display_name(),
    }
}

/// Draws one season card, returns whether its toggle button was clicked.
fn season_card(ui: &mut Ui, browser: &SeasonBrowser, entry: &SeasonEntry<'_>) -> bool {
    let year = entry.year();
    let expanded = browser.is_expanded(year);
    let mut clicked = false;

    Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        match entry {
            SeasonEntry::Current { year } => {
                ui.label(
                    RichText::new(messages::SEASON_IN_PROGRESS)
                        .color(PALETTE_ORANGE)
                        .strong(),
                );
                ui.horizontal(|ui| {
                    ui.heading(year.to_string());
                    ui.label(RichText::new(messages::ONGOING).color(PALETTE_ORANGE));
                });
                ui.label(messages::CHAMPIONSHIP_ONGOING);
                ui.label(RichText::new(messages::CHAMPION_TO_BE_DETERMINED).italics());
            }
            SeasonEntry::Completed { year, champion } => {
                ui.heading(year.to_string());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(driver_text(champion)).strong());
                    ui.label(RichText::new(messages::WORLD_CHAMPION).color(PALETTE_GOLD));
                });
            }
        }

        let button_text = if expanded {
            messages::HIDE_RACE_WINNERS
        } else {
            messages::VIEW_RACE_WINNERS
        };
        clicked = ui
            .button(button_text)
            .on_hover_text(messages::toggle_race_list(year))
            .clicked();

        if expanded {
            race_panel(ui, browser, year);
        }
    });

    clicked
}

fn race_panel(ui: &mut Ui, browser: &SeasonBrowser, season: Season) {
    match browser.races_for(season) {
        RaceList::NotRequested => {}
        RaceList::Pending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(messages::loading_race_data(season));
            });
        }
        RaceList::Empty => {
            ui.label(RichText::new(messages::no_race_data(season)).italics());
        }
        RaceList::Loaded(races) => {
            ui.push_id(("races", season), |ui| race_table(ui, browser, season, races));
        }
    }
}

fn race_table(ui: &mut Ui, browser: &SeasonBrowser, season: Season, races: &[Race]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(36.))
        .column(Column::exact(60.))
        .column(Column::auto().at_least(180.))
        .column(Column::auto().at_least(160.))
        .column(Column::remainder().at_least(100.))
        .header(HEADER_HEIGHT, |mut header| {
            for title in ["Rd", "Date", "Grand Prix", "Winner", "Constructor"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for race in races {
                let champion_win = browser.is_race_won_by_champion(season, race);
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(race.round.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_race_date(race.date.as_deref()));
                    });
                    row.col(|ui| {
                        ui.label(race.race_name.as_str())
                            .on_hover_text(race.circuit.circuit_name.as_str());
                    });
                    row.col(|ui| {
                        let winner = race
                            .winner
                            .as_ref()
                            .map(driver_text)
                            .unwrap_or_else(|| "-".to_string());
                        if champion_win {
                            ui.label(RichText::new(format!("★ {winner}")).color(PALETTE_GOLD))
                                .on_hover_text(messages::CHAMPION_WIN);
                        } else {
                            ui.label(winner);
                        }
                    });
                    row.col(|ui| {
                        let constructor = race
                            .constructor
                            .as_ref()
                            .map(|c| c.name.as_str())
                            .unwrap_or("-");
                        ui.label(constructor);
                    });
                });
            }
        });
}
