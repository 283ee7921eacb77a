use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;
use tracing::{error, info, warn};

use super::board::{CONTENT_MARGIN, redraw_all_tiles, redraw_tile};
use super::debug_tools;
use super::dialogs::show_about_dialog;
use super::hud::{update_player, update_progress};
use super::intro::{build_intro_view, profile_from_form};
use super::records::show_records_dialog;
use super::scene::{rebuild_board, show_game_over, show_intro, show_screen};
use super::state::{AppState, Screen};
use crate::game::{ClickOutcome, FinalReport, FlashPlan, GameController, LevelStart};
use crate::records::{self, SessionRecord};
use crate::settings;

const APP_ID: &str = "io.github.tilerecall.TileRecall";
const STYLE_CSS: &str = include_str!("../../data/style.css");

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let settings = settings::load_settings(glib::user_config_dir().join("tile-recall"));
        let records = records::load_records_or_default(&settings.records_path());
        info!(
            data_dir = %settings.data_dir.display(),
            debug = settings.debug,
            sessions = records.sessions.len(),
            "starting"
        );
        let state = Rc::new(RefCell::new(AppState::new(settings, records)));

        let scores_action = SimpleAction::new("scores", None);
        scores_action.connect_activate({
            let app = app.clone();
            let state = state.clone();
            move |_, _| show_records_dialog(&state, &app)
        });
        app.add_action(&scores_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let header = adw::HeaderBar::new();
        header.add_css_class("flat");

        let help_button = gtk::Button::builder()
            .icon_name("help-about-symbolic")
            .build();
        help_button.set_tooltip_text(Some("How to play"));
        help_button.connect_clicked({
            let state = state.clone();
            move |_| show_screen(&state, Screen::Help)
        });
        header.pack_start(&help_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("Scores"), Some("app.scores"));
        menu_model.append(Some("About Tile Recall"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("Restart"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| show_intro(&state)
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_hhomogeneous(false);
        view_stack.set_vhomogeneous(false);
        view_stack.set_transition_duration(300);

        view_stack.add_named(&build_intro_view(&state), Some(Screen::Intro.name()));
        view_stack.add_named(&build_help_view(&state), Some(Screen::Help.name()));
        view_stack.add_named(&build_game_view(&state), Some(Screen::Game.name()));
        view_stack.add_named(&build_game_over_view(&state), Some(Screen::GameOver.name()));

        let toolbar = adw::ToolbarView::new();
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Tile Recall")
            .default_width(560)
            .default_height(700)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 520);

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack);
            st.help_button = Some(help_button);
            st.restart_button = Some(restart_button);
        }

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, mods| {
                if debug_tools::handle_debug_shortcut(&state, key, mods) {
                    return glib::Propagation::Stop;
                }
                if key == gdk::Key::Escape
                    && state.borrow().current_screen().as_deref() == Some(Screen::Help.name())
                {
                    show_screen(&state, Screen::Game);
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        show_screen(&state, Screen::Intro);
        win.present();
    });

    app.run()
}

fn load_css() {
    let Some(display) = gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_help_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 14);
    root.set_halign(gtk::Align::Center);
    root.set_valign(gtk::Align::Center);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("How to play"));
    title.add_css_class("title-2");

    let body = gtk::Label::new(Some(
        "Some tiles flash in your color when a level starts.\n\
Click every one of them, in any order, to clear the level.\n\
A wrong tile costs a life. You have three.\n\
Clear all ten levels to win.",
    ));
    body.set_wrap(true);
    body.set_justify(gtk::Justification::Center);
    body.set_max_width_chars(40);

    let back_button = gtk::Button::with_label("Back to game");
    back_button.add_css_class("pill");
    back_button.set_halign(gtk::Align::Center);
    back_button.connect_clicked({
        let state = state.clone();
        move |_| show_screen(&state, Screen::Game)
    });

    root.append(&title);
    root.append(&body);
    root.append(&back_button);
    root
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let info_row = gtk::Box::new(gtk::Orientation::Horizontal, 18);
    info_row.set_halign(gtk::Align::Center);
    let name_label = gtk::Label::new(None);
    let age_label = gtk::Label::new(None);
    let level_label = gtk::Label::new(None);
    level_label.add_css_class("heading");
    let lives_label = gtk::Label::new(None);
    lives_label.add_css_class("heading");
    for label in [&name_label, &age_label, &level_label, &lives_label] {
        info_row.append(label);
    }

    let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_container.set_hexpand(true);
    board_container.set_vexpand(true);
    board_container.add_css_class("board-container");

    root.append(&info_row);
    root.append(&board_container);

    {
        let mut st = state.borrow_mut();
        st.game_root = Some(root.clone());
        st.board_container = Some(board_container);
        st.name_label = Some(name_label);
        st.age_label = Some(age_label);
        st.level_label = Some(level_label);
        st.lives_label = Some(lives_label);
    }

    root
}

fn build_game_over_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 10);
    root.set_halign(gtk::Align::Center);
    root.set_valign(gtk::Align::Center);

    let title = gtk::Label::new(None);
    title.add_css_class("title-1");
    let message = gtk::Label::new(None);
    message.add_css_class("title-3");
    let closing = gtk::Label::new(None);
    let level_reached = gtk::Label::new(None);
    let lives_left = gtk::Label::new(None);
    let best = gtk::Label::new(None);
    best.add_css_class("dim-label");
    best.set_wrap(true);

    let again_button = gtk::Button::with_label("Play Again");
    again_button.add_css_class("suggested-action");
    again_button.add_css_class("pill");
    again_button.set_halign(gtk::Align::Center);
    again_button.set_margin_top(8);
    again_button.connect_clicked({
        let state = state.clone();
        move |_| show_intro(&state)
    });

    for label in [&title, &message, &closing, &level_reached, &lives_left, &best] {
        root.append(label);
    }
    root.append(&again_button);

    {
        let mut st = state.borrow_mut();
        st.game_over_title = Some(title);
        st.game_over_message = Some(message);
        st.final_message = Some(closing);
        st.level_reached_label = Some(level_reached);
        st.lives_left_label = Some(lives_left);
        st.best_label = Some(best);
    }

    root
}

/// Builds a controller from the intro form and starts level 1.
pub(super) fn start_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        let Some(profile) = profile_from_form(&st) else {
            return;
        };
        info!(player = profile.name(), age = profile.age(), color = %profile.color(), "new game");
        let timing = st.settings.timings.flash();
        st.game = Some(GameController::with_thread_rng(profile).with_flash_timing(timing));
        update_player(&st);
    }
    show_screen(state, Screen::Game);
    start_current_level(state);
}

pub(super) fn start_current_level(state: &Rc<RefCell<AppState>>) {
    let start = {
        let mut st = state.borrow_mut();
        st.round_id = st.round_id.wrapping_add(1);
        let Some(game) = st.game.as_mut() else {
            return;
        };
        game.start()
    };

    match start {
        Ok(LevelStart::Flash(plan)) => begin_flash(state, plan),
        Ok(LevelStart::Won(report)) => finish_game(state, report),
        Err(err) => error!("could not start level: {err}"),
    }
}

fn begin_flash(state: &Rc<RefCell<AppState>>, plan: FlashPlan) {
    let round_id = {
        let mut st = state.borrow_mut();
        let mut lit = vec![false; plan.grid_size * plan.grid_size];
        for &idx in &plan.tiles {
            lit[idx] = true;
        }
        st.lit = lit;
        st.lock_input = true;
        update_progress(&st);
        st.round_id
    };
    rebuild_board(state);

    let state_show = state.clone();
    let shown = plan.tiles.clone();
    glib::timeout_add_local_once(plan.timing.show_after, move || {
        let mut st = state_show.borrow_mut();
        if st.round_id != round_id {
            return;
        }
        for &idx in &shown {
            if let Some(lit) = st.lit.get_mut(idx) {
                *lit = true;
            }
            redraw_tile(&st, idx);
        }
    });

    let state_hide = state.clone();
    glib::timeout_add_local_once(plan.timing.hide_after, move || {
        let mut st = state_hide.borrow_mut();
        if st.round_id != round_id {
            return;
        }
        st.lit.iter_mut().for_each(|lit| *lit = false);
        st.lock_input = false;
        redraw_all_tiles(&st);
    });
}

pub fn handle_tile_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();
    if st.lock_input {
        return;
    }
    let Some(game) = st.game.as_mut() else {
        return;
    };
    let outcome = match game.handle_click(index) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("click dropped: {err}");
            return;
        }
    };

    match outcome {
        ClickOutcome::Ignored => {}
        ClickOutcome::Hit { .. } => redraw_tile(&st, index),
        ClickOutcome::Miss { .. } => {
            update_progress(&st);
            let shake = st.settings.timings.shake();
            drop(st);
            play_feedback(state, "shake", shake);
        }
        ClickOutcome::LevelCleared { .. } => {
            redraw_tile(&st, index);
            st.lock_input = true;
            let round_id = st.round_id;
            let flash = st.settings.timings.screen_flash();
            let pause = st.settings.timings.level_clear_pause();
            drop(st);
            play_feedback(state, "flash-screen", flash);

            let state_next = state.clone();
            glib::timeout_add_local_once(pause, move || {
                if state_next.borrow().round_id == round_id {
                    start_current_level(&state_next);
                }
            });
        }
        ClickOutcome::Won(report) => {
            redraw_tile(&st, index);
            drop(st);
            finish_game(state, report);
        }
        ClickOutcome::Lost(report) => {
            update_progress(&st);
            let shake = st.settings.timings.shake();
            drop(st);
            play_feedback(state, "shake", shake);
            finish_game(state, report);
        }
    }
}

/// Adds a CSS class to the game screen and drops it again after `duration`.
fn play_feedback(state: &Rc<RefCell<AppState>>, css_class: &'static str, duration: Duration) {
    let Some(root) = state.borrow().game_root.clone() else {
        return;
    };
    root.remove_css_class(css_class);
    root.add_css_class(css_class);
    let root_weak = root.downgrade();
    glib::timeout_add_local_once(duration, move || {
        if let Some(root) = root_weak.upgrade() {
            root.remove_css_class(css_class);
        }
    });
}

fn finish_game(state: &Rc<RefCell<AppState>>, report: FinalReport) {
    {
        let mut st = state.borrow_mut();
        st.lock_input = true;
        let age = st.game.as_ref().map_or(0, |game| game.profile().age());
        st.records
            .push(SessionRecord::from_report(&report, age, records::now_date_label()));
        let path = st.settings.records_path();
        if let Err(err) = records::save_records(&path, &st.records) {
            warn!(path = %path.display(), "could not save records: {err}");
        }
    }
    show_game_over(state, &report);
}
