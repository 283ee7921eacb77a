use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::state::{AppState, Screen};

pub(super) fn set_header_for(state: &Rc<RefCell<AppState>>, screen: Screen) {
    let st = state.borrow();
    if let Some(help) = &st.help_button {
        help.set_visible(screen == Screen::Game);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(screen == Screen::Game);
    }
}

pub(super) fn update_player(st: &AppState) {
    let Some(game) = &st.game else {
        return;
    };
    if let Some(label) = &st.name_label {
        label.set_text(&format!("Name: {}", game.profile().name()));
    }
    if let Some(label) = &st.age_label {
        label.set_text(&format!("Age: {}", game.profile().age()));
    }
}

pub(super) fn update_progress(st: &AppState) {
    let Some(game) = &st.game else {
        return;
    };
    if let Some(label) = &st.level_label {
        label.set_text(&format!("Level {}", game.level()));
    }
    if let Some(label) = &st.lives_label {
        label.set_text(&format!("Lives {}", game.lives()));
    }
}
