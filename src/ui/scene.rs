use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::build_board_grid;
use super::hud::set_header_for;
use super::state::{AppState, Screen};
use crate::game::FinalReport;

pub(super) fn show_screen(state: &Rc<RefCell<AppState>>, screen: Screen) {
    set_header_for(state, screen);
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        let transition = match screen {
            Screen::Intro => gtk::StackTransitionType::SlideRight,
            _ => gtk::StackTransitionType::SlideLeft,
        };
        stack.set_transition_type(transition);
        stack.set_visible_child_name(screen.name());
    }
}

pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let Some(board_container) = state.borrow().board_container.clone() else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

pub(super) fn show_game_over(state: &Rc<RefCell<AppState>>, report: &FinalReport) {
    {
        let st = state.borrow();
        let (title, message, closing) = if report.won {
            ("Congratulations!", "You won!", "Great job!")
        } else {
            ("Game Over", "You lost!", "Better luck next time!")
        };
        if let Some(label) = &st.game_over_title {
            label.set_text(title);
        }
        if let Some(label) = &st.game_over_message {
            label.set_text(message);
        }
        if let Some(label) = &st.final_message {
            label.set_text(closing);
        }
        if let Some(label) = &st.level_reached_label {
            label.set_text(&format!("Final Level: {}", report.level));
        }
        if let Some(label) = &st.lives_left_label {
            label.set_text(&format!("Lives Left: {}", report.lives));
        }
        if let Some(label) = &st.best_label {
            let text = match st.records.best() {
                Some(best) => format!(
                    "Best: {} reached level {} with {} {} left",
                    best.player,
                    best.level,
                    best.lives,
                    if best.lives == 1 { "life" } else { "lives" }
                ),
                None => String::new(),
            };
            label.set_text(&text);
        }
    }
    show_screen(state, Screen::GameOver);
}

pub(super) fn show_intro(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        st.round_id = st.round_id.wrapping_add(1);
        st.lock_input = false;
        st.lit.clear();
        if let Some(game) = st.game.as_mut() {
            game.restart();
        }
        if let Some(root) = &st.game_root {
            root.remove_css_class("shake");
            root.remove_css_class("flash-screen");
        }
    }
    show_screen(state, Screen::Intro);
}
