use gtk4 as gtk;

use crate::game::{Color, GameController, TileStatus};
use crate::records::Records;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Help,
    Game,
    GameOver,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Intro => "intro",
            Screen::Help => "help",
            Screen::Game => "game",
            Screen::GameOver => "game-over",
        }
    }
}

pub struct AppState {
    pub settings: Settings,
    pub records: Records,
    pub game: Option<GameController>,
    /// Bumped for every new board; timers from older boards compare against it.
    pub round_id: u64,
    pub lock_input: bool,
    pub lit: Vec<bool>,

    pub view_stack: Option<gtk::Stack>,
    pub help_button: Option<gtk::Button>,
    pub restart_button: Option<gtk::Button>,
    pub game_root: Option<gtk::Box>,
    pub board_container: Option<gtk::Box>,
    pub tile_buttons: Vec<gtk::Button>,
    pub level_label: Option<gtk::Label>,
    pub lives_label: Option<gtk::Label>,
    pub name_label: Option<gtk::Label>,
    pub age_label: Option<gtk::Label>,
    pub name_entry: Option<gtk::Entry>,
    pub age_entry: Option<gtk::Entry>,
    pub color_dropdown: Option<gtk::DropDown>,
    pub start_button: Option<gtk::Button>,
    pub game_over_title: Option<gtk::Label>,
    pub game_over_message: Option<gtk::Label>,
    pub final_message: Option<gtk::Label>,
    pub level_reached_label: Option<gtk::Label>,
    pub lives_left_label: Option<gtk::Label>,
    pub best_label: Option<gtk::Label>,
}

impl AppState {
    pub fn new(settings: Settings, records: Records) -> Self {
        AppState {
            settings,
            records,
            game: None,
            round_id: 0,
            lock_input: false,
            lit: Vec::new(),
            view_stack: None,
            help_button: None,
            restart_button: None,
            game_root: None,
            board_container: None,
            tile_buttons: Vec::new(),
            level_label: None,
            lives_label: None,
            name_label: None,
            age_label: None,
            name_entry: None,
            age_entry: None,
            color_dropdown: None,
            start_button: None,
            game_over_title: None,
            game_over_message: None,
            final_message: None,
            level_reached_label: None,
            lives_left_label: None,
            best_label: None,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.game.as_ref().map_or(0, GameController::grid_size)
    }

    /// Player color while flashing or once cleared, idle gray otherwise.
    pub fn tile_color(&self, index: usize) -> Color {
        let Some(game) = &self.game else {
            return Color::IDLE_TILE;
        };
        let cleared = game.tiles().get(index) == Some(&TileStatus::Cleared);
        let lit = self.lit.get(index).copied().unwrap_or(false);
        if cleared || lit {
            game.profile().color()
        } else {
            Color::IDLE_TILE
        }
    }

    pub fn current_screen(&self) -> Option<String> {
        self.view_stack
            .as_ref()
            .and_then(|stack| stack.visible_child_name())
            .map(|name| name.to_string())
    }
}
