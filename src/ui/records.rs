use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use super::state::AppState;
use crate::records::SessionRecord;

const RECENT_ROWS: usize = 8;

fn table_cell(text: &str, class_name: &str, width_chars: i32) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class(class_name);
    label.add_css_class("body");
    label.set_halign(gtk::Align::Fill);
    label.set_hexpand(true);
    label.set_xalign(0.5);
    if width_chars > 0 {
        label.set_width_chars(width_chars);
    }
    label
}

fn build_session_grid(entries: &[SessionRecord], target_rows: usize) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.set_halign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_column_homogeneous(true);
    grid.set_column_spacing(10);
    grid.set_row_spacing(5);
    for (col, head) in ["Player", "Result", "Level", "Lives", "Date"].iter().enumerate() {
        grid.attach(&table_cell(head, "score-table-head", 6), col as i32, 0, 1, 1);
    }

    for idx in 0..target_rows {
        let row = (idx + 1) as i32;
        let cells = match entries.get(idx) {
            Some(entry) => [
                entry.player.clone(),
                if entry.won { "Won" } else { "Lost" }.to_string(),
                entry.level.to_string(),
                entry.lives.to_string(),
                entry.date_label.clone(),
            ],
            None => std::array::from_fn(|_| "---".to_string()),
        };
        for (col, text) in cells.iter().enumerate() {
            grid.attach(&table_cell(text, "score-table-row", 6), col as i32, row, 1, 1);
        }
    }
    grid
}

pub fn show_records_dialog(state: &Rc<RefCell<AppState>>, app: &adw::Application) {
    let parent_window = app.active_window();
    let dialog = adw::Dialog::new();
    dialog.set_can_close(true);

    let title = gtk::Label::new(Some("Scores"));
    title.add_css_class("heading");

    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&title));
    header.set_show_end_title_buttons(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(10);
    content.set_margin_bottom(10);
    content.set_margin_start(10);
    content.set_margin_end(10);

    let (best, recent) = {
        let st = state.borrow();
        (st.records.best().cloned(), st.records.recent(RECENT_ROWS))
    };

    let best_title = gtk::Label::new(Some("Best"));
    best_title.add_css_class("heading");
    content.append(&best_title);
    content.append(&build_session_grid(best.as_slice(), 1));

    let recent_title = gtk::Label::new(Some("Recent"));
    recent_title.add_css_class("heading");
    recent_title.set_margin_top(8);
    content.append(&recent_title);
    content.append(&build_session_grid(&recent, RECENT_ROWS));

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&content));

    dialog.set_child(Some(&toolbar));
    dialog.present(parent_window.as_ref());
}
