use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::app::start_game;
use super::state::AppState;
use crate::game::PlayerProfile;

pub const PLAYER_COLORS: [(&str, &str); 7] = [
    ("Black", "#000000"),
    ("Blue", "#3584e4"),
    ("Green", "#2ec27e"),
    ("Yellow", "#f6d32d"),
    ("Orange", "#ff7800"),
    ("Red", "#e01b24"),
    ("Purple", "#9141ac"),
];

fn selected_color_hex(dropdown: Option<&gtk::DropDown>) -> &'static str {
    let selected = dropdown.map_or(0, |d| d.selected() as usize);
    PLAYER_COLORS
        .get(selected)
        .map_or(PLAYER_COLORS[0].1, |(_, hex)| *hex)
}

/// Reads the form fields. `None` while the form is incomplete.
pub(super) fn profile_from_form(st: &AppState) -> Option<PlayerProfile> {
    let name = st.name_entry.as_ref()?.text();
    let age = st.age_entry.as_ref()?.text();
    let color = selected_color_hex(st.color_dropdown.as_ref());
    PlayerProfile::from_form(&name, &age, color).ok()
}

fn refresh_start_button(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    let valid = profile_from_form(&st).is_some();
    if let Some(button) = &st.start_button {
        button.set_sensitive(valid);
    }
}

fn form_row(label: &str, widget: &impl IsA<gtk::Widget>) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Vertical, 4);
    let caption = gtk::Label::new(Some(label));
    caption.set_halign(gtk::Align::Start);
    caption.add_css_class("caption-heading");
    row.append(&caption);
    row.append(widget);
    row
}

pub(super) fn build_intro_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("intro-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 14);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_size_request(280, -1);

    let title = gtk::Label::new(Some("Tile Recall"));
    title.add_css_class("title-1");

    let subtitle = gtk::Label::new(Some("Watch the tiles flash, then find them again."));
    subtitle.add_css_class("dim-label");
    subtitle.set_wrap(true);
    subtitle.set_justify(gtk::Justification::Center);

    let name_entry = gtk::Entry::builder().placeholder_text("Your name").build();
    let age_entry = gtk::Entry::builder()
        .placeholder_text("Your age")
        .input_purpose(gtk::InputPurpose::Digits)
        .build();
    let labels: Vec<&str> = PLAYER_COLORS.iter().map(|(label, _)| *label).collect();
    let color_dropdown = gtk::DropDown::from_strings(&labels);

    let start_button = gtk::Button::with_label("Start Game");
    start_button.add_css_class("suggested-action");
    start_button.add_css_class("pill");
    start_button.set_sensitive(false);
    start_button.set_margin_top(8);

    for entry in [&name_entry, &age_entry] {
        entry.connect_changed({
            let state = state.clone();
            move |_| refresh_start_button(&state)
        });
        entry.connect_activate({
            let state = state.clone();
            move |_| start_game(&state)
        });
    }
    start_button.connect_clicked({
        let state = state.clone();
        move |_| start_game(&state)
    });

    content.append(&title);
    content.append(&subtitle);
    content.append(&form_row("Name", &name_entry));
    content.append(&form_row("Age", &age_entry));
    content.append(&form_row("Tile color", &color_dropdown));
    content.append(&start_button);

    center.set_center_widget(Some(&content));
    root.append(&center);

    {
        let mut st = state.borrow_mut();
        st.name_entry = Some(name_entry);
        st.age_entry = Some(age_entry);
        st.color_dropdown = Some(color_dropdown);
        st.start_button = Some(start_button);
    }

    root
}
