use std::cell::RefCell;
use std::f64::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::app::handle_tile_click;
use super::state::AppState;
use crate::game::TileSize;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 8;

fn rounded_rect(cr: &cairo::Context, width: f64, height: f64, radius: f64) {
    cr.new_sub_path();
    cr.arc(width - radius, radius, radius, -FRAC_PI_2, 0.0);
    cr.arc(width - radius, height - radius, radius, 0.0, FRAC_PI_2);
    cr.arc(radius, height - radius, radius, FRAC_PI_2, PI);
    cr.arc(radius, radius, radius, PI, PI + FRAC_PI_2);
    cr.close_path();
}

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("recall-board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let grid_size = state.borrow().grid_size();
    let size_class = TileSize::for_grid(grid_size).css_class();

    let mut buttons = Vec::new();
    for i in 0..grid_size * grid_size {
        let index = i;
        let button = gtk::Button::builder()
            .css_classes(vec!["recall-tile", size_class])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();

        let state_draw = state.clone();
        drawing_area.set_draw_func(move |_, cr, width, height| {
            let color = state_draw.borrow().tile_color(index);
            let (red, green, blue) = color.to_unit_rgb();
            let min_dim = width.min(height) as f64;

            cr.set_antialias(cairo::Antialias::Best);
            rounded_rect(cr, width as f64, height as f64, min_dim * 0.12);
            cr.set_source_rgb(red, green, blue);
            if let Err(err) = cr.fill() {
                tracing::warn!(index, "tile paint failed: {err}");
            }
        });

        button.set_child(Some(&drawing_area));

        let state_click = state.clone();
        button.connect_clicked(move |_| {
            handle_tile_click(&state_click, index);
        });

        let x = (i % grid_size) as i32;
        let y = (i / grid_size) as i32;
        grid.attach(&button, x, y, 1, 1);
        buttons.push(button);
    }

    state.borrow_mut().tile_buttons = buttons;

    grid
}

pub fn redraw_tile(st: &AppState, index: usize) {
    if let Some(child) = st.tile_buttons.get(index).and_then(|button| button.child()) {
        child.queue_draw();
    }
}

pub fn redraw_all_tiles(st: &AppState) {
    for index in 0..st.tile_buttons.len() {
        redraw_tile(st, index);
    }
}
