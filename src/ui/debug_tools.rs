use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gdk;
use gtk4::glib;
use tracing::{debug, info};

use super::app::handle_tile_click;
use super::board::{redraw_all_tiles, redraw_tile};
use super::state::AppState;

/// Ctrl+N clears every armed tile but one, Ctrl+F flashes the armed tiles
/// again. Both only work with debugging enabled.
pub fn handle_debug_shortcut(
    state: &Rc<RefCell<AppState>>,
    key: gdk::Key,
    mods: gdk::ModifierType,
) -> bool {
    if !mods.contains(gdk::ModifierType::CONTROL_MASK) {
        return false;
    }
    let is_debug_key = matches!(key, gdk::Key::N | gdk::Key::n | gdk::Key::F | gdk::Key::f);
    if !is_debug_key {
        return false;
    }
    if !state.borrow().settings.debug {
        debug!("debug shortcut ignored, set TILE_RECALL_DEBUG=1 to enable");
        return false;
    }

    match key {
        gdk::Key::N | gdk::Key::n => prepare_near_win(state),
        _ => reflash_armed(state),
    }
    true
}

fn armed_tiles(state: &Rc<RefCell<AppState>>) -> Vec<usize> {
    let st = state.borrow();
    st.game
        .as_ref()
        .map(|game| game.armed().iter().copied().collect())
        .unwrap_or_default()
}

fn prepare_near_win(state: &Rc<RefCell<AppState>>) {
    let armed = armed_tiles(state);
    let Some((_, rest)) = armed.split_last() else {
        info!("[debug] no armed tiles on the board");
        return;
    };
    with_input_unlocked(state, || {
        for &idx in rest {
            handle_tile_click(state, idx);
        }
    });
    info!(remaining = armed.len() - rest.len(), "[debug] board prepared");
}

/// Runs `clicks` with input unlocked, then puts the previous lock back so a
/// flash in progress keeps real clicks out.
fn with_input_unlocked<T>(state: &Rc<RefCell<AppState>>, clicks: impl FnOnce() -> T) -> T {
    let was_locked = std::mem::replace(&mut state.borrow_mut().lock_input, false);
    let result = clicks();
    state.borrow_mut().lock_input = was_locked;
    result
}

fn reflash_armed(state: &Rc<RefCell<AppState>>) {
    let armed = armed_tiles(state);
    let (round_id, hide_after) = {
        let mut st = state.borrow_mut();
        for &idx in &armed {
            if let Some(lit) = st.lit.get_mut(idx) {
                *lit = true;
            }
            redraw_tile(&st, idx);
        }
        (st.round_id, st.settings.timings.flash().hide_after)
    };
    info!(tiles = armed.len(), "[debug] flashing armed tiles");

    let state_hide = state.clone();
    glib::timeout_add_local_once(hide_after, move || {
        let mut st = state_hide.borrow_mut();
        if st.round_id != round_id {
            return;
        }
        st.lit.iter_mut().for_each(|lit| *lit = false);
        redraw_all_tiles(&st);
    });
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::records::Records;
    use crate::settings::Settings;

    fn state() -> Rc<RefCell<AppState>> {
        let settings = Settings::from_sources(PathBuf::from("d"), None, |_: &str| None).unwrap();
        Rc::new(RefCell::new(AppState::new(settings, Records::default())))
    }

    #[test]
    fn unlock_is_restored_while_flashing() {
        let state = state();
        state.borrow_mut().lock_input = true;
        let seen = with_input_unlocked(&state, || state.borrow().lock_input);
        assert!(!seen);
        assert!(state.borrow().lock_input);
    }

    #[test]
    fn unlocked_board_stays_unlocked() {
        let state = state();
        with_input_unlocked(&state, || ());
        assert!(!state.borrow().lock_input);
    }
}
