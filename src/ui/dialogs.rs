use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Tile Recall")
        .application_icon("io.github.tilerecall.TileRecall")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("Memorize the flashing tiles, then find them again.")
        .build();
    dialog.add_legal_section("Tile Recall", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
