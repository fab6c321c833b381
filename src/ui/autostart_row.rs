use gtk4 as gtk;
use gtk::prelude::*;
use gtk::glib;
use libadwaita as adw;
use adw::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{AutostartController, HostBridge};

pub struct AutostartRow {
    pub widget: adw::ActionRow,
}

impl AutostartRow {
    pub fn new<B: HostBridge + 'static>(controller: AutostartController<B>, app_name: &str) -> Self {
        let switch = gtk::Switch::new();
        switch.set_valign(gtk::Align::Center);
        let state = controller.state();
        log::debug!(
            "Autostart enabled={} initialized={}",
            state.enabled,
            state.initialized
        );
        // Set before connecting so the initial state is not written back.
        switch.set_active(state.enabled);

        let row = adw::ActionRow::builder()
            .title("Start on Login")
            .subtitle(format!("Open {} when you log in", app_name))
            .build();
        row.add_suffix(&switch);
        row.set_activatable_widget(Some(&switch));

        let controller = Rc::new(RefCell::new(controller));
        switch.connect_state_set(move |_switch, active| {
            controller.borrow_mut().on_toggled(active);
            glib::Propagation::Proceed
        });

        Self { widget: row }
    }
}
