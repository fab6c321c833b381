use gtk4 as gtk;
use gtk::prelude::*;
use gtk::gio;
use gtk::glib;
use libadwaita as adw;
use adw::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::backend::{HostBridge, PrivilegedRunner};
use crate::model::{ActionPhase, DESTRUCTIVE_CLASS, SUGGESTED_CLASS};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct HibernateRow {
    pub widget: adw::ActionRow,
}

impl HibernateRow {
    /// Registers `win.hibernate` on `window` and binds the row's button to it.
    pub fn new<B: HostBridge + 'static>(
        window: &adw::ApplicationWindow,
        runner: PrivilegedRunner<B>,
    ) -> Self {
        let button = gtk::Button::new();
        button.set_valign(gtk::Align::Center);
        button.set_action_name(Some("win.hibernate"));

        let row = adw::ActionRow::builder()
            .title("Hibernation")
            .subtitle("Configure the system so it can hibernate (requires administrator rights)")
            .build();
        row.add_suffix(&button);

        let action = gio::SimpleAction::new("hibernate", None);
        apply_view(&button, &action, runner.phase());

        let runner = Rc::new(RefCell::new(runner));
        let button_ref = button.clone();
        action.connect_activate(move |action, _| {
            on_hibernate(&runner, &button_ref, action);
        });
        window.add_action(&action);

        Self { widget: row }
    }
}

fn on_hibernate<B: HostBridge + 'static>(
    runner: &Rc<RefCell<PrivilegedRunner<B>>>,
    button: &gtk::Button,
    action: &gio::SimpleAction,
) {
    log::info!("Attempting to set up hibernation");
    let completion = runner.borrow_mut().trigger();
    apply_view(button, action, runner.borrow().phase());

    let Some(completion) = completion else {
        return;
    };

    // The script runs in its own process; check for its exit on the main loop.
    let runner = runner.clone();
    let button = button.clone();
    let action = action.clone();
    glib::timeout_add_local(POLL_INTERVAL, move || match completion.poll() {
        None => glib::ControlFlow::Continue,
        Some(outcome) => {
            let phase = runner.borrow_mut().complete(outcome);
            apply_view(&button, &action, phase);
            glib::ControlFlow::Break
        }
    });
}

fn apply_view(button: &gtk::Button, action: &gio::SimpleAction, phase: ActionPhase) {
    let view = phase.view();
    button.set_label(view.label);
    button.remove_css_class(SUGGESTED_CLASS);
    button.remove_css_class(DESTRUCTIVE_CLASS);
    if let Some(class) = view.css_class {
        button.add_css_class(class);
    }
    // The button follows the action's enabled flag.
    action.set_enabled(view.sensitive);
}
