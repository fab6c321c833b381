use gtk4 as gtk;
use gtk::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use crate::backend::{AutostartController, HostQueue, PrivilegedRunner, SandboxBridge};
use crate::config::Config;
use crate::ui::autostart_row::AutostartRow;
use crate::ui::hibernate_row::HibernateRow;

pub struct MainWindow;

impl MainWindow {
    pub fn new(app: &adw::Application) -> adw::ApplicationWindow {
        let config = Config::load();
        let bridge = SandboxBridge::from_config(&config);

        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title(config.display_name.as_str())
            .icon_name(config.app_id.as_str())
            .default_width(config.window_width)
            .default_height(config.window_height)
            .build();

        let welcome = format!("Welcome to {}", config.display_name);
        let label = gtk::Label::new(Some(welcome.as_str()));
        label.add_css_class("title-1");
        label.set_wrap(true);

        let group = adw::PreferencesGroup::builder()
            .title("Settings")
            .build();

        // Probes the host and may apply the first-run default. Writes are
        // queued so a quick on/off reaches the host in the same order.
        let autostart = AutostartRow::new(
            AutostartController::from_config(HostQueue::new(bridge.clone()), &config),
            &config.display_name,
        );
        group.add(&autostart.widget);

        let hibernate = HibernateRow::new(&window, PrivilegedRunner::from_config(bridge, &config));
        group.add(&hibernate.widget);

        let content = gtk::Box::new(gtk::Orientation::Vertical, 24);
        content.add_css_class("hello-content");
        content.append(&label);
        content.append(&group);

        let clamp = adw::Clamp::builder()
            .maximum_size(560)
            .child(&content)
            .vexpand(true)
            .build();

        let main_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        main_box.append(&adw::HeaderBar::new());
        main_box.append(&clamp);

        window.set_content(Some(&main_box));

        window
    }
}
