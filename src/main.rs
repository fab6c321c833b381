mod app;
mod backend;
mod config;
mod model;
mod ui;
mod window;

const APP_ID: &str = "buzz.zephyros.hello";
const CSS: &str = include_str!("../style/style.css");

fn main() {
    env_logger::init();

    let app = app::HelloApp::new();
    std::process::exit(app.run());
}
