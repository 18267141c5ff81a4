mod app;
mod message;
mod widgets;

pub use app::EmployeeManagerApp;
pub use message::Message;

use crate::{config::Config, core::HttpEmployeeApi};

/// Opens the desktop window and blocks until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    let api = HttpEmployeeApi::new(&config)?;
    tracing::info!("using backend at {}", api.collection_url());

    iced::application(
        move || EmployeeManagerApp::new(api.clone()),
        EmployeeManagerApp::update,
        EmployeeManagerApp::view,
    )
    .title("Employee Manager")
    .window_size((980.0, 760.0))
    .run()?;
    Ok(())
}
