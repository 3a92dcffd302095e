//! Standalone demo: opens a window with the color picker on a random color.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_chroma::{color_picker, convert, ColorInput, ColorState};

fn main() {
    env_logger::init();

    let color = RwSignal::new(ColorState::new(ColorInput::Rgb(convert::random_rgb())));

    floem::Application::new()
        .window(
            move |_| {
                color_picker(color).on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((232.0, 560.0))
                    .title("floem-chroma"),
            ),
        )
        .run();
}
